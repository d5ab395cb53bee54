//! Statistics engine.
//!
//! Computes display-ready statistics from stored ledger data:
//! - Filter resolution from raw query parameters
//! - Grouped aggregation per stat domain (batting, bowling, fielding,
//!   team, player of the match)
//! - Derived metrics computed from summed raw counters

use std::fmt;

pub mod aggregate;
pub mod filter;

/// Batting strike rate: runs per hundred balls.
pub fn strike_rate(runs: u32, balls: u32) -> f64 {
    if balls == 0 {
        0.0
    } else {
        runs as f64 / balls as f64 * 100.0
    }
}

/// Batting average: runs per dismissal. Zero when never dismissed.
pub fn batting_average(runs: u32, innings: u32, not_outs: u32) -> f64 {
    let dismissals = innings.saturating_sub(not_outs);
    if dismissals == 0 {
        0.0
    } else {
        runs as f64 / dismissals as f64
    }
}

/// Bowling economy: runs conceded per ball. Displayed as runs per over
/// (multiplied by six).
pub fn economy(runs_conceded: u32, balls: u32) -> f64 {
    if balls == 0 {
        0.0
    } else {
        runs_conceded as f64 / balls as f64
    }
}

/// Bowling average: runs conceded per wicket. Positive infinity when
/// wicketless; rendered as a dash, never as a number.
pub fn bowling_average(runs_conceded: u32, wickets: u32) -> f64 {
    if wickets == 0 {
        f64::INFINITY
    } else {
        runs_conceded as f64 / wickets as f64
    }
}

/// Win percentage (0.0 to 100.0). Rounded to a whole number for display.
pub fn win_percent(won: u32, played: u32) -> f64 {
    if played == 0 {
        0.0
    } else {
        won as f64 / played as f64 * 100.0
    }
}

/// Render a bowling average for display: a dash when infinite.
pub fn format_average(average: f64) -> String {
    if average.is_finite() {
        format!("{:.2}", average)
    } else {
        "-".to_string()
    }
}

/// Balls expressed in cricket's mixed-radix overs notation: completed
/// overs plus remaining balls, displayed as `O.R`. This is not decimal
/// division; 7 balls is "1.1", not "1.17".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overs {
    pub overs: u32,
    pub balls: u32,
}

impl Overs {
    /// Convert a ball count to overs. Negative input clamps to 0.0.
    pub fn from_balls(balls: i64) -> Self {
        if balls <= 0 {
            return Self { overs: 0, balls: 0 };
        }
        Self {
            overs: (balls / 6) as u32,
            balls: (balls % 6) as u32,
        }
    }
}

impl fmt::Display for Overs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.overs, self.balls)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strike_rate() {
        assert_eq!(strike_rate(15, 20), 75.0);
        assert_eq!(strike_rate(50, 25), 200.0);
    }

    #[test]
    fn test_strike_rate_zero_cases() {
        // No runs is a zero rate for any ball count
        for balls in [0, 1, 6, 120] {
            assert_eq!(strike_rate(0, balls), 0.0);
        }
        // No balls faced never divides
        assert_eq!(strike_rate(10, 0), 0.0);
    }

    #[test]
    fn test_batting_average() {
        assert_eq!(batting_average(120, 5, 1), 30.0);
        assert_eq!(batting_average(99, 3, 0), 33.0);
    }

    #[test]
    fn test_batting_average_never_dismissed() {
        assert_eq!(batting_average(80, 4, 4), 0.0);
        assert_eq!(batting_average(0, 0, 0), 0.0);
    }

    #[test]
    fn test_economy() {
        assert_eq!(economy(12, 24), 0.5);
        assert_eq!(economy(12, 24) * 6.0, 3.0); // per-over display form
        assert_eq!(economy(7, 0), 0.0);
    }

    #[test]
    fn test_bowling_average() {
        assert_eq!(bowling_average(30, 3), 10.0);
    }

    #[test]
    fn test_bowling_average_wicketless_is_infinite() {
        for runs in [0, 1, 48] {
            let avg = bowling_average(runs, 0);
            assert!(avg.is_infinite() && avg.is_sign_positive());
        }
    }

    #[test]
    fn test_format_average_dash() {
        assert_eq!(format_average(bowling_average(25, 0)), "-");
        assert_eq!(format_average(bowling_average(25, 2)), "12.50");
    }

    #[test]
    fn test_win_percent() {
        assert_eq!(win_percent(3, 4), 75.0);
        assert_eq!(win_percent(0, 7), 0.0);
        assert_eq!(win_percent(2, 0), 0.0);
    }

    #[test]
    fn test_win_percent_rounding() {
        assert_eq!(win_percent(1, 3).round(), 33.0);
        assert_eq!(win_percent(2, 3).round(), 67.0);
    }

    #[test]
    fn test_overs_from_balls() {
        assert_eq!(Overs::from_balls(6), Overs { overs: 1, balls: 0 });
        assert_eq!(Overs::from_balls(7), Overs { overs: 1, balls: 1 });
        assert_eq!(Overs::from_balls(0), Overs { overs: 0, balls: 0 });
        assert_eq!(Overs::from_balls(23), Overs { overs: 3, balls: 5 });
    }

    #[test]
    fn test_overs_negative_clamps() {
        assert_eq!(Overs::from_balls(-3), Overs { overs: 0, balls: 0 });
    }

    #[test]
    fn test_overs_display() {
        assert_eq!(Overs::from_balls(14).to_string(), "2.2");
        assert_eq!(Overs::from_balls(-3).to_string(), "0.0");
    }
}

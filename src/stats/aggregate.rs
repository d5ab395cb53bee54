//! Grouped aggregation per stat domain.
//!
//! Every domain follows the same shape: select entries matching the date
//! selection, group by player (or team) summing raw counters, then derive
//! rates from the sums, never from per-row values. One [`group_fold`]
//! routine carries the shape; each domain supplies its key, its fold, and
//! its ranking metric.
//!
//! Grouping preserves first-seen order and sorting is stable, so rows that
//! tie on the ranking metric stay in storage insertion order and repeated
//! runs over the same data produce identical output.

use std::collections::HashMap;

use serde::Serialize;

use crate::models::{BattingEntry, BowlingEntry, FieldingEntry, Innings, Match};

use super::filter::DateSelection;
use super::{batting_average, bowling_average, economy, strike_rate, win_percent, Overs};

/// Group rows by key, folding each group into an accumulator. Groups come
/// back in first-seen order.
fn group_fold<T, A, K, F>(rows: &[T], key: K, mut fold: F) -> Vec<(String, A)>
where
    A: Default,
    K: Fn(&T) -> &str,
    F: FnMut(&mut A, &T),
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<(String, A)> = Vec::new();

    for row in rows {
        let k = key(row);
        let i = match index.get(k) {
            Some(&i) => i,
            None => {
                index.insert(k.to_string(), groups.len());
                groups.push((k.to_string(), A::default()));
                groups.len() - 1
            }
        };
        fold(&mut groups[i].1, row);
    }

    groups
}

// ── Batting ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct BattingRow {
    pub player: String,
    pub innings: u32,
    pub runs: u32,
    pub balls: u32,
    pub highest_score: u32,
    pub not_outs: u32,
    pub fours: u32,
    pub sixes: u32,
    pub ducks: u32,
    pub fifties: u32,
    pub hundreds: u32,
    pub strike_rate: f64,
    pub average: f64,
}

/// Batting table, ranked by runs. Players without a qualifying entry do
/// not appear.
pub fn batting_stats(entries: &[BattingEntry], selection: &DateSelection) -> Vec<BattingRow> {
    #[derive(Default)]
    struct Acc {
        innings: u32,
        runs: u32,
        balls: u32,
        highest: u32,
        not_outs: u32,
        fours: u32,
        sixes: u32,
        ducks: u32,
        fifties: u32,
        hundreds: u32,
    }

    let matching: Vec<&BattingEntry> = entries
        .iter()
        .filter(|e| selection.contains(e.date))
        .collect();

    let groups = group_fold(
        &matching,
        |e| e.player.as_str(),
        |acc: &mut Acc, e| {
            acc.innings += 1;
            acc.runs += e.runs;
            acc.balls += e.balls;
            acc.highest = acc.highest.max(e.runs);
            acc.not_outs += e.not_out as u32;
            acc.fours += e.fours;
            acc.sixes += e.sixes;
            acc.ducks += e.is_duck() as u32;
            acc.fifties += (e.runs >= 50 && e.runs < 100) as u32;
            acc.hundreds += (e.runs >= 100) as u32;
        },
    );

    let mut rows: Vec<BattingRow> = groups
        .into_iter()
        .map(|(player, a)| BattingRow {
            player,
            innings: a.innings,
            runs: a.runs,
            balls: a.balls,
            highest_score: a.highest,
            not_outs: a.not_outs,
            fours: a.fours,
            sixes: a.sixes,
            ducks: a.ducks,
            fifties: a.fifties,
            hundreds: a.hundreds,
            strike_rate: strike_rate(a.runs, a.balls),
            average: batting_average(a.runs, a.innings, a.not_outs),
        })
        .collect();

    rows.sort_by(|a, b| b.runs.cmp(&a.runs));
    rows
}

// ── Bowling ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct BowlingRow {
    pub player: String,
    pub innings: u32,
    pub overs: String,
    pub balls: u32,
    pub runs_conceded: u32,
    pub wickets: u32,
    pub dots: u32,
    pub wides: u32,
    pub no_balls: u32,
    pub two_fers: u32,
    pub three_fers: u32,
    /// Runs per over
    pub economy: f64,
    /// Runs per wicket; null when wicketless (rendered as a dash)
    pub average: Option<f64>,
}

/// Bowling table, ranked by wickets.
pub fn bowling_stats(entries: &[BowlingEntry], selection: &DateSelection) -> Vec<BowlingRow> {
    #[derive(Default)]
    struct Acc {
        innings: u32,
        balls: u32,
        runs: u32,
        wickets: u32,
        dots: u32,
        wides: u32,
        no_balls: u32,
        two_fers: u32,
        three_fers: u32,
    }

    let matching: Vec<&BowlingEntry> = entries
        .iter()
        .filter(|e| selection.contains(e.date))
        .collect();

    let groups = group_fold(
        &matching,
        |e| e.player.as_str(),
        |acc: &mut Acc, e| {
            acc.innings += 1;
            acc.balls += e.balls;
            acc.runs += e.runs_conceded;
            acc.wickets += e.wickets;
            acc.dots += e.dots;
            acc.wides += e.wides;
            acc.no_balls += e.no_balls;
            acc.two_fers += (e.wickets == 2) as u32;
            acc.three_fers += (e.wickets >= 3) as u32;
        },
    );

    let mut rows: Vec<BowlingRow> = groups
        .into_iter()
        .map(|(player, a)| {
            let average = bowling_average(a.runs, a.wickets);
            BowlingRow {
                player,
                innings: a.innings,
                overs: Overs::from_balls(a.balls as i64).to_string(),
                balls: a.balls,
                runs_conceded: a.runs,
                wickets: a.wickets,
                dots: a.dots,
                wides: a.wides,
                no_balls: a.no_balls,
                two_fers: a.two_fers,
                three_fers: a.three_fers,
                economy: economy(a.runs, a.balls) * 6.0,
                average: average.is_finite().then_some(average),
            }
        })
        .collect();

    rows.sort_by(|a, b| b.wickets.cmp(&a.wickets));
    rows
}

// ── Fielding ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct FieldingRow {
    pub player: String,
    pub innings: u32,
    pub catches: u32,
    pub run_outs: u32,
}

/// Fielding table, ranked by catches.
pub fn fielding_stats(entries: &[FieldingEntry], selection: &DateSelection) -> Vec<FieldingRow> {
    #[derive(Default)]
    struct Acc {
        innings: u32,
        catches: u32,
        run_outs: u32,
    }

    let matching: Vec<&FieldingEntry> = entries
        .iter()
        .filter(|e| selection.contains(e.date))
        .collect();

    let groups = group_fold(
        &matching,
        |e| e.player.as_str(),
        |acc: &mut Acc, e| {
            acc.innings += 1;
            acc.catches += e.catches;
            acc.run_outs += e.run_outs;
        },
    );

    let mut rows: Vec<FieldingRow> = groups
        .into_iter()
        .map(|(player, a)| FieldingRow {
            player,
            innings: a.innings,
            catches: a.catches,
            run_outs: a.run_outs,
        })
        .collect();

    rows.sort_by(|a, b| b.catches.cmp(&a.catches));
    rows
}

// ── Player of the match ─────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct PotmRow {
    pub player: String,
    pub count: u32,
}

/// Player-of-the-match table, ranked by award count. Matches without an
/// award are skipped.
pub fn potm_stats(matches: &[Match], selection: &DateSelection) -> Vec<PotmRow> {
    #[derive(Default)]
    struct Acc {
        count: u32,
    }

    let awarded: Vec<&str> = matches
        .iter()
        .filter(|m| selection.contains(m.date))
        .filter_map(|m| m.potm.as_deref())
        .collect();

    let groups = group_fold(&awarded, |p| *p, |acc: &mut Acc, _| acc.count += 1);

    let mut rows: Vec<PotmRow> = groups
        .into_iter()
        .map(|(player, a)| PotmRow {
            player,
            count: a.count,
        })
        .collect();

    rows.sort_by(|a, b| b.count.cmp(&a.count));
    rows
}

// ── Teams ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct TeamRow {
    pub team: String,
    pub played: u32,
    pub won: u32,
    /// Rounded to the nearest whole number for display
    pub win_percent: u32,
    pub runs: u32,
    pub balls: u32,
    pub wickets: u32,
    pub all_outs: u32,
    pub strike_rate: f64,
    pub lowest_score: String,
    pub highest_score: String,
}

/// Team table, ranked by win percentage. Every team with at least one
/// innings appears, including teams that never won.
pub fn team_stats(matches: &[Match], innings: &[Innings], selection: &DateSelection) -> Vec<TeamRow> {
    #[derive(Default)]
    struct Acc {
        played: u32,
        won: u32,
        runs: u32,
        balls: u32,
        wickets: u32,
        all_outs: u32,
        lowest: Option<(u32, u32)>,
        highest: Option<(u32, u32)>,
    }

    // Innings carry no date of their own; the match supplies it.
    let match_index: HashMap<&str, &Match> = matches
        .iter()
        .filter(|m| selection.contains(m.date))
        .map(|m| (m.id.as_str(), m))
        .collect();

    let matching: Vec<&Innings> = innings
        .iter()
        .filter(|i| match_index.contains_key(i.match_id.as_str()))
        .collect();

    let groups = group_fold(
        &matching,
        |i| i.team.as_str(),
        |acc: &mut Acc, i| {
            let m = match_index[i.match_id.as_str()];
            acc.played += 1;
            acc.won += (m.winner.as_deref() == Some(i.team.as_str())) as u32;
            acc.runs += i.runs;
            acc.balls += i.balls;
            acc.wickets += i.wickets;
            acc.all_outs += i.all_out as u32;
            let score = (i.runs, i.wickets);
            acc.lowest = Some(match acc.lowest {
                Some(low) if low.0 <= score.0 => low,
                _ => score,
            });
            acc.highest = Some(match acc.highest {
                Some(high) if high.0 >= score.0 => high,
                _ => score,
            });
        },
    );

    let mut ranked: Vec<(f64, TeamRow)> = groups
        .into_iter()
        .map(|(team, a)| {
            let pct = win_percent(a.won, a.played);
            let score_line = |s: Option<(u32, u32)>| {
                s.map(|(r, w)| format!("{}/{}", r, w)).unwrap_or_default()
            };
            let row = TeamRow {
                team,
                played: a.played,
                won: a.won,
                win_percent: pct.round() as u32,
                runs: a.runs,
                balls: a.balls,
                wickets: a.wickets,
                all_outs: a.all_outs,
                strike_rate: strike_rate(a.runs, a.balls),
                lowest_score: score_line(a.lowest),
                highest_score: score_line(a.highest),
            };
            (pct, row)
        })
        .collect();

    // Rank on the unrounded percentage; the row carries the display value.
    ranked.sort_by(|a, b| b.0.total_cmp(&a.0));
    ranked.into_iter().map(|(_, row)| row).collect()
}

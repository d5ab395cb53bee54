//! Per-day expense record.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Shared costs for one match day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    /// Match day the costs were incurred on (unique)
    pub date: NaiveDate,

    /// Ground booking fee
    pub ground_fee: u32,

    /// Food and drinks
    pub food_cost: u32,

    /// Balls, tape, and other gear
    pub gear_cost: u32,
}

impl Expense {
    /// Create a new Expense.
    pub fn new(date: NaiveDate, ground_fee: u32, food_cost: u32, gear_cost: u32) -> Self {
        Self {
            date,
            ground_fee,
            food_cost,
            gear_cost,
        }
    }

    /// Total spend for the day.
    pub fn total(&self) -> u32 {
        self.ground_fee + self.food_cost + self.gear_cost
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expense_total() {
        let expense = Expense::new(
            NaiveDate::from_ymd_opt(2025, 6, 15).unwrap(),
            1500,
            800,
            350,
        );
        assert_eq!(expense.total(), 2650);
    }

    #[test]
    fn test_expense_serialization() {
        let expense = Expense::new(NaiveDate::from_ymd_opt(2025, 6, 15).unwrap(), 1500, 800, 350);
        let json = serde_json::to_string(&expense).unwrap();
        let deserialized: Expense = serde_json::from_str(&json).unwrap();

        assert_eq!(expense.date, deserialized.date);
        assert_eq!(expense.total(), deserialized.total());
    }
}

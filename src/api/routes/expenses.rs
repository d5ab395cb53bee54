//! Expense ledger endpoint.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::models::Expense;
use crate::storage::{EntityType, JsonlReader};

#[derive(Debug, Serialize)]
pub struct ExpenseRow {
    pub date: String,
    pub ground_fee: u32,
    pub food_cost: u32,
    pub gear_cost: u32,
    pub total: u32,
}

#[derive(Debug, Default, Serialize)]
pub struct ExpenseTotals {
    pub ground_fee: u32,
    pub food_cost: u32,
    pub gear_cost: u32,
    pub total: u32,
}

#[derive(Debug, Serialize)]
pub struct ExpensesResponse {
    pub rows: Vec<ExpenseRow>,
    pub totals: ExpenseTotals,
}

pub async fn list_expenses(
    State(state): State<AppState>,
) -> Result<Json<ExpensesResponse>, ApiError> {
    let mut expenses: Vec<Expense> =
        JsonlReader::for_entity(&state.storage, EntityType::Expense).read_all()?;

    // Newest first
    expenses.sort_by(|a, b| b.date.cmp(&a.date));

    let mut totals = ExpenseTotals::default();
    let rows = expenses
        .iter()
        .map(|e| {
            totals.ground_fee += e.ground_fee;
            totals.food_cost += e.food_cost;
            totals.gear_cost += e.gear_cost;
            totals.total += e.total();
            ExpenseRow {
                date: e.date.to_string(),
                ground_fee: e.ground_fee,
                food_cost: e.food_cost,
                gear_cost: e.gear_cost,
                total: e.total(),
            }
        })
        .collect();

    Ok(Json(ExpensesResponse { rows, totals }))
}

//! Core data models for the cricket ledger.

mod batting;
mod bowling;
mod expense;
mod fielding;
mod ids;
mod match_day;
mod matches;
mod player;

pub use batting::*;
pub use bowling::*;
pub use expense::*;
pub use fielding::*;
pub use ids::*;
pub use match_day::*;
pub use matches::*;
pub use player::*;

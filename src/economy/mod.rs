//! Coin economy: reward accrual and the theme store.

pub mod ledger;
pub mod store;
pub mod types;

pub use ledger::{end_of_session_award, milestone_award, milestone_index, Ledger};
pub use store::{can_afford, purchase_theme, select_theme};
pub use types::{EconomyError, EconomyProfile, RewardPolicy};

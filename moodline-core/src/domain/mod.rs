//! Core domain entities
//!
//! All business entities are defined here. These are pure data structures
//! with normalization logic - no I/O or external dependencies.

mod account;
pub mod mood;
pub mod quotes;
pub mod result;
pub mod route;
mod session;

pub use account::{fresh_account_id, Account};
pub use mood::{MoodEntry, MoodForm, MoodSummary, SleepSummary};
pub use quotes::MoodQuoteTable;
pub use route::RouteRequirements;
pub use session::SessionSnapshot;

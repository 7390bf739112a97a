//! Service layer - business logic orchestration
//!
//! Services coordinate domain logic and port interactions. Each service
//! focuses on a specific use case or feature area.

mod demo;
mod ledger;
pub mod logging;
pub mod navigation;
mod registry;
mod session;

pub use demo::DemoService;
pub use ledger::MoodLedger;
pub use logging::{EntryPoint, EventLog, LogEntry, LogEvent};
pub use navigation::{decide, decide_path, Verdict};
pub use registry::AccountRegistry;
pub use session::SessionService;

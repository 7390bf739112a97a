//! Moodline Core - Business logic for personal mood journaling
//!
//! This crate implements the core domain logic following hexagonal architecture:
//!
//! - **domain**: Core business entities (Account, MoodEntry, routes, etc.)
//! - **ports**: Trait definitions for external dependencies (KvStore, CredentialScheme)
//! - **services**: Business logic orchestration
//! - **adapters**: Concrete store implementations (JSON file, in-memory)

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod services;

use std::path::Path;
use std::sync::Arc;

use adapters::JsonFileStore;
use config::Config;
use ports::{KvStore, PlaintextCredentials};
use services::{AccountRegistry, MoodLedger, SessionService};

// Re-export commonly used types at crate root
pub use domain::result::{Error, OperationResult, Result};
pub use domain::{Account, MoodEntry, MoodForm, SessionSnapshot};
pub use services::{EntryPoint, EventLog, LogEvent, Verdict};

/// Main context for Moodline operations
///
/// This is the primary entry point for all business logic. It holds the
/// store, configuration, and all services, and restores persisted state
/// once during construction.
pub struct MoodlineContext {
    pub config: Config,
    pub store: Arc<dyn KvStore>,
    pub registry: Arc<AccountRegistry>,
    pub session: SessionService,
    pub ledger: MoodLedger,
}

impl MoodlineContext {
    /// Create a new Moodline context
    pub fn new(moodline_dir: &Path) -> Result<Self> {
        let config = Config::load(moodline_dir)?;

        // Determine which store file to use
        let store_filename = if config.demo_mode {
            "demo.json"
        } else {
            "journal.json"
        };

        let store_path = moodline_dir.join(store_filename);
        let store: Arc<dyn KvStore> = Arc::new(JsonFileStore::open(&store_path)?);

        Self::with_store(config, store)
    }

    /// Create a context over an already-open store. Used by tests and by
    /// embedders that supply their own store implementation.
    pub fn with_store(config: Config, store: Arc<dyn KvStore>) -> Result<Self> {
        let registry = Arc::new(AccountRegistry::new(Arc::clone(&store)));
        let session = SessionService::new(
            Arc::clone(&store),
            Arc::clone(&registry),
            Arc::new(PlaintextCredentials),
            config.auth_latency(),
        );
        let ledger = MoodLedger::new(Arc::clone(&store));

        // Restore persisted state once, up front
        session.load_session();
        ledger.load_mood_data();

        Ok(Self {
            config,
            store,
            registry,
            session,
            ledger,
        })
    }
}

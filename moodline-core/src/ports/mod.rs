//! Port definitions (hexagonal architecture)
//!
//! Ports define the interfaces for external dependencies. The core domain
//! depends only on these traits, not on concrete implementations.

pub mod credentials;
pub mod store;

pub use credentials::{CredentialScheme, PlaintextCredentials};
pub use store::KvStore;

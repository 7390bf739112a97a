//! Credential scheme port - secret handling seam

/// Turns raw passwords into stored secrets and checks attempts against them
///
/// Session code never touches secrets directly, so a hashing scheme can be
/// swapped in without changing any call site.
pub trait CredentialScheme: Send + Sync {
    /// Produce the stored form of a raw password
    fn protect(&self, raw: &str) -> String;
    /// Check a raw password against a stored secret
    fn verify(&self, raw: &str, stored: &str) -> bool;
}

/// Secrets stored as given and compared byte for byte
pub struct PlaintextCredentials;

impl CredentialScheme for PlaintextCredentials {
    fn protect(&self, raw: &str) -> String {
        raw.to_string()
    }

    fn verify(&self, raw: &str, stored: &str) -> bool {
        raw == stored
    }
}

use std::collections::BTreeMap;

use crate::error::LedgerError;

/// Key of the global index blob: a JSON array of twin ID strings.
pub const INDEX_KEY: &str = "twin_keys";

/// Key of a single twin's record blob.
pub fn twin_key(id: &str) -> String {
    format!("twin_{id}")
}

/// The ledger's key-value interface as the contract exposes it.
///
/// Writes are last-writer-wins; the ledger provides no read-modify-write
/// coordination, so concurrent index updates can silently drop an entry.
pub trait Ledger {
    fn is_available(&self) -> bool;

    fn get_data(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError>;

    fn set_data(&mut self, key: &str, value: Vec<u8>) -> Result<(), LedgerError>;
}

/// In-memory ledger for tests and local development.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    entries: BTreeMap<String, Vec<u8>>,
    available: bool,
    /// When set, the next write fails with the given error.
    fail_next_write: Option<LedgerError>,
    /// When set, the next write to this exact key fails with the given error.
    fail_key: Option<(String, LedgerError)>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            available: true,
            fail_next_write: None,
            fail_key: None,
        }
    }

    /// A ledger that reports itself unavailable.
    pub fn offline() -> Self {
        Self {
            available: false,
            ..Self::new()
        }
    }

    /// Seed a raw blob, bypassing the trait (for corrupt-data tests).
    pub fn seed(&mut self, key: &str, value: &[u8]) {
        self.entries.insert(key.to_string(), value.to_vec());
    }

    /// Make the next `set_data` call fail with `err`.
    pub fn fail_next_write(&mut self, err: LedgerError) {
        self.fail_next_write = Some(err);
    }

    /// Make the next `set_data` call targeting `key` fail with `err`.
    /// Writes to other keys are unaffected.
    pub fn fail_writes_to(&mut self, key: &str, err: LedgerError) {
        self.fail_key = Some((key.to_string(), err));
    }

    pub fn raw(&self, key: &str) -> Option<&[u8]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    pub fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }
}

impl Ledger for InMemoryLedger {
    fn is_available(&self) -> bool {
        self.available
    }

    fn get_data(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError> {
        if !self.available {
            return Err(LedgerError::Unavailable);
        }
        Ok(self.entries.get(key).cloned())
    }

    fn set_data(&mut self, key: &str, value: Vec<u8>) -> Result<(), LedgerError> {
        if !self.available {
            return Err(LedgerError::Unavailable);
        }
        if let Some(err) = self.fail_next_write.take() {
            return Err(err);
        }
        if self.fail_key.as_ref().is_some_and(|(k, _)| k == key) {
            if let Some((_, err)) = self.fail_key.take() {
                return Err(err);
            }
        }
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}

//! Storage collaborators for credential records.
//!
//! The verifier never owns account state. Callers inject a [`CredentialLookup`]
//! (and a [`CredentialStore`] when enrolling) so the user list is an explicit
//! dependency rather than process-wide state.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::credentials::CredentialError;
use crate::record::{CredentialRecord, StoredCredential};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("identifier already enrolled: {0}")]
    Duplicate(String),
    #[error("store unreadable: {0}")]
    Io(String),
    #[error("store parse failed: {0}")]
    Parse(String),
    #[error("stored credential rejected: {0}")]
    Record(#[from] CredentialError),
}

/// Read access to enrolled credentials.
pub trait CredentialLookup {
    fn find_by_identifier(&self, identifier: &str) -> Result<Option<CredentialRecord>, StoreError>;
}

/// Write access to enrolled credentials. Inserting an identifier that is
/// already present fails with [`StoreError::Duplicate`].
pub trait CredentialStore: CredentialLookup {
    fn insert(&mut self, record: CredentialRecord) -> Result<(), StoreError>;
}

/// In-process store keyed by identifier.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: HashMap<String, CredentialRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl CredentialLookup for MemoryStore {
    fn find_by_identifier(&self, identifier: &str) -> Result<Option<CredentialRecord>, StoreError> {
        Ok(self.records.get(identifier).cloned())
    }
}

impl CredentialStore for MemoryStore {
    fn insert(&mut self, record: CredentialRecord) -> Result<(), StoreError> {
        match self.records.entry(record.identifier().to_owned()) {
            Entry::Occupied(entry) => Err(StoreError::Duplicate(entry.key().clone())),
            Entry::Vacant(entry) => {
                entry.insert(record);
                Ok(())
            }
        }
    }
}

/// JSON file holding an array of `{"identifier", "password"}` objects.
/// Entries are parsed into records only when looked up, so one corrupt entry
/// does not block the rest of the file.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: Vec<StoredCredential>,
}

impl JsonFileStore {
    /// Opens the store at `path`. A missing or empty file is an empty store.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let entries = match fs::read_to_string(&path) {
            Ok(raw) if raw.trim().is_empty() => Vec::new(),
            Ok(raw) => serde_json::from_str(&raw).map_err(|e| StoreError::Parse(format!("{e}")))?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(StoreError::Io(format!("{e}"))),
        };
        debug!(path = %path.display(), "opened credential store");
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn persist(&self) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(&self.entries).map_err(|e| StoreError::Parse(format!("{e}")))?;
        fs::write(&self.path, json).map_err(|e| StoreError::Io(format!("{e}")))
    }
}

impl CredentialLookup for JsonFileStore {
    fn find_by_identifier(&self, identifier: &str) -> Result<Option<CredentialRecord>, StoreError> {
        self.entries
            .iter()
            .find(|entry| entry.identifier == identifier)
            .map(|entry| CredentialRecord::try_from(entry.clone()).map_err(StoreError::from))
            .transpose()
    }
}

impl CredentialStore for JsonFileStore {
    fn insert(&mut self, record: CredentialRecord) -> Result<(), StoreError> {
        if self.entries.iter().any(|entry| entry.identifier == record.identifier()) {
            return Err(StoreError::Duplicate(record.identifier().to_owned()));
        }
        self.entries.push(StoredCredential::from(&record));
        if let Err(err) = self.persist() {
            self.entries.pop();
            return Err(err);
        }
        Ok(())
    }
}

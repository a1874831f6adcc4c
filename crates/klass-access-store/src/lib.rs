#![warn(missing_docs)]
//! # klass-access-store
//!
//! ## Purpose
//! Persists the remembered user profile (one email string) across app
//! launches for `klass-access`.
//!
//! ## Responsibilities
//! - Define a backend-agnostic profile store trait.
//! - Provide a JSON-file store for desktop hosts.
//! - Provide a deterministic in-memory store for CI and unit tests.
//!
//! ## Data flow
//! Controller startup reads the record to pre-fill the email field; a
//! successful login submit writes or clears it depending on the remember-me
//! flag.
//!
//! ## Ownership and lifetimes
//! Records are owned values; stores hand out copies so controllers never
//! borrow store internals.
//!
//! ## Error model
//! Backing failures surface as [`StoreError`], but absence of a record is
//! `Ok(None)`, never an error. Callers are expected to treat every store
//! failure as non-fatal and fall back to defaults.
//!
//! ## Security and privacy notes
//! Only the email string is persisted. Passwords, keys, and sessions never
//! reach this crate.

use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical schema tag for v1 profile records.
pub const PROFILE_SCHEMA_VERSION_V1: &str = "v1";

/// Versioned persisted profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRecord {
    /// Record schema version for forward compatibility.
    pub schema_version: String,
    /// Remembered email, when the user opted in.
    pub remembered_email: Option<String>,
}

impl ProfileRecord {
    /// Creates a v1 record remembering `email`.
    pub fn with_email(email: impl Into<String>) -> Self {
        Self {
            schema_version: PROFILE_SCHEMA_VERSION_V1.to_string(),
            remembered_email: Some(email.into()),
        }
    }
}

/// Trait implemented by concrete profile persistence providers.
pub trait ProfileStore: Send + Sync {
    /// Loads the stored record.
    ///
    /// # Errors
    /// Returns [`StoreError`] on backing failures; a missing record is
    /// `Ok(None)`.
    fn load(&self) -> Result<Option<ProfileRecord>, StoreError>;

    /// Writes the record, replacing any previous one.
    ///
    /// # Errors
    /// Returns [`StoreError`] on backing failures.
    fn save(&self, record: &ProfileRecord) -> Result<(), StoreError>;

    /// Removes any stored record.
    ///
    /// # Errors
    /// Returns [`StoreError`] on backing failures; clearing an absent
    /// record succeeds.
    fn clear(&self) -> Result<(), StoreError>;
}

/// JSON-file profile store for desktop hosts.
#[derive(Debug, Clone)]
pub struct FileProfileStore {
    path: PathBuf,
}

impl FileProfileStore {
    /// Creates a store backed by the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl ProfileStore for FileProfileStore {
    fn load(&self) -> Result<Option<ProfileRecord>, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(StoreError::Io(error)),
        };

        let record: ProfileRecord = serde_json::from_str(&raw)?;
        if record.schema_version != PROFILE_SCHEMA_VERSION_V1 {
            return Err(StoreError::UnsupportedSchema(record.schema_version));
        }

        Ok(Some(record))
    }

    fn save(&self, record: &ProfileRecord) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let raw = serde_json::to_vec(record)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(StoreError::Io(error)),
        }
    }
}

/// In-memory profile store for tests and hosts without durable storage.
#[derive(Debug, Default)]
pub struct MemoryProfileStore {
    record: Mutex<Option<ProfileRecord>>,
}

impl MemoryProfileStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with a record.
    pub fn with_record(record: ProfileRecord) -> Self {
        Self {
            record: Mutex::new(Some(record)),
        }
    }
}

impl ProfileStore for MemoryProfileStore {
    fn load(&self) -> Result<Option<ProfileRecord>, StoreError> {
        let record = self
            .record
            .lock()
            .map_err(|_| StoreError::Backend("profile store lock poisoned".to_string()))?;
        Ok(record.clone())
    }

    fn save(&self, record: &ProfileRecord) -> Result<(), StoreError> {
        let mut slot = self
            .record
            .lock()
            .map_err(|_| StoreError::Backend("profile store lock poisoned".to_string()))?;
        *slot = Some(record.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        let mut slot = self
            .record
            .lock()
            .map_err(|_| StoreError::Backend("profile store lock poisoned".to_string()))?;
        *slot = None;
        Ok(())
    }
}

/// Profile persistence error type.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem failure other than absence.
    #[error("profile store io failure: {0}")]
    Io(#[from] io::Error),
    /// Record encoding/decoding failure.
    #[error("profile record codec failure: {0}")]
    Codec(#[from] serde_json::Error),
    /// Record carries a schema version this build does not understand.
    #[error("unsupported profile schema version: {0}")]
    UnsupportedSchema(String),
    /// Store backend runtime failure.
    #[error("profile store backend failure: {0}")]
    Backend(String),
}

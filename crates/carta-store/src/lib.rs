#![forbid(unsafe_code)]
//! Sole reader/writer of the canonical catalog document.
//!
//! The document is one pretty-printed JSON file at a fixed path.
//! `replace` overwrites it in full through a same-directory temp file and
//! a rename, so a concurrent `load` never observes a torn write and a
//! failed replace leaves the prior document intact. There is no locking
//! or versioning: a replace from a stale working copy wins in full.

use carta_model::Catalog;
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};

pub const CRATE_NAME: &str = "carta-store";

#[derive(Debug)]
pub enum StoreError {
    /// The durable medium could not be read or written.
    Unavailable(String),
    /// The document exists but does not deserialize.
    Corrupt(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(msg) => write!(f, "storage unavailable: {msg}"),
            Self::Corrupt(msg) => write!(f, "corrupt catalog document: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}

pub trait CatalogStore: Send + Sync {
    fn load(&self) -> Result<Catalog, StoreError>;
    fn replace(&self, catalog: &Catalog) -> Result<(), StoreError>;
}

pub struct LocalFsStore {
    path: PathBuf,
}

impl LocalFsStore {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map_or_else(|| "menu.json".into(), std::ffi::OsStr::to_os_string);
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl CatalogStore for LocalFsStore {
    fn load(&self) -> Result<Catalog, StoreError> {
        let raw = fs::read_to_string(&self.path)
            .map_err(|e| StoreError::Unavailable(format!("read {}: {e}", self.path.display())))?;
        serde_json::from_str(&raw)
            .map_err(|e| StoreError::Corrupt(format!("parse {}: {e}", self.path.display())))
    }

    fn replace(&self, catalog: &Catalog) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(catalog)
            .map_err(|e| StoreError::Unavailable(format!("serialize catalog: {e}")))?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    StoreError::Unavailable(format!("create {}: {e}", parent.display()))
                })?;
            }
        }
        let tmp = self.tmp_path();
        fs::write(&tmp, &bytes)
            .map_err(|e| StoreError::Unavailable(format!("write {}: {e}", tmp.display())))?;
        fs::rename(&tmp, &self.path)
            .map_err(|e| StoreError::Unavailable(format!("rename {}: {e}", self.path.display())))
    }
}

// SPDX-License-Identifier: Apache-2.0

use carta_model::Catalog;
use carta_store::{CatalogStore, StoreError};
use std::fmt::{Display, Formatter};
use std::sync::Arc;

#[derive(Debug)]
pub enum SaveError {
    /// Credential did not match the configured secret; nothing was written.
    Unauthorized,
    Store(StoreError),
}

impl Display for SaveError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unauthorized => f.write_str("invalid password"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for SaveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Unauthorized => None,
            Self::Store(err) => Some(err),
        }
    }
}

/// The only write path to the canonical document: exact-match credential
/// check, then a full atomic replace. All-or-nothing; there is no
/// per-item granularity.
#[derive(Clone)]
pub struct SaveCoordinator {
    store: Arc<dyn CatalogStore>,
    secret: Arc<str>,
}

impl SaveCoordinator {
    #[must_use]
    pub fn new(store: Arc<dyn CatalogStore>, secret: String) -> Self {
        Self {
            store,
            secret: secret.into(),
        }
    }

    pub fn commit(&self, credential: &str, catalog: &Catalog) -> Result<(), SaveError> {
        if credential != self.secret.as_ref() {
            return Err(SaveError::Unauthorized);
        }
        self.store.replace(catalog).map_err(SaveError::Store)
    }
}

// SPDX-License-Identifier: Apache-2.0

use carta_model::Catalog;
use carta_store::{CatalogStore, StoreError};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;

/// In-memory store double for endpoint tests: seed a catalog, flip the
/// failure switches, count replace calls.
#[derive(Debug, Default)]
pub struct FakeStore {
    catalog: Mutex<Catalog>,
    pub fail_load: AtomicBool,
    pub fail_replace: AtomicBool,
    pub replace_calls: AtomicU64,
}

impl FakeStore {
    #[must_use]
    pub fn with_catalog(catalog: Catalog) -> Self {
        Self {
            catalog: Mutex::new(catalog),
            ..Self::default()
        }
    }

    pub fn snapshot(&self) -> Result<Catalog, StoreError> {
        let guard = self
            .catalog
            .lock()
            .map_err(|_| StoreError::Unavailable("store lock poisoned".to_string()))?;
        Ok(guard.clone())
    }
}

impl CatalogStore for FakeStore {
    fn load(&self) -> Result<Catalog, StoreError> {
        if self.fail_load.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("injected load failure".to_string()));
        }
        self.snapshot()
    }

    fn replace(&self, catalog: &Catalog) -> Result<(), StoreError> {
        if self.fail_replace.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(
                "injected replace failure".to_string(),
            ));
        }
        let mut guard = self
            .catalog
            .lock()
            .map_err(|_| StoreError::Unavailable("store lock poisoned".to_string()))?;
        *guard = catalog.clone();
        self.replace_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

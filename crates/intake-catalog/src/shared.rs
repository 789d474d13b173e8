//! Shared read-only catalog handle.
//!
//! The catalog is loaded once and read concurrently for the life of the
//! process. A reload replaces the whole structure atomically; readers hold
//! the snapshot they started with.

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use anyhow::Result;

use crate::catalog::{FieldCatalog, load_field_catalog};

/// A process-wide handle to the current catalog snapshot.
#[derive(Debug)]
pub struct SharedCatalog {
    source: PathBuf,
    current: RwLock<Arc<FieldCatalog>>,
}

impl SharedCatalog {
    /// Load the catalog from `source` and wrap it in a shared handle.
    pub fn load(source: &Path) -> Result<Self> {
        let catalog = load_field_catalog(source)?;
        Ok(Self {
            source: source.to_path_buf(),
            current: RwLock::new(Arc::new(catalog)),
        })
    }

    /// The current snapshot. Cheap to clone; stays valid across reloads.
    pub fn get(&self) -> Arc<FieldCatalog> {
        self.current
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Re-read the source and swap the snapshot in one step. On failure the
    /// previous snapshot stays in place.
    pub fn reload(&self) -> Result<Arc<FieldCatalog>> {
        let fresh = Arc::new(load_field_catalog(&self.source)?);
        let mut guard = self
            .current
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = fresh.clone();
        Ok(fresh)
    }
}

//! Cached currency directory
//!
//! Wraps the repository's currencies table behind the CurrencyDirectory
//! port. The snapshot is held as an `Arc` behind a mutex and swapped
//! whole on refresh: a reader either sees the previous snapshot or the
//! new one, never a half-updated mapping. Readers keep their `Arc` for as
//! long as they need it regardless of later refreshes.

use std::sync::{Arc, Mutex};

use crate::adapters::duckdb::DuckDbRepository;
use crate::domain::currency::CurrencySnapshot;
use crate::domain::result::{Error, Result};
use crate::ports::CurrencyDirectory;

pub struct CachedCurrencyDirectory {
    repository: Arc<DuckDbRepository>,
    snapshot: Mutex<Option<Arc<CurrencySnapshot>>>,
}

impl CachedCurrencyDirectory {
    pub fn new(repository: Arc<DuckDbRepository>) -> Self {
        Self {
            repository,
            snapshot: Mutex::new(None),
        }
    }

    fn load(&self) -> Result<Arc<CurrencySnapshot>> {
        let entries = self
            .repository
            .get_currencies()
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(Arc::new(CurrencySnapshot::new(entries)))
    }
}

impl CurrencyDirectory for CachedCurrencyDirectory {
    fn snapshot(&self) -> Result<Arc<CurrencySnapshot>> {
        let mut guard = self.snapshot.lock().unwrap();
        if let Some(snap) = guard.as_ref() {
            return Ok(Arc::clone(snap));
        }
        // First access loads lazily; afterwards only refresh() reloads
        let snap = self.load()?;
        *guard = Some(Arc::clone(&snap));
        Ok(snap)
    }

    fn refresh(&self) -> Result<usize> {
        let snap = self.load()?;
        let len = snap.len();
        *self.snapshot.lock().unwrap() = Some(snap);
        Ok(len)
    }
}

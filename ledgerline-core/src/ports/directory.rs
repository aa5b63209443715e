//! Currency directory port
//!
//! The directory is shared, read-only, process-wide state: an external
//! refresh job repopulates it, and every reader receives a complete,
//! atomically swapped snapshot. The aggregator takes a fresh snapshot at
//! the start of each call and never reaches for ambient global state.

use std::sync::Arc;

use crate::domain::currency::CurrencySnapshot;
use crate::domain::result::Result;

/// Access to the id-to-code currency directory
pub trait CurrencyDirectory: Send + Sync {
    /// Current snapshot of the directory
    ///
    /// Cheap to call; concurrent readers may hold snapshots from before
    /// and after a refresh simultaneously - each one is self-consistent.
    fn snapshot(&self) -> Result<Arc<CurrencySnapshot>>;

    /// Reload the directory from its backing store
    ///
    /// Returns the number of entries in the new snapshot.
    fn refresh(&self) -> Result<usize>;
}

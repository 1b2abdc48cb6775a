//! Storage abstraction for contest entries.
//!
//! The demo runs on [`MemoryStore`]; [`SqliteStore`] fills the
//! durability gap for deployments that must survive a restart. The
//! settlement algorithm only sees this trait.

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::error::StoreError;
use crate::state::VideoEntry;

/// Ledger of record for registered videos, keyed by `video_id`.
///
/// `for_each_ordered` visits entries in registration order; that order
/// is the tie-break used by standings and settlement, so every backend
/// must preserve it across updates.
pub trait VideoStore: Send {
    fn get(&self, video_id: &str) -> Result<Option<VideoEntry>, StoreError>;

    /// Insert a new entry or replace the counters of an existing one.
    /// Replacing must not disturb the entry's registration-order
    /// position.
    fn put(&mut self, entry: VideoEntry) -> Result<(), StoreError>;

    fn for_each_ordered(&self, f: &mut dyn FnMut(&VideoEntry)) -> Result<(), StoreError>;

    fn len(&self) -> Result<usize, StoreError>;

    fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }

    /// Drop every entry. Epoch reset.
    fn clear(&mut self) -> Result<(), StoreError>;
}

use std::collections::HashMap;

use crate::error::StoreError;
use crate::state::VideoEntry;

use super::VideoStore;

/// In-memory store, lost on restart. Faithful to the demo deployment.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, VideoEntry>,
    /// Registration order of the keys in `entries`.
    order: Vec<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl VideoStore for MemoryStore {
    fn get(&self, video_id: &str) -> Result<Option<VideoEntry>, StoreError> {
        Ok(self.entries.get(video_id).cloned())
    }

    fn put(&mut self, entry: VideoEntry) -> Result<(), StoreError> {
        if !self.entries.contains_key(&entry.video_id) {
            self.order.push(entry.video_id.clone());
        }
        self.entries.insert(entry.video_id.clone(), entry);
        Ok(())
    }

    fn for_each_ordered(&self, f: &mut dyn FnMut(&VideoEntry)) -> Result<(), StoreError> {
        for video_id in &self.order {
            if let Some(entry) = self.entries.get(video_id) {
                f(entry);
            }
        }
        Ok(())
    }

    fn len(&self) -> Result<usize, StoreError> {
        Ok(self.entries.len())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.entries.clear();
        self.order.clear();
        Ok(())
    }
}

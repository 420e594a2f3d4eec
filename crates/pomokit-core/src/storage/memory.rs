use std::collections::HashMap;

use super::{DocKey, Store};
use crate::error::StoreError;

/// In-process store. Nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    docs: HashMap<DocKey, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
}

impl Store for MemoryStore {
    fn read(&self, key: DocKey) -> Result<Option<String>, StoreError> {
        Ok(self.docs.get(&key).cloned())
    }

    fn write(&mut self, key: DocKey, json: &str) -> Result<(), StoreError> {
        self.docs.insert(key, json.to_string());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.docs.clear();
        Ok(())
    }
}

use super::{KeyValueStore, KvResult};
use std::collections::HashMap;

/// Process-local store; contents vanish with the value.
#[derive(Debug, Clone, Default)]
pub struct InMemoryKeyValueStore {
    slots: HashMap<(String, String), String>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn get(&self, namespace: &str, key: &str) -> KvResult<Option<String>> {
        Ok(self
            .slots
            .get(&(namespace.to_string(), key.to_string()))
            .cloned())
    }

    fn put(&mut self, namespace: &str, key: &str, value: &str) -> KvResult<()> {
        self.slots
            .insert((namespace.to_string(), key.to_string()), value.to_string());
        Ok(())
    }

    fn remove(&mut self, namespace: &str, key: &str) -> KvResult<()> {
        self.slots.remove(&(namespace.to_string(), key.to_string()));
        Ok(())
    }
}

use std::collections::HashMap;

use anyhow::Result;

use super::KeyValueStore;

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.entries.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let mut store = MemoryStore::new();
        assert!(store.get("userToken").is_none());

        store.set("userToken", "a.b.c").unwrap();
        assert_eq!(store.get("userToken").as_deref(), Some("a.b.c"));

        store.set("userToken", "d.e.f").unwrap();
        assert_eq!(store.get("userToken").as_deref(), Some("d.e.f"));
        assert_eq!(store.len(), 1);

        store.remove("userToken").unwrap();
        assert!(store.is_empty());

        // Removing a missing key is not an error
        store.remove("userToken").unwrap();
    }

    #[test]
    fn test_clear() {
        let mut store = MemoryStore::new();
        store.set("one", "1").unwrap();
        store.set("two", "2").unwrap();
        store.clear().unwrap();
        assert!(store.is_empty());
    }
}

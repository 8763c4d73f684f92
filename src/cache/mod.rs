//! Bounded in-memory cache keyed by string.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use serde::de::DeserializeOwned;
use serde::Serialize;

pub const DEFAULT_CAPACITY: usize = 100;

struct Entries {
    values: HashMap<String, Vec<u8>>,
    // Front is least recently used.
    order: VecDeque<String>,
}

impl Entries {
    fn touch(&mut self, key: &str) {
        if let Some(pos) = self.order.iter().position(|k| k == key) {
            if let Some(k) = self.order.remove(pos) {
                self.order.push_back(k);
            }
        }
    }

    fn forget(&mut self, key: &str) {
        self.values.remove(key);
        self.order.retain(|k| k != key);
    }
}

pub struct MemoryCache {
    capacity: usize,
    entries: Mutex<Entries>,
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl MemoryCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: Mutex::new(Entries {
                values: HashMap::new(),
                order: VecDeque::new(),
            }),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn set(&self, key: &str, value: Vec<u8>) {
        let Ok(mut entries) = self.entries.lock() else {
            return;
        };

        if entries.values.insert(key.to_string(), value).is_some() {
            entries.touch(key);
            return;
        }

        entries.order.push_back(key.to_string());
        while entries.values.len() > self.capacity {
            match entries.order.pop_front() {
                Some(oldest) => {
                    tracing::debug!("Evicting cache entry {}", oldest);
                    entries.values.remove(&oldest);
                }
                None => break,
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        let mut entries = self.entries.lock().ok()?;
        let value = entries.values.get(key).cloned()?;
        entries.touch(key);
        Some(value)
    }

    pub fn remove(&self, key: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.forget(key);
        }
    }

    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.values.clear();
            entries.order.clear();
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.values.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Store `value` as JSON. Values that fail to serialize are not cached.
    pub fn set_object<T: Serialize>(&self, key: &str, value: &T) {
        match serde_json::to_vec(value) {
            Ok(data) => self.set(key, data),
            Err(e) => tracing::warn!("Not caching {}: {}", key, e),
        }
    }

    /// Fetch and decode a JSON value; undecodable entries read as a miss.
    pub fn get_object<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let data = self.get(key)?;
        serde_json::from_slice(&data).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserDto;

    #[test]
    fn test_set_get_remove() {
        let cache = MemoryCache::new(4);
        cache.set("a", b"1".to_vec());
        assert_eq!(cache.get("a"), Some(b"1".to_vec()));

        cache.remove("a");
        assert_eq!(cache.get("a"), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_evicts_least_recently_used() {
        let cache = MemoryCache::new(2);
        cache.set("a", b"1".to_vec());
        cache.set("b", b"2".to_vec());
        cache.get("a");
        cache.set("c", b"3".to_vec());

        assert_eq!(cache.len(), 2);
        assert!(cache.get("a").is_some());
        assert!(cache.get("b").is_none());
        assert!(cache.get("c").is_some());
    }

    #[test]
    fn test_overwrite_does_not_grow() {
        let cache = MemoryCache::new(2);
        cache.set("a", b"1".to_vec());
        cache.set("a", b"2".to_vec());
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("a"), Some(b"2".to_vec()));
    }

    #[test]
    fn test_clear() {
        let cache = MemoryCache::default();
        cache.set("a", b"1".to_vec());
        cache.set("b", b"2".to_vec());
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.capacity(), DEFAULT_CAPACITY);
    }

    #[test]
    fn test_objects() {
        let cache = MemoryCache::default();
        let user = UserDto {
            id: 1,
            name: "Neo".into(),
            profile_picture_url: "https://i.pravatar.cc/300?u=1".into(),
        };
        cache.set_object("user", &user);
        assert_eq!(cache.get_object::<UserDto>("user"), Some(user));

        cache.set("raw", b"not json".to_vec());
        assert_eq!(cache.get_object::<UserDto>("raw"), None);
    }
}

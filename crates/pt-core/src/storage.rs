//! The key-value collaborator the store persists through.

use std::collections::HashMap;
use std::convert::Infallible;

/// Synchronous string key-value storage.
///
/// The store reads once at startup and writes after every change; it never
/// propagates these errors, only logs them.
pub trait KeyValueStore {
    type Error: std::error::Error + Send + Sync + 'static;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), Self::Error>;

    fn remove(&mut self, key: &str) -> Result<(), Self::Error>;
}

/// In-memory storage, mostly for tests and throwaway sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-populated with one value.
    pub fn with_value(key: &str, value: impl Into<String>) -> Self {
        let mut store = Self::new();
        store.values.insert(key.to_string(), value.into());
        store
    }
}

impl KeyValueStore for MemoryStore {
    type Error = Infallible;

    fn get(&self, key: &str) -> Result<Option<String>, Infallible> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Infallible> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), Infallible> {
        self.values.remove(key);
        Ok(())
    }
}

impl<S: KeyValueStore> KeyValueStore for &mut S {
    type Error = S::Error;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Self::Error> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), Self::Error> {
        (**self).remove(key)
    }
}

//! Persistent key-value storage used for session data.
//!
//! This module provides:
//! - `KeyValueStore`: The storage capability passed to the session checker
//!   and the login/logout actions
//! - `MemoryStore`: In-process store, used in tests and for throwaway sessions
//! - `FileStore`: JSON file store that survives restarts
//!
//! The session token always lives under [`TOKEN_KEY`].

pub mod file;
pub mod memory;

use anyhow::Result;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Storage key holding the session token issued by the login endpoint.
pub const TOKEN_KEY: &str = "userToken";

/// String key-value storage.
///
/// Reads never fail: a store that cannot be read behaves as if the key is
/// absent. Mutations may fail for stores backed by a file.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    fn remove(&mut self, key: &str) -> Result<()>;

    /// Remove every key.
    fn clear(&mut self) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        (**self).remove(key)
    }

    fn clear(&mut self) -> Result<()> {
        (**self).clear()
    }
}

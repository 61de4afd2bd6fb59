//! # Storage Layer
//!
//! The dashboard keeps everything (students, session, preferences) in a flat string
//! key-value store, the same shape as browser `localStorage`. The [`KeyValueStore`] trait is
//! that boundary; nothing above this module touches files directly.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: Production storage
//!   - All keys live in a single `storage.json` object
//!   - Writes go through a temp file and a rename
//!
//! - [`memory::InMemoryStore`]: In-memory storage for testing
//!   - No persistence
//!   - Counts writes so tests can assert "no storage write occurred"
//!
//! ## Keys
//!
//! ```text
//! classdesk.students    JSON array of student records
//! classdesk.user        JSON object for the logged-in user
//! dashboard.compact     "true" | "false"
//! dashboard.theme       "light" | "dark"
//! ```

use crate::error::Result;

pub mod fs;
pub mod memory;

pub const STUDENTS_KEY: &str = "classdesk.students";
pub const USER_KEY: &str = "classdesk.user";
pub const COMPACT_KEY: &str = "dashboard.compact";
pub const THEME_KEY: &str = "dashboard.theme";

/// Abstract interface for durable string storage.
///
/// Values are opaque strings; callers own serialization.
pub trait KeyValueStore {
    /// Read the value stored under `key`, if any
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

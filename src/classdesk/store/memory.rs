use super::KeyValueStore;
use crate::error::Result;
use std::collections::HashMap;

/// In-memory storage for testing and development.
/// Does NOT persist data.
#[derive(Debug, Default, Clone)]
pub struct InMemoryStore {
    entries: HashMap<String, String>,
    writes: usize,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `set`/`remove` calls that reached the store.
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.writes += 1;
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.writes += 1;
        self.entries.remove(key);
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::{StudentRecord, UserSession};
    use crate::store::{COMPACT_KEY, STUDENTS_KEY, THEME_KEY, USER_KEY};

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        /// Seeds the student blob with the given `(id, name, email, attendance)` rows.
        pub fn with_students(mut self, rows: &[(&str, &str, &str, i64)]) -> Self {
            let records: Vec<StudentRecord> = rows
                .iter()
                .map(|(id, name, email, attendance)| StudentRecord {
                    id: id.to_string(),
                    name: name.to_string(),
                    email: email.to_string(),
                    attendance: *attendance,
                })
                .collect();
            let blob = serde_json::to_string(&records).unwrap();
            self.store.set(STUDENTS_KEY, &blob).unwrap();
            self
        }

        pub fn with_raw_students(mut self, blob: &str) -> Self {
            self.store.set(STUDENTS_KEY, blob).unwrap();
            self
        }

        pub fn with_user(mut self, name: &str, email: &str) -> Self {
            let user = UserSession {
                name: name.to_string(),
                email: email.to_string(),
            };
            let blob = serde_json::to_string(&user).unwrap();
            self.store.set(USER_KEY, &blob).unwrap();
            self
        }

        pub fn with_compact(mut self, compact: bool) -> Self {
            let value = if compact { "true" } else { "false" };
            self.store.set(COMPACT_KEY, value).unwrap();
            self
        }

        pub fn with_theme(mut self, theme: &str) -> Self {
            self.store.set(THEME_KEY, theme).unwrap();
            self
        }

        /// Returns the store with its write counter reset, so tests only see their own writes.
        pub fn build(self) -> InMemoryStore {
            InMemoryStore {
                entries: self.store.entries,
                writes: 0,
            }
        }
    }
}

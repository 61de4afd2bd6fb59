//! # Student Directory
//!
//! The directory owns the ordered list of [`StudentRecord`]s, mirrors it to the
//! [`KeyValueStore`] as one JSON blob, and keeps a filtered view for the active search term.
//!
//! ## Lifecycle
//!
//! - [`StudentDirectory::load`] reads the blob once. A missing or unparsable blob is replaced
//!   by [`default_students`] and written back immediately; the caller learns which happened
//!   through [`LoadOutcome`].
//! - Every successful create/update/delete rewrites the whole blob (exactly one `set`) and
//!   recomputes the view. Failed operations never touch the store.
//!
//! ## Identifiers
//!
//! Ids are zero-padded decimals (`"001"`). A new id is one more than the largest numeric id
//! present, so an id is never reissued while its record exists. Non-numeric ids are ignored
//! by the generator.
//!
//! ## View listeners
//!
//! A rendering layer can [`subscribe`](StudentDirectory::subscribe) to receive the view after
//! every recompute instead of polling [`view`](StudentDirectory::view).

use crate::error::{ClassdeskError, Result};
use crate::model::{default_students, StudentInput, StudentRecord};
use crate::store::{KeyValueStore, STUDENTS_KEY};
use crate::validate;

const ID_WIDTH: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecoveryReason {
    /// Nothing was stored yet
    Missing,
    /// The stored blob could not be parsed; it has been overwritten
    Corrupt(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded,
    Recovered(RecoveryReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted(StudentRecord),
    Cancelled,
}

pub type ViewListener = Box<dyn FnMut(&[StudentRecord])>;

pub struct StudentDirectory<S: KeyValueStore> {
    store: S,
    records: Vec<StudentRecord>,
    term: String,
    view: Vec<StudentRecord>,
    listeners: Vec<ViewListener>,
}

/// Records whose id, name or email contains `term`, case-insensitively, in directory order.
pub fn filter_records(records: &[StudentRecord], term: &str) -> Vec<StudentRecord> {
    if term.is_empty() {
        return records.to_vec();
    }
    let needle = term.to_lowercase();
    records
        .iter()
        .filter(|r| r.matches(&needle))
        .cloned()
        .collect()
}

/// One past the largest numeric id, zero-padded.
///
/// Ids are compared and incremented as decimal strings, so any length of id stays ordered.
pub fn next_id(records: &[StudentRecord]) -> String {
    let max = records
        .iter()
        .filter_map(|r| numeric_digits(&r.id))
        .max_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)))
        .unwrap_or("0");
    format!("{:0>width$}", increment_decimal(max), width = ID_WIDTH)
}

/// The id's digits without leading zeros, or `None` if it is not a plain decimal.
fn numeric_digits(id: &str) -> Option<&str> {
    let id = id.trim();
    if id.is_empty() || !id.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let digits = id.trim_start_matches('0');
    Some(if digits.is_empty() { "0" } else { digits })
}

fn increment_decimal(digits: &str) -> String {
    let mut out: Vec<char> = digits.chars().collect();
    for c in out.iter_mut().rev() {
        if *c == '9' {
            *c = '0';
        } else {
            *c = ((*c as u8) + 1) as char;
            return out.into_iter().collect();
        }
    }
    out.insert(0, '1');
    out.into_iter().collect()
}

impl<S: KeyValueStore> StudentDirectory<S> {
    pub fn load(mut store: S) -> Result<(Self, LoadOutcome)> {
        let (records, outcome) = match store.get(STUDENTS_KEY)? {
            Some(blob) => match serde_json::from_str::<Vec<StudentRecord>>(&blob) {
                Ok(records) => (records, LoadOutcome::Loaded),
                Err(e) => {
                    tracing::warn!(
                        key = STUDENTS_KEY,
                        error = %e,
                        "stored student list is unreadable, replacing with defaults"
                    );
                    (
                        default_students(),
                        LoadOutcome::Recovered(RecoveryReason::Corrupt(e.to_string())),
                    )
                }
            },
            None => {
                tracing::info!(key = STUDENTS_KEY, "no student list stored, seeding defaults");
                (
                    default_students(),
                    LoadOutcome::Recovered(RecoveryReason::Missing),
                )
            }
        };

        if matches!(outcome, LoadOutcome::Recovered(_)) {
            persist(&mut store, &records)?;
        }

        let view = records.clone();
        let directory = Self {
            store,
            records,
            term: String::new(),
            view,
            listeners: Vec::new(),
        };
        Ok((directory, outcome))
    }

    pub fn records(&self) -> &[StudentRecord] {
        &self.records
    }

    pub fn view(&self) -> &[StudentRecord] {
        &self.view
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn get(&self, id: &str) -> Option<&StudentRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn subscribe(&mut self, listener: ViewListener) {
        self.listeners.push(listener);
    }

    pub fn generate_id(&self) -> String {
        next_id(&self.records)
    }

    pub fn create(&mut self, input: &StudentInput) -> Result<StudentRecord> {
        let fields = validate::student_fields(input)?;
        let record = StudentRecord::new(self.generate_id(), fields);
        let mut next = self.records.clone();
        next.push(record.clone());
        self.commit(next)?;
        tracing::debug!(id = %record.id, "student created");
        Ok(record)
    }

    pub fn update(&mut self, id: &str, input: &StudentInput) -> Result<StudentRecord> {
        let fields = validate::student_fields(input)?;
        let position = self
            .records
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| ClassdeskError::NotFound(id.to_string()))?;
        let mut next = self.records.clone();
        next[position].apply(fields);
        let updated = next[position].clone();
        self.commit(next)?;
        tracing::debug!(id = %updated.id, "student updated");
        Ok(updated)
    }

    /// Removes the record with `id` once `confirm` approves it.
    ///
    /// `confirm` is only called when the record exists.
    pub fn delete<F>(&mut self, id: &str, confirm: F) -> Result<DeleteOutcome>
    where
        F: FnOnce(&StudentRecord) -> bool,
    {
        let position = self
            .records
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| ClassdeskError::NotFound(id.to_string()))?;

        if !confirm(&self.records[position]) {
            tracing::debug!(id, "delete cancelled");
            return Ok(DeleteOutcome::Cancelled);
        }

        let mut next = self.records.clone();
        let removed = next.remove(position);
        self.commit(next)?;
        tracing::debug!(id, "student deleted");
        Ok(DeleteOutcome::Deleted(removed))
    }

    /// Sets the active search term and returns the recomputed view.
    pub fn search(&mut self, term: &str) -> &[StudentRecord] {
        self.term = term.to_string();
        self.refresh_view();
        &self.view
    }

    /// Persists `records` and only then makes them current, so a failed write leaves the
    /// directory as it was.
    fn commit(&mut self, records: Vec<StudentRecord>) -> Result<()> {
        persist(&mut self.store, &records)?;
        self.records = records;
        self.refresh_view();
        Ok(())
    }

    fn refresh_view(&mut self) {
        self.view = filter_records(&self.records, &self.term);
        for listener in self.listeners.iter_mut() {
            listener(&self.view);
        }
    }
}

fn persist<S: KeyValueStore>(store: &mut S, records: &[StudentRecord]) -> Result<()> {
    let blob = serde_json::to_string(records).map_err(ClassdeskError::Serialization)?;
    store.set(STUDENTS_KEY, &blob)
}

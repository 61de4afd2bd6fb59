use serde::{Deserialize, Serialize};

/// One row in the student directory.
///
/// Serialized field names match the stored blob: `id`, `name`, `email`, `attendance`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub id: String,
    pub name: String,
    pub email: String,
    // Percentage; 0-100 expected but never clamped
    pub attendance: i64,
}

impl StudentRecord {
    pub fn new(id: impl Into<String>, fields: StudentFields) -> Self {
        Self {
            id: id.into(),
            name: fields.name,
            email: fields.email,
            attendance: fields.attendance,
        }
    }

    /// Case-insensitive substring match over id, name and email.
    /// `needle` must already be lowercased.
    pub fn matches(&self, needle: &str) -> bool {
        self.id.to_lowercase().contains(needle)
            || self.name.to_lowercase().contains(needle)
            || self.email.to_lowercase().contains(needle)
    }

    pub fn apply(&mut self, fields: StudentFields) {
        self.name = fields.name;
        self.email = fields.email;
        self.attendance = fields.attendance;
    }
}

/// Raw form input for creating or editing a student, as typed by the user.
#[derive(Debug, Clone, Default)]
pub struct StudentInput {
    pub name: String,
    pub email: String,
    pub attendance: String,
}

impl StudentInput {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        attendance: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            attendance: attendance.into(),
        }
    }
}

/// Validated student fields, produced by [`crate::validate::student_fields`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentFields {
    pub name: String,
    pub email: String,
    pub attendance: i64,
}

/// The logged-in user, stored as JSON under the session key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSession {
    pub email: String,
    pub name: String,
}

/// Records the directory is seeded with when storage is empty or unreadable.
pub fn default_students() -> Vec<StudentRecord> {
    [
        ("001", "Jeeva Kumar", "jeeva@example.com", 92),
        ("002", "Ram", "ram@example.com", 85),
        ("003", "Priya Sharma", "priya@example.com", 78),
        ("004", "Arun Das", "arun.das@example.com", 88),
    ]
    .into_iter()
    .map(|(id, name, email, attendance)| StudentRecord {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        attendance,
    })
    .collect()
}

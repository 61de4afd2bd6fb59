use crate::config::ClassdeskConfig;
use crate::directory::{LoadOutcome, RecoveryReason};
use crate::error::{ClassdeskError, Result};
use crate::model::{StudentRecord, UserSession};
use crate::preferences::Preferences;
use crate::session::Page;
use crate::validate::PasswordStrength;
use std::path::PathBuf;

pub mod account;
pub mod config;
pub mod create;
pub mod delete;
pub mod display;
pub mod search;
pub mod update;

#[derive(Debug, Clone)]
pub struct ClassdeskPaths {
    pub data_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_students: Vec<StudentRecord>,
    pub listed_students: Vec<StudentRecord>,
    pub user: Option<UserSession>,
    pub preferences: Option<Preferences>,
    pub strength: Option<PasswordStrength>,
    pub config: Option<ClassdeskConfig>,
    /// Set when the session gate refused the operation
    pub redirect: Option<Page>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_students(mut self, students: Vec<StudentRecord>) -> Self {
        self.affected_students = students;
        self
    }

    pub fn with_listed_students(mut self, students: Vec<StudentRecord>) -> Self {
        self.listed_students = students;
        self
    }

    pub fn with_user(mut self, user: UserSession) -> Self {
        self.user = Some(user);
        self
    }

    pub fn with_preferences(mut self, preferences: Preferences) -> Self {
        self.preferences = Some(preferences);
        self
    }

    pub fn with_config(mut self, config: ClassdeskConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn with_redirect(mut self, page: Page) -> Self {
        self.redirect = Some(page);
        self
    }

    /// True when any message is an error. A gate refusal always carries one.
    pub fn has_errors(&self) -> bool {
        self.messages.iter().any(|m| m.level == MessageLevel::Error)
    }
}

/// Converts user-facing failures into messages; anything else stays an error.
pub(crate) fn recover(err: ClassdeskError) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    match err {
        ClassdeskError::Validation(v) => {
            for message in v.messages() {
                result.add_message(CmdMessage::error(message));
            }
        }
        ClassdeskError::NotFound(id) => {
            result.add_message(CmdMessage::error(format!("No student with id {}", id)));
        }
        other => return Err(other),
    }
    Ok(result)
}

/// Message for a directory that had to be reseeded, if the user should hear about it.
pub fn load_message(outcome: &LoadOutcome) -> Option<CmdMessage> {
    match outcome {
        LoadOutcome::Recovered(RecoveryReason::Corrupt(reason)) => Some(CmdMessage::warning(
            format!(
                "Stored student list was unreadable ({}); restored the default students",
                reason
            ),
        )),
        _ => None,
    }
}

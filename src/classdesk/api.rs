//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the single entry point
//! for every classdesk operation, regardless of the UI being used.
//!
//! ## Role and Responsibilities
//!
//! - **Gates** student operations behind the session, the way the dashboard redirects to
//!   the login page before any directory code runs
//! - **Loads** the student directory from the store for the operations that need it
//! - **Dispatches** to the appropriate command function
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! It does no printing and asks no questions: the delete confirmation is a closure supplied
//! by the caller.
//!
//! ## Generic Over KeyValueStore
//!
//! `ClassdeskApi<S: KeyValueStore>` is generic over the storage backend:
//! - Production: `ClassdeskApi<FileStore>`
//! - Testing: `ClassdeskApi<InMemoryStore>`

use crate::commands::{self, load_message, ClassdeskPaths};
use crate::directory::{LoadOutcome, StudentDirectory};
use crate::error::Result;
use crate::model::{StudentInput, StudentRecord};
use crate::preferences::Theme;
use crate::session::{self, Access, Page};
use crate::store::KeyValueStore;
use crate::validate::SignupForm;

pub struct ClassdeskApi<S: KeyValueStore> {
    store: S,
    paths: ClassdeskPaths,
}

/// Scores a password. Needs no store, so it works before any state is loaded.
pub fn password_strength(password: &str) -> CmdResult {
    commands::account::strength(password)
}

impl<S: KeyValueStore> ClassdeskApi<S> {
    pub fn new(store: S, paths: ClassdeskPaths) -> Self {
        Self { store, paths }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn paths(&self) -> &ClassdeskPaths {
        &self.paths
    }

    /// Loads the directory for a client that keeps it open across several operations.
    /// Callers are expected to have passed the session gate already.
    pub fn open_directory(&mut self) -> Result<(StudentDirectory<&mut S>, LoadOutcome)> {
        StudentDirectory::load(&mut self.store)
    }

    /// `Some` with a refusal when the current session may not see `page`.
    pub fn check_access(&self, page: Page) -> Result<Option<CmdResult>> {
        let user = session::current_user(&self.store)?;
        match session::gate(page, user.as_ref()) {
            Access::Allow => Ok(None),
            Access::Redirect(target) => {
                let mut result = CmdResult::default().with_redirect(target);
                result.add_message(CmdMessage::error(
                    "You must be logged in to manage students",
                ));
                Ok(Some(result))
            }
        }
    }

    pub fn list_students(&mut self) -> Result<CmdResult> {
        self.search_students("")
    }

    pub fn search_students(&mut self, term: &str) -> Result<CmdResult> {
        if let Some(denied) = self.check_access(Page::Students)? {
            return Ok(denied);
        }
        let (mut directory, outcome) = self.open_directory()?;
        let result = commands::search::run(&mut directory, term)?;
        Ok(with_load_message(result, &outcome))
    }

    pub fn create_student(&mut self, input: &StudentInput) -> Result<CmdResult> {
        if let Some(denied) = self.check_access(Page::Students)? {
            return Ok(denied);
        }
        let (mut directory, outcome) = self.open_directory()?;
        let result = commands::create::run(&mut directory, input)?;
        Ok(with_load_message(result, &outcome))
    }

    pub fn update_student(&mut self, id: &str, input: &StudentInput) -> Result<CmdResult> {
        if let Some(denied) = self.check_access(Page::Students)? {
            return Ok(denied);
        }
        let (mut directory, outcome) = self.open_directory()?;
        let result = commands::update::run(&mut directory, id, input)?;
        Ok(with_load_message(result, &outcome))
    }

    pub fn delete_student<F>(&mut self, id: &str, confirm: F) -> Result<CmdResult>
    where
        F: FnOnce(&StudentRecord) -> bool,
    {
        if let Some(denied) = self.check_access(Page::Students)? {
            return Ok(denied);
        }
        let (mut directory, outcome) = self.open_directory()?;
        let result = commands::delete::run(&mut directory, id, confirm)?;
        Ok(with_load_message(result, &outcome))
    }

    pub fn login(&mut self, email: &str, password: &str) -> Result<CmdResult> {
        commands::account::login(&mut self.store, email, password)
    }

    pub fn signup(&mut self, form: &SignupForm) -> Result<CmdResult> {
        commands::account::signup(&mut self.store, form)
    }

    pub fn logout(&mut self) -> Result<CmdResult> {
        commands::account::logout(&mut self.store)
    }

    pub fn whoami(&self) -> Result<CmdResult> {
        commands::account::whoami(&self.store)
    }

    pub fn preferences(&self) -> Result<CmdResult> {
        commands::display::show(&self.store)
    }

    pub fn toggle_compact(&mut self) -> Result<CmdResult> {
        commands::display::toggle_compact(&mut self.store)
    }

    pub fn theme(&mut self, theme: Option<Theme>) -> Result<CmdResult> {
        commands::display::theme(&mut self.store, theme)
    }

    pub fn config(&self, action: ConfigAction) -> Result<CmdResult> {
        commands::config::run(&self.paths, action)
    }
}

fn with_load_message(mut result: CmdResult, outcome: &LoadOutcome) -> CmdResult {
    if let Some(message) = load_message(outcome) {
        result.messages.insert(0, message);
    }
    result
}

pub use crate::commands::config::ConfigAction;
pub use crate::commands::{CmdMessage, CmdResult, MessageLevel};

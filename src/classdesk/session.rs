//! Authentication state.
//!
//! A user is "logged in" when a [`UserSession`] is stored under the session key. There is no
//! credential check beyond form validation; the stored session is a local flag, not proof of
//! identity.

use crate::error::Result;
use crate::model::UserSession;
use crate::store::{KeyValueStore, USER_KEY};
use crate::validate::{self, SignupForm};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Login,
    Signup,
    Students,
    Home,
}

impl Page {
    pub fn is_auth_page(&self) -> bool {
        matches!(self, Page::Login | Page::Signup)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allow,
    Redirect(Page),
}

/// Decides whether `page` may be shown for the given user.
///
/// Auth pages bounce a logged-in user to the dashboard; every other page bounces an
/// anonymous user to login.
pub fn gate(page: Page, user: Option<&UserSession>) -> Access {
    let access = match (page.is_auth_page(), user.is_some()) {
        (true, true) => Access::Redirect(Page::Home),
        (false, false) => Access::Redirect(Page::Login),
        _ => Access::Allow,
    };
    tracing::debug!(?page, ?access, "page gate");
    access
}

pub fn current_user<S: KeyValueStore>(store: &S) -> Result<Option<UserSession>> {
    let Some(blob) = store.get(USER_KEY)? else {
        return Ok(None);
    };
    match serde_json::from_str(&blob) {
        Ok(user) => Ok(Some(user)),
        Err(e) => {
            tracing::debug!(error = %e, "stored session is unreadable, treating as logged out");
            Ok(None)
        }
    }
}

/// Validates the login form and stores a session named after the email's local part.
pub fn login<S: KeyValueStore>(store: &mut S, email: &str, password: &str) -> Result<UserSession> {
    validate::login_form(email, password)?;
    let name = email.split('@').next().unwrap_or(email).to_string();
    let user = UserSession {
        email: email.to_string(),
        name,
    };
    save(store, &user)?;
    Ok(user)
}

pub fn signup<S: KeyValueStore>(store: &mut S, form: &SignupForm) -> Result<UserSession> {
    validate::signup_form(form)?;
    let user = UserSession {
        email: form.email.clone(),
        name: form.fullname.clone(),
    };
    save(store, &user)?;
    Ok(user)
}

pub fn logout<S: KeyValueStore>(store: &mut S) -> Result<()> {
    store.remove(USER_KEY)?;
    tracing::debug!("session cleared");
    Ok(())
}

fn save<S: KeyValueStore>(store: &mut S, user: &UserSession) -> Result<()> {
    let blob = serde_json::to_string(user)?;
    store.set(USER_KEY, &blob)?;
    tracing::debug!(email = %user.email, "session stored");
    Ok(())
}

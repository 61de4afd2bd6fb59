use crate::commands::{recover, CmdMessage, CmdResult};
use crate::error::Result;
use crate::session::{self, Access, Page};
use crate::store::KeyValueStore;
use crate::validate::{self, SignupForm, StrengthLevel};

/// Result for a caller that is already logged in and asked for an auth page.
fn already_logged_in<S: KeyValueStore>(store: &S, page: Page) -> Result<Option<CmdResult>> {
    let user = session::current_user(store)?;
    match session::gate(page, user.as_ref()) {
        Access::Redirect(target) => {
            let mut result = CmdResult::default().with_redirect(target);
            if let Some(user) = user {
                result.add_message(CmdMessage::info(format!(
                    "Already logged in as {} <{}>",
                    user.name, user.email
                )));
                result = result.with_user(user);
            }
            Ok(Some(result))
        }
        Access::Allow => Ok(None),
    }
}

pub fn login<S: KeyValueStore>(store: &mut S, email: &str, password: &str) -> Result<CmdResult> {
    if let Some(result) = already_logged_in(&*store, Page::Login)? {
        return Ok(result);
    }
    match session::login(store, email, password) {
        Ok(user) => {
            let mut result = CmdResult::default();
            result.add_message(CmdMessage::success(format!("Welcome, {}", user.name)));
            Ok(result.with_user(user))
        }
        Err(e) => recover(e),
    }
}

pub fn signup<S: KeyValueStore>(store: &mut S, form: &SignupForm) -> Result<CmdResult> {
    if let Some(result) = already_logged_in(&*store, Page::Signup)? {
        return Ok(result);
    }
    match session::signup(store, form) {
        Ok(user) => {
            let mut result = CmdResult::default();
            result.add_message(CmdMessage::success(format!(
                "Account created. Welcome, {}",
                user.name
            )));
            Ok(result.with_user(user))
        }
        Err(e) => recover(e),
    }
}

pub fn logout<S: KeyValueStore>(store: &mut S) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    match session::current_user(&*store)? {
        Some(user) => {
            session::logout(store)?;
            result.add_message(CmdMessage::success(format!("Logged out {}", user.email)));
        }
        None => result.add_message(CmdMessage::info("Not logged in.")),
    }
    Ok(result)
}

pub fn whoami<S: KeyValueStore>(store: &S) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    match session::current_user(&*store)? {
        Some(user) => Ok(result.with_user(user)),
        None => {
            result.add_message(CmdMessage::info("Not logged in."));
            Ok(result)
        }
    }
}

pub fn strength(password: &str) -> CmdResult {
    let strength = validate::password_strength(password);
    let mut result = CmdResult::default();
    let label = match strength.level {
        StrengthLevel::Weak => "weak",
        StrengthLevel::Medium => "medium",
        StrengthLevel::Strong => "strong",
    };
    result.add_message(CmdMessage::info(format!(
        "Password strength: {} ({}%)",
        label, strength.percent
    )));
    result.strength = Some(strength);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn login_welcomes_user() {
        let mut store = InMemoryStore::new();
        let result = login(&mut store, "asha@school.edu", "secret1").unwrap();
        assert_eq!(result.user.unwrap().name, "asha");
        assert_eq!(result.messages[0].content, "Welcome, asha");
    }

    #[test]
    fn login_when_logged_in_redirects_home() {
        let mut store = StoreFixture::new()
            .with_user("Ram", "ram@example.com")
            .build();
        let result = login(&mut store, "other@school.edu", "secret1").unwrap();
        assert_eq!(result.redirect, Some(Page::Home));
        assert_eq!(result.user.unwrap().email, "ram@example.com");
        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn login_validation_errors_are_messages() {
        let mut store = InMemoryStore::new();
        let result = login(&mut store, "", "").unwrap();
        assert!(result.has_errors());
        assert_eq!(result.messages.len(), 2);
    }

    #[test]
    fn logout_reports_state() {
        let mut store = StoreFixture::new()
            .with_user("Ram", "ram@example.com")
            .build();
        let result = logout(&mut store).unwrap();
        assert_eq!(result.messages[0].content, "Logged out ram@example.com");

        let again = logout(&mut store).unwrap();
        assert_eq!(again.messages[0].content, "Not logged in.");
    }

    #[test]
    fn strength_reports_level() {
        let result = strength("Abcdefgh1234!");
        assert_eq!(result.strength.unwrap().level, StrengthLevel::Strong);
        assert!(result.messages[0].content.contains("strong (100%)"));
    }
}

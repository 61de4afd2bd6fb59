use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::preferences::{self, Preferences, Theme};
use crate::store::KeyValueStore;

pub fn show<S: KeyValueStore>(store: &S) -> Result<CmdResult> {
    Ok(CmdResult::default().with_preferences(Preferences::load(&*store)?))
}

pub fn toggle_compact<S: KeyValueStore>(store: &mut S) -> Result<CmdResult> {
    let compact = preferences::toggle_compact(store)?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(if compact {
        "Compact view on"
    } else {
        "Compact view off"
    }));
    Ok(result.with_preferences(Preferences::load(&*store)?))
}

/// Sets `theme` when given, otherwise switches to the other one.
pub fn theme<S: KeyValueStore>(store: &mut S, theme: Option<Theme>) -> Result<CmdResult> {
    let applied = match theme {
        Some(theme) => preferences::set_theme(store, theme)?,
        None => preferences::toggle_theme(store)?,
    };
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Theme set to {}", applied)));
    Ok(result.with_preferences(Preferences::load(&*store)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn compact_toggle_message() {
        let mut store = InMemoryStore::new();
        let result = toggle_compact(&mut store).unwrap();
        assert_eq!(result.messages[0].content, "Compact view on");
        assert!(result.preferences.unwrap().compact);
    }

    #[test]
    fn theme_toggles_without_argument() {
        let mut store = InMemoryStore::new();
        let result = theme(&mut store, None).unwrap();
        assert_eq!(result.preferences.unwrap().theme, Theme::Dark);

        let result = theme(&mut store, Some(Theme::Dark)).unwrap();
        assert_eq!(result.messages[0].content, "Theme set to dark");
    }

    #[test]
    fn show_reads_current_preferences() {
        let mut store = InMemoryStore::new();
        preferences::set_theme(&mut store, Theme::Dark).unwrap();
        let result = show(&store).unwrap();
        assert_eq!(result.preferences.unwrap().theme, Theme::Dark);
    }
}

//! Display preferences: compact layout and light/dark theme.
//!
//! Both flags are plain strings in the store. Unknown values fall back to the
//! defaults (not compact, light) rather than erroring.

use crate::error::Result;
use crate::store::{KeyValueStore, COMPACT_KEY, THEME_KEY};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("Unknown theme: {} (expected light or dark)", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Preferences {
    pub compact: bool,
    pub theme: Theme,
}

impl Preferences {
    pub fn load<S: KeyValueStore>(store: &S) -> Result<Self> {
        let compact = store.get(COMPACT_KEY)?.as_deref() == Some("true");
        let theme = store
            .get(THEME_KEY)?
            .and_then(|v| v.parse().ok())
            .unwrap_or_default();
        Ok(Self { compact, theme })
    }
}

pub fn toggle_compact<S: KeyValueStore>(store: &mut S) -> Result<bool> {
    let compact = !Preferences::load(&*store)?.compact;
    store.set(COMPACT_KEY, if compact { "true" } else { "false" })?;
    tracing::debug!(compact, "compact preference saved");
    Ok(compact)
}

pub fn set_theme<S: KeyValueStore>(store: &mut S, theme: Theme) -> Result<Theme> {
    store.set(THEME_KEY, theme.as_str())?;
    tracing::debug!(theme = theme.as_str(), "theme preference saved");
    Ok(theme)
}

pub fn toggle_theme<S: KeyValueStore>(store: &mut S) -> Result<Theme> {
    let next = Preferences::load(&*store)?.theme.toggled();
    set_theme(store, next)
}

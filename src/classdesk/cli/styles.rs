use classdesk::preferences::Theme;
use console::Style;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Prepended to text styled with a name the palette does not know.
pub const MISSING_STYLE_INDICATOR: &str = "(!?)";

pub mod names {
    pub const HEADER: &str = "header";
    pub const ID: &str = "id";
    pub const EMAIL: &str = "email";
    pub const MUTED: &str = "muted";

    pub const GOOD: &str = "good";
    pub const FAIR: &str = "fair";
    pub const POOR: &str = "poor";

    pub const INFO: &str = "info";
    pub const SUCCESS: &str = "success";
    pub const WARNING: &str = "warning";
    pub const ERROR: &str = "error";

    pub const WEAK: &str = "weak";
    pub const MEDIUM: &str = "medium";
    pub const STRONG: &str = "strong";
}

/// Named styles used by the `style` template filter.
#[derive(Clone, Default)]
pub struct Palette {
    styles: HashMap<&'static str, Style>,
}

impl Palette {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(mut self, name: &'static str, style: Style) -> Self {
        self.styles.insert(name, style);
        self
    }

    pub fn has(&self, name: &str) -> bool {
        self.styles.contains_key(name)
    }

    /// Styled text, or the text behind the missing-style indicator.
    pub fn apply(&self, name: &str, text: &str) -> String {
        match self.styles.get(name) {
            // color was already decided by the caller; don't let console second-guess it
            Some(style) => style.clone().force_styling(true).apply_to(text).to_string(),
            None => format!("{} {}", MISSING_STYLE_INDICATOR, text),
        }
    }

    /// Like [`Palette::apply`] without ANSI codes; unknown names are still flagged.
    pub fn apply_plain(&self, name: &str, text: &str) -> String {
        if self.has(name) {
            text.to_string()
        } else {
            format!("{} {}", MISSING_STYLE_INDICATOR, text)
        }
    }
}

pub static LIGHT: Lazy<Palette> = Lazy::new(|| {
    Palette::new()
        .add(names::HEADER, Style::new().bold())
        .add(names::ID, Style::new().blue())
        .add(names::EMAIL, Style::new().color256(rgb_to_ansi256((90, 90, 90))))
        .add(
            names::MUTED,
            Style::new()
                .color256(rgb_to_ansi256((154, 154, 154)))
                .italic(),
        )
        .add(names::GOOD, Style::new().green())
        .add(names::FAIR, Style::new().yellow())
        .add(names::POOR, Style::new().red())
        .add(names::INFO, Style::new().dim())
        .add(names::SUCCESS, Style::new().green())
        .add(names::WARNING, Style::new().yellow())
        .add(names::ERROR, Style::new().red())
        .add(names::WEAK, Style::new().red())
        .add(names::MEDIUM, Style::new().yellow())
        .add(names::STRONG, Style::new().green())
});

pub static DARK: Lazy<Palette> = Lazy::new(|| {
    Palette::new()
        .add(names::HEADER, Style::new().bold().white())
        .add(names::ID, Style::new().cyan())
        .add(
            names::EMAIL,
            Style::new().color256(rgb_to_ansi256((200, 200, 200))),
        )
        .add(
            names::MUTED,
            Style::new()
                .color256(rgb_to_ansi256((120, 120, 120)))
                .italic(),
        )
        .add(names::GOOD, Style::new().green().bright())
        .add(names::FAIR, Style::new().yellow().bright())
        .add(names::POOR, Style::new().red().bright())
        .add(names::INFO, Style::new().color256(rgb_to_ansi256((170, 170, 170))))
        .add(names::SUCCESS, Style::new().green().bright())
        .add(names::WARNING, Style::new().yellow().bright())
        .add(names::ERROR, Style::new().red().bright())
        .add(names::WEAK, Style::new().red().bright())
        .add(names::MEDIUM, Style::new().yellow().bright())
        .add(names::STRONG, Style::new().green().bright())
});

pub fn palette(theme: Theme) -> &'static Palette {
    match theme {
        Theme::Light => &LIGHT,
        Theme::Dark => &DARK,
    }
}

/// Style name for an attendance percentage.
pub fn attendance_style(attendance: i64) -> &'static str {
    if attendance >= 90 {
        names::GOOD
    } else if attendance >= 75 {
        names::FAIR
    } else {
        names::POOR
    }
}

/// Converts an RGB triplet to the nearest ANSI 256-color palette index.
pub fn rgb_to_ansi256((r, g, b): (u8, u8, u8)) -> u8 {
    if r == g && g == b {
        if r < 8 {
            16
        } else if r > 248 {
            231
        } else {
            232 + ((r as u16 - 8) * 24 / 247) as u8
        }
    } else {
        let red = (r as u16 * 5 / 255) as u8;
        let green = (g as u16 * 5 / 255) as u8;
        let blue = (b as u16 * 5 / 255) as u8;
        16 + 36 * red + 6 * green + blue
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_palettes_define_the_same_names() {
        for name in [
            names::HEADER,
            names::ID,
            names::EMAIL,
            names::MUTED,
            names::GOOD,
            names::FAIR,
            names::POOR,
            names::INFO,
            names::SUCCESS,
            names::WARNING,
            names::ERROR,
            names::WEAK,
            names::MEDIUM,
            names::STRONG,
        ] {
            assert!(LIGHT.has(name), "light is missing {}", name);
            assert!(DARK.has(name), "dark is missing {}", name);
        }
    }

    #[test]
    fn unknown_style_is_flagged() {
        assert_eq!(LIGHT.apply_plain("typo", "Ram"), "(!?) Ram");
        assert_eq!(LIGHT.apply_plain(names::ID, "001"), "001");
    }

    #[test]
    fn attendance_bands() {
        assert_eq!(attendance_style(92), names::GOOD);
        assert_eq!(attendance_style(90), names::GOOD);
        assert_eq!(attendance_style(78), names::FAIR);
        assert_eq!(attendance_style(74), names::POOR);
        assert_eq!(attendance_style(-5), names::POOR);
    }

    #[test]
    fn grays_map_to_grayscale_ramp() {
        assert_eq!(rgb_to_ansi256((0, 0, 0)), 16);
        assert_eq!(rgb_to_ansi256((255, 255, 255)), 231);
        assert!(rgb_to_ansi256((154, 154, 154)) >= 232);
        assert_eq!(rgb_to_ansi256((255, 0, 0)), 196);
    }
}

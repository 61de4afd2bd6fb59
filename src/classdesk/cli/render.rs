//! # Rendering Module
//!
//! Styled terminal output: minijinja templates plus a `style` filter backed by the
//! palette for the user's theme.
//!
//! Layout calculations (column widths, truncation, padding) stay in Rust because they
//! need Unicode-aware widths. Templates only decide which style each piece gets.

use super::styles::{attendance_style, names, palette, Palette};
use super::templates::{
    MESSAGES_TEMPLATE, STRENGTH_TEMPLATE, STUDENTS_COMPACT_TEMPLATE, STUDENTS_TEMPLATE,
    TEXT_LIST_TEMPLATE, USER_TEMPLATE,
};
use classdesk::api::{CmdMessage, MessageLevel};
use classdesk::model::{StudentRecord, UserSession};
use classdesk::preferences::Preferences;
use classdesk::validate::{PasswordStrength, StrengthLevel};
use console::Term;
use minijinja::{Environment, Value};
use serde::Serialize;
use unicode_width::UnicodeWidthStr;

const GAP: usize = 2;
const MIN_COLUMN: usize = 4;
const STRENGTH_SLOTS: usize = 20;

#[derive(Serialize)]
struct StudentRow {
    id: String,
    id_pad: String,
    name: String,
    name_pad: String,
    email: String,
    email_pad: String,
    attendance: String,
    attendance_style: &'static str,
}

#[derive(Serialize)]
struct StudentsData {
    rows: Vec<StudentRow>,
    header: String,
    rule: String,
    empty: bool,
    empty_message: String,
}

#[derive(Serialize)]
struct MessageData {
    content: String,
    style: &'static str,
}

#[derive(Serialize)]
struct MessagesData {
    messages: Vec<MessageData>,
}

#[derive(Serialize)]
struct StrengthData {
    filled: String,
    empty: String,
    level: &'static str,
}

#[derive(Serialize)]
struct TextListData {
    lines: Vec<String>,
    empty_message: String,
}

/// Column widths for the full student table.
#[derive(Debug, PartialEq, Eq)]
struct Columns {
    id: usize,
    name: usize,
    email: usize,
    attendance: usize,
}

impl Columns {
    fn fit(records: &[StudentRecord], line_width: usize) -> Self {
        let id = widest(records.iter().map(|r| r.id.as_str()), "ID");
        let attendance = records
            .iter()
            .map(|r| format_attendance(r.attendance).width())
            .fold("ATT".width(), usize::max);
        let name_natural = widest(records.iter().map(|r| r.name.as_str()), "NAME");
        let email_natural = widest(records.iter().map(|r| r.email.as_str()), "EMAIL");

        let available = line_width.saturating_sub(id + attendance + 3 * GAP);
        let (name, email) = if name_natural + email_natural <= available {
            (name_natural, email_natural)
        } else {
            let name = name_natural.min((available * 2 / 5).max(MIN_COLUMN));
            let email = email_natural.min(available.saturating_sub(name).max(MIN_COLUMN));
            (name, email)
        };

        Self {
            id,
            name,
            email,
            attendance,
        }
    }

    fn total(&self) -> usize {
        self.id + self.name + self.email + self.attendance + 3 * GAP
    }
}

/// Renders command results for the terminal, honoring the stored display preferences.
pub struct Renderer {
    palette: Palette,
    use_color: bool,
    compact: bool,
    line_width: usize,
}

impl Renderer {
    /// Color is on when stdout is a terminal that supports it.
    pub fn new(preferences: Preferences, line_width: usize) -> Self {
        let use_color = Term::stdout().features().colors_supported();
        Self::with_color(preferences, line_width, use_color)
    }

    pub fn with_color(preferences: Preferences, line_width: usize, use_color: bool) -> Self {
        Self {
            palette: palette(preferences.theme).clone(),
            use_color,
            compact: preferences.compact,
            line_width,
        }
    }

    fn render<T: Serialize>(&self, template: &'static str, data: &T) -> Result<String, minijinja::Error> {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_keep_trailing_newline(true);
        register_style_filter(&mut env, self.palette.clone(), self.use_color);
        env.add_template("_inline", template)?;
        env.get_template("_inline")?.render(data)
    }

    /// The student table, or the condensed one-line-per-student layout when compact.
    pub fn students(&self, records: &[StudentRecord], empty_message: &str) -> String {
        let data = if self.compact {
            self.compact_rows(records, empty_message)
        } else {
            self.table_rows(records, empty_message)
        };
        let template = if self.compact {
            STUDENTS_COMPACT_TEMPLATE
        } else {
            STUDENTS_TEMPLATE
        };
        self.render(template, &data)
            .unwrap_or_else(|e| format!("Render error: {}\n", e))
    }

    fn table_rows(&self, records: &[StudentRecord], empty_message: &str) -> StudentsData {
        let columns = Columns::fit(records, self.line_width);
        let rows = records
            .iter()
            .map(|r| {
                let name = truncate_to_width(&r.name, columns.name);
                let email = truncate_to_width(&r.email, columns.email);
                StudentRow {
                    id_pad: padding(&r.id, columns.id),
                    id: r.id.clone(),
                    name_pad: padding(&name, columns.name),
                    name,
                    email_pad: padding(&email, columns.email),
                    email,
                    attendance: format!(
                        "{:>width$}",
                        format_attendance(r.attendance),
                        width = columns.attendance
                    ),
                    attendance_style: attendance_style(r.attendance),
                }
            })
            .collect();

        let header = format!(
            "{}{}  {}{}  {}{}  {:>width$}",
            "ID",
            padding("ID", columns.id),
            "NAME",
            padding("NAME", columns.name),
            "EMAIL",
            padding("EMAIL", columns.email),
            "ATT",
            width = columns.attendance
        );

        StudentsData {
            rows,
            header,
            rule: "-".repeat(columns.total()),
            empty: records.is_empty(),
            empty_message: empty_message.to_string(),
        }
    }

    fn compact_rows(&self, records: &[StudentRecord], empty_message: &str) -> StudentsData {
        let rows = records
            .iter()
            .map(|r| {
                let attendance = format_attendance(r.attendance);
                let room = self
                    .line_width
                    .saturating_sub(r.id.width() + attendance.width() + 2);
                StudentRow {
                    id: r.id.clone(),
                    id_pad: String::new(),
                    name: truncate_to_width(&r.name, room),
                    name_pad: String::new(),
                    email: r.email.clone(),
                    email_pad: String::new(),
                    attendance,
                    attendance_style: attendance_style(r.attendance),
                }
            })
            .collect();

        StudentsData {
            rows,
            header: String::new(),
            rule: String::new(),
            empty: records.is_empty(),
            empty_message: empty_message.to_string(),
        }
    }

    pub fn messages(&self, messages: &[CmdMessage]) -> String {
        if messages.is_empty() {
            return String::new();
        }

        let data = MessagesData {
            messages: messages
                .iter()
                .map(|msg| MessageData {
                    content: msg.content.clone(),
                    style: match msg.level {
                        MessageLevel::Info => names::INFO,
                        MessageLevel::Success => names::SUCCESS,
                        MessageLevel::Warning => names::WARNING,
                        MessageLevel::Error => names::ERROR,
                    },
                })
                .collect(),
        };

        self.render(MESSAGES_TEMPLATE, &data).unwrap_or_else(|_| {
            messages
                .iter()
                .map(|m| format!("{}\n", m.content))
                .collect()
        })
    }

    pub fn user(&self, user: &UserSession) -> String {
        self.render(USER_TEMPLATE, user)
            .unwrap_or_else(|_| format!("Logged in as {} <{}>\n", user.name, user.email))
    }

    /// A fixed-width meter filled in proportion to the score.
    pub fn strength(&self, strength: &PasswordStrength) -> String {
        let filled = ((strength.percent / 100.0) * STRENGTH_SLOTS as f64).round() as usize;
        let filled = filled.min(STRENGTH_SLOTS);
        let data = StrengthData {
            filled: "#".repeat(filled),
            empty: "-".repeat(STRENGTH_SLOTS - filled),
            level: match strength.level {
                StrengthLevel::Weak => names::WEAK,
                StrengthLevel::Medium => names::MEDIUM,
                StrengthLevel::Strong => names::STRONG,
            },
        };
        self.render(STRENGTH_TEMPLATE, &data)
            .unwrap_or_else(|e| format!("Render error: {}\n", e))
    }

    pub fn text_list(&self, lines: &[String], empty_message: &str) -> String {
        let data = TextListData {
            lines: lines.to_vec(),
            empty_message: empty_message.to_string(),
        };
        self.render(TEXT_LIST_TEMPLATE, &data)
            .unwrap_or_else(|_| format!("{}\n", empty_message))
    }
}

/// Registers the `style` filter on a minijinja environment.
fn register_style_filter(env: &mut Environment<'static>, palette: Palette, use_color: bool) {
    env.add_filter("style", move |value: Value, name: String| -> String {
        let text = value.to_string();
        if use_color {
            palette.apply(&name, &text)
        } else {
            palette.apply_plain(&name, &text)
        }
    });
}

fn format_attendance(attendance: i64) -> String {
    format!("{}%", attendance)
}

fn widest<'a>(values: impl Iterator<Item = &'a str>, header: &str) -> usize {
    values.map(|v| v.width()).fold(header.width(), usize::max)
}

fn padding(text: &str, width: usize) -> String {
    " ".repeat(width.saturating_sub(text.width()))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    use unicode_width::UnicodeWidthChar;

    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    let limit = max_width.saturating_sub(1);

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > limit {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

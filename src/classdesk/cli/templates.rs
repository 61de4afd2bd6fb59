//! Template sources, compiled into the binary.
//!
//! Rendered with `trim_blocks` on, so a block tag's own line break is dropped.

pub const STUDENTS_TEMPLATE: &str = include_str!("templates/students.tmp");
pub const STUDENTS_COMPACT_TEMPLATE: &str = include_str!("templates/students_compact.tmp");
pub const MESSAGES_TEMPLATE: &str = include_str!("templates/messages.tmp");
pub const USER_TEMPLATE: &str = include_str!("templates/user.tmp");
pub const STRENGTH_TEMPLATE: &str = include_str!("templates/strength.tmp");
pub const TEXT_LIST_TEMPLATE: &str = include_str!("templates/text_list.tmp");

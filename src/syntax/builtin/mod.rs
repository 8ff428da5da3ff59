//! Built-in highlight tables
//!
//! The default rule set for common log line content and the default theme
//! its groups are styled with.

mod log_lines;
mod theme;

pub use log_lines::log_rules;
pub use theme::default_theme;

/// Group for matches of user-supplied patterns
pub const USER_PATTERN_GROUP: &str = "UserPattern";

/// Group for the whole-line background behind lines with a user match
pub const USER_LINE_GROUP: &str = "UserLine";

/// Groups of the log-level keywords; only these get a lower-case fallback
pub const LEVEL_GROUPS: &[&str] = &["Comment", "Debug", "LogGreen", "WarningMsg", "ErrorMsg"];

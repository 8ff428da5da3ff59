//! Configuration file support
//!
//! Loads extra rules and highlight groups from a TOML file, by default
//! ~/.loglit.toml (or %USERPROFILE%\.loglit.toml on Windows).
//!
//! Example:
//! ```toml
//! [[syntax]]
//! group = "UserPattern"
//! pattern = "req-[0-9a-f]+"
//! keywords = ["checkout"]
//!
//! [[highlight]]
//! group = "Number"
//! fg = "#FF966C"
//! bold = true
//!
//! [[highlight]]
//! group = "Float"
//! link = "Number"
//! ```
//!
//! `[[syntax]]` rules are added to the user rule set, which is stacked on top
//! of the built-in rules. `[[highlight]]` groups replace same-named groups of
//! the theme.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{HighlightError, Result};
use crate::syntax::builtin::{self, USER_PATTERN_GROUP};
use crate::syntax::{Color, Rule, RuleSet, Style};

/// Priority of the lower-cased fallback of the built-in keywords
pub const LOWERCASE_PRIORITY: i32 = 0;
/// Priority of the built-in rules
pub const BUILTIN_PRIORITY: i32 = 10;
/// Priority of user rules (config file and command line)
pub const USER_PRIORITY: i32 = 20;

/// Environment variable naming a config file
pub const CONFIG_ENV: &str = "LOGLIT_CONFIG";

/// Rule sets and theme overrides handed to the renderer
#[derive(Debug, Clone)]
pub struct Config {
    /// Built-in rules
    pub builtin: RuleSet,
    /// User rules; lines they match get a background tint
    pub user: RuleSet,
    /// Highlight groups to add to the theme
    pub highlights: Vec<Style>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            builtin: builtin::log_rules("builtin", BUILTIN_PRIORITY),
            user: RuleSet::new("user", USER_PRIORITY).with_line_highlight(),
            highlights: Vec::new(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    syntax: Vec<SyntaxEntry>,
    #[serde(default)]
    highlight: Vec<HighlightEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SyntaxEntry {
    group: String,
    pattern: Option<String>,
    #[serde(default)]
    keywords: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct HighlightEntry {
    group: String,
    link: Option<String>,
    fg: Option<String>,
    bg: Option<String>,
    #[serde(default)]
    bold: bool,
    #[serde(default)]
    italic: bool,
    #[serde(default)]
    underline: bool,
}

impl SyntaxEntry {
    fn into_rule(self) -> Result<Rule> {
        let mut rule = Rule::new(&self.group);
        if let Some(pattern) = &self.pattern {
            rule = rule.with_pattern(pattern)?;
        }
        rule.with_keywords(self.keywords)
    }
}

impl HighlightEntry {
    fn into_style(self) -> Result<Style> {
        // A link makes the other fields meaningless
        if let Some(target) = &self.link {
            return Ok(Style::link(&self.group, target));
        }
        let mut style = Style::new(&self.group);
        if let Some(fg) = &self.fg {
            style = style.with_fg(Color::from_hex(fg)?);
        }
        if let Some(bg) = &self.bg {
            style = style.with_bg(Color::from_hex(bg)?);
        }
        style.bold = self.bold;
        style.italic = self.italic;
        style.underline = self.underline;
        Ok(style)
    }
}

impl Config {
    /// Get the default config file path
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(windows)]
        {
            std::env::var("USERPROFILE")
                .ok()
                .map(|home| PathBuf::from(home).join(".loglit.toml"))
        }

        #[cfg(not(windows))]
        {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(".loglit.toml"))
        }
    }

    /// Load configuration.
    ///
    /// An explicit path, or one named by `LOGLIT_CONFIG`, must exist. The
    /// default path is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = Config::default();

        let env_path = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        if let Some(path) = explicit.map(Path::to_path_buf).or(env_path) {
            let contents = fs::read_to_string(&path)?;
            config.apply_toml(&contents, &path)?;
            return Ok(config);
        }

        if let Some(path) = Self::config_path() {
            match fs::read_to_string(&path) {
                Ok(contents) => config.apply_toml(&contents, &path)?,
                Err(err) if err.kind() == ErrorKind::NotFound => {
                    log::debug!("no config file at {}", path.display());
                }
                Err(err) => return Err(err.into()),
            }
        }

        Ok(config)
    }

    /// Parse TOML config contents and add them to this config.
    ///
    /// `path` is only used for error messages.
    pub fn apply_toml(&mut self, contents: &str, path: &Path) -> Result<()> {
        let file: ConfigFile = toml::from_str(contents).map_err(|source| HighlightError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!(
            "config {}: {} syntax rules, {} highlight groups",
            path.display(),
            file.syntax.len(),
            file.highlight.len()
        );

        for entry in file.syntax {
            let rule = entry.into_rule()?;
            if rule.is_empty() {
                log::warn!("config {}: rule for group {} has no pattern or keywords", path.display(), rule.group);
                continue;
            }
            self.user.push(rule);
        }
        for entry in file.highlight {
            self.highlights.push(entry.into_style()?);
        }
        Ok(())
    }

    /// Add a user regex, styled with the user pattern group
    pub fn add_user_pattern(&mut self, pattern: &str) -> Result<()> {
        self.user.push(Rule::new(USER_PATTERN_GROUP).with_pattern(pattern)?);
        Ok(())
    }

    /// All rule sets, including the lower-cased fallback of the built-in
    /// level keywords
    pub fn rule_sets(&self) -> Vec<RuleSet> {
        vec![
            self.builtin
                .lowercased("builtin-lowercase", LOWERCASE_PRIORITY, builtin::LEVEL_GROUPS),
            self.builtin.clone(),
            self.user.clone(),
        ]
    }
}

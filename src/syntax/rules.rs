//! Highlight rules
//!
//! A [`Rule`] ties a regex pattern and/or a list of literal keywords to a
//! highlight group. Rules are collected into [`RuleSet`]s, each of which is
//! one priority tier (built-in, lower-cased fallback, user).

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{HighlightError, Result};

/// Maximal runs of word characters: letters, marks, digits and underscore
pub(crate) static WORD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\p{L}\p{M}\p{N}_]+").expect("word pattern is valid")
});

/// Check that `keyword` is exactly one word token
pub fn is_valid_keyword(keyword: &str) -> bool {
    WORD_RE
        .find(keyword)
        .is_some_and(|m| m.start() == 0 && m.end() == keyword.len())
}

/// A single highlight rule
#[derive(Debug, Clone)]
pub struct Rule {
    /// Highlight group the matches are styled with
    pub group: String,
    /// Compiled regex pattern
    pub pattern: Option<Regex>,
    /// Whole-word literal keywords
    pub keywords: Vec<String>,
}

impl Rule {
    /// Create a rule with no pattern and no keywords
    pub fn new(group: &str) -> Self {
        Self {
            group: group.to_string(),
            pattern: None,
            keywords: Vec::new(),
        }
    }

    /// Builder: compile and set the pattern
    pub fn with_pattern(mut self, pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|source| HighlightError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        self.pattern = Some(regex);
        Ok(self)
    }

    /// Builder: add keywords, each of which must be a single word
    pub fn with_keywords<I, S>(mut self, keywords: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for keyword in keywords {
            let keyword = keyword.into();
            if !is_valid_keyword(&keyword) {
                return Err(HighlightError::InvalidKeyword(keyword));
            }
            self.keywords.push(keyword);
        }
        Ok(self)
    }

    /// Whether the rule can match anything at all
    pub fn is_empty(&self) -> bool {
        self.pattern.is_none() && self.keywords.is_empty()
    }
}

/// An ordered collection of rules sharing one priority tier
///
/// Within a set, later rules win over earlier ones where their matches
/// overlap. Between sets, a higher `priority` wins.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    /// Name for debugging (e.g., "builtin", "user")
    pub name: String,
    /// Higher sets are stacked on top of lower ones
    pub priority: i32,
    /// When any rule in this set matches, tint the whole line
    pub highlight_line: bool,
    /// Rules in declaration order
    pub rules: Vec<Rule>,
}

impl RuleSet {
    /// Create an empty rule set
    pub fn new(name: &str, priority: i32) -> Self {
        Self {
            name: name.to_string(),
            priority,
            highlight_line: false,
            rules: Vec::new(),
        }
    }

    /// Builder: tint the whole line when this set matches
    pub fn with_line_highlight(mut self) -> Self {
        self.highlight_line = true;
        self
    }

    /// Add a rule; it takes precedence over every rule added before it
    pub fn push(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    /// Number of rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if the set has no rules
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Derive a keyword-only set with every keyword lower-cased.
    ///
    /// Used as a low-priority fallback so "error" is styled like "ERROR".
    /// Only rules whose group is in `groups` are taken. Keywords that are
    /// lower-case already are kept as they are.
    pub fn lowercased(&self, name: &str, priority: i32, groups: &[&str]) -> RuleSet {
        let mut set = RuleSet::new(name, priority);
        for rule in &self.rules {
            if rule.keywords.is_empty() || !groups.contains(&rule.group.as_str()) {
                continue;
            }
            let mut lowered = Rule::new(&rule.group);
            for keyword in &rule.keywords {
                let keyword = keyword.to_lowercase();
                if !lowered.keywords.contains(&keyword) {
                    lowered.keywords.push(keyword);
                }
            }
            set.push(lowered);
        }
        set
    }
}

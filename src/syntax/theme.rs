//! Theme tables
//!
//! A [`Theme`] maps highlight group names to [`Style`]s. Groups may link to
//! other groups; [`Theme::resolve_all_links`] flattens every link once so
//! that rendering only ever does a single map lookup per group.

use std::collections::HashMap;

use super::style::{ResolvedStyle, Style};
use crate::error::{HighlightError, Result};

/// Mapping from highlight group name to style
#[derive(Debug, Clone, Default)]
pub struct Theme {
    /// Theme name (e.g., "default")
    pub name: String,
    /// Declared styles by group
    styles: HashMap<String, Style>,
    /// Escape sequences by group, filled in by link resolution
    resolved: HashMap<String, ResolvedStyle>,
    /// Whether every link has been flattened
    linked: bool,
}

impl Theme {
    /// Create an empty theme
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Add or replace a group
    pub fn insert(&mut self, style: Style) {
        self.styles.insert(style.group.clone(), style);
        self.linked = false;
    }

    /// Get the declared style for a group
    pub fn get(&self, group: &str) -> Option<&Style> {
        self.styles.get(group)
    }

    /// Check if a group exists
    pub fn contains(&self, group: &str) -> bool {
        self.styles.contains_key(group)
    }

    /// Whether all links have been flattened
    pub fn is_resolved(&self) -> bool {
        self.linked
    }

    /// Follow `group`'s link chain to the first group without a link.
    ///
    /// Fails if a group in the chain is missing or the chain loops.
    fn link_target(&self, group: &str) -> Result<&Style> {
        let mut style = self
            .styles
            .get(group)
            .ok_or_else(|| HighlightError::GroupNotFound(group.to_string()))?;
        let mut chain = vec![group.to_string()];

        loop {
            let Some(target) = style.link.clone() else {
                return Ok(style);
            };
            if chain.contains(&target) {
                chain.push(target);
                return Err(HighlightError::CyclicLink { chain });
            }
            style = match self.styles.get(&target) {
                Some(next) => next,
                None => {
                    return Err(HighlightError::LinkTargetNotFound {
                        group: style.group.clone(),
                        target,
                    })
                }
            };
            chain.push(target);
        }
    }

    /// Flatten every link in the table.
    ///
    /// Runs once; calling it on a resolved theme does nothing. On error the
    /// theme is left unresolved.
    pub fn resolve_all_links(&mut self) -> Result<()> {
        if self.linked {
            return Ok(());
        }

        let mut names: Vec<String> = self.styles.keys().cloned().collect();
        // Sorted so that the first reported error does not depend on hash order
        names.sort();

        let mut flattened = Vec::new();
        for name in &names {
            let style = &self.styles[name];
            if let Some(link) = &style.link {
                let target = self.link_target(name)?.clone();
                log::debug!("theme {}: {} -> {} resolves to {}", self.name, name, link, target.group);
                flattened.push((name.clone(), target));
            }
        }

        for (name, target) in flattened {
            if let Some(style) = self.styles.get_mut(&name) {
                style.inherit(&target);
            }
        }

        self.resolved = self
            .styles
            .iter()
            .map(|(name, style)| (name.clone(), style.to_resolved()))
            .collect();
        self.linked = true;
        Ok(())
    }

    /// Get the escape sequences for a group.
    ///
    /// On a resolved theme this is a single lookup; otherwise the link
    /// chain is walked without modifying the table.
    pub fn style(&self, group: &str) -> Result<ResolvedStyle> {
        if self.linked {
            return self
                .resolved
                .get(group)
                .cloned()
                .ok_or_else(|| HighlightError::GroupNotFound(group.to_string()));
        }
        self.link_target(group).map(Style::to_resolved)
    }
}

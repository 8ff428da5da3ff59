//! Line renderer
//!
//! The [`Renderer`] owns the resolved theme and one [`Matcher`] per rule
//! set. Each line is matched by every set, the per-set layers are stacked
//! from lowest to highest priority, and the final layer is written out with
//! escape sequences around each span.

use super::builtin::USER_LINE_GROUP;
use super::layer::{stack, stack_all, Layer, Span};
use super::matcher::Matcher;
use super::rules::RuleSet;
use super::style::reset_code;
use super::theme::Theme;
use crate::config::Config;
use crate::error::Result;

/// Turns raw lines into highlighted lines
#[derive(Debug, Clone)]
pub struct Renderer {
    theme: Theme,
    /// Matchers in ascending priority
    matchers: Vec<Matcher>,
}

impl Renderer {
    /// Create a renderer from a config and a theme.
    ///
    /// The config's highlight groups are added to the theme before its links
    /// are resolved.
    pub fn new(config: Config, mut theme: Theme) -> Result<Self> {
        let rule_sets = config.rule_sets();
        for style in config.highlights {
            theme.insert(style);
        }
        Self::with_rule_sets(rule_sets, theme)
    }

    /// Create a renderer from explicit rule sets.
    ///
    /// Fails if the theme cannot be resolved or a rule refers to a group the
    /// theme lacks.
    pub fn with_rule_sets(mut rule_sets: Vec<RuleSet>, mut theme: Theme) -> Result<Self> {
        theme.resolve_all_links()?;

        // Stable, so equal priorities keep their given order
        rule_sets.sort_by_key(|set| set.priority);

        let matchers: Vec<Matcher> = rule_sets.into_iter().map(Matcher::new).collect();
        for matcher in &matchers {
            for group in matcher.groups() {
                theme.style(group)?;
            }
            if matcher.rule_set().highlight_line {
                theme.style(USER_LINE_GROUP)?;
            }
            log::debug!(
                "rule set {} (priority {}): {} rules",
                matcher.rule_set().name,
                matcher.rule_set().priority,
                matcher.rule_set().len()
            );
        }

        Ok(Self { theme, matchers })
    }

    /// The resolved theme
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Matchers in the order their layers are stacked
    pub fn matchers(&self) -> &[Matcher] {
        &self.matchers
    }

    /// Compute the final, normalized layer for a line
    pub fn layer(&self, line: &str) -> Result<Layer> {
        let mut layers = Vec::with_capacity(self.matchers.len());
        let mut tint_line = false;
        for matcher in &self.matchers {
            let layer = matcher.find_all(&self.theme, line)?;
            tint_line |= matcher.rule_set().highlight_line && !layer.is_empty();
            layers.push(layer);
        }

        let merged = stack_all(layers);
        if !tint_line {
            return Ok(merged);
        }

        let background = Span::new(0, line.len(), self.theme.style(USER_LINE_GROUP)?);
        Ok(stack(&merged, &Layer::from(vec![background])))
    }

    /// Highlight one line.
    ///
    /// A line without matches is returned unchanged.
    pub fn render(&self, line: &str) -> Result<String> {
        let layer = self.layer(line)?;
        if layer.is_empty() {
            return Ok(line.to_string());
        }
        render_layer(line, &layer)
    }
}

/// Write `line` with every span of `layer` wrapped in its escape sequences.
///
/// The layer must be normalized for `line`. A reset sequence is appended
/// after the whole line.
pub fn render_layer(line: &str, layer: &Layer) -> Result<String> {
    layer.check_bounds(line)?;

    let mut out = String::with_capacity(line.len() * 2);
    let mut pos = 0;
    for span in layer {
        out.push_str(&line[pos..span.start]);
        out.push_str(span.style.start());
        out.push_str(&line[span.start..span.end]);
        out.push_str(span.style.end());
        pos = span.end;
    }
    out.push_str(&line[pos..]);
    out.push_str(reset_code());

    Ok(out)
}

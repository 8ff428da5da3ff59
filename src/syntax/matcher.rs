//! Rule-set matching
//!
//! A [`Matcher`] runs one [`RuleSet`] against a line and produces the
//! normalized [`Layer`] for that set: regex matches first, keyword matches
//! after them, then overlaps are removed with later entries winning.

use std::collections::HashMap;

use super::layer::{Layer, Span};
use super::rules::{RuleSet, WORD_RE};
use super::theme::Theme;
use crate::error::Result;

/// A rule set plus its keyword lookup table
#[derive(Debug, Clone)]
pub struct Matcher {
    rule_set: RuleSet,
    /// Keyword -> group; a later rule's entry replaces an earlier one
    keywords: HashMap<String, String>,
}

impl Matcher {
    /// Build the keyword table for a rule set
    pub fn new(rule_set: RuleSet) -> Self {
        let mut keywords = HashMap::new();
        for rule in &rule_set.rules {
            for keyword in &rule.keywords {
                keywords.insert(keyword.clone(), rule.group.clone());
            }
        }
        Self { rule_set, keywords }
    }

    /// The rule set this matcher runs
    pub fn rule_set(&self) -> &RuleSet {
        &self.rule_set
    }

    /// Every group referenced by a rule in the set
    pub fn groups(&self) -> impl Iterator<Item = &str> {
        self.rule_set.rules.iter().map(|rule| rule.group.as_str())
    }

    /// Find all regex matches in `line`.
    ///
    /// Matches of one pattern never overlap each other; matches of different
    /// rules may. Empty matches are skipped.
    pub fn find_patterns(&self, theme: &Theme, line: &str) -> Result<Layer> {
        let mut layer = Layer::new();
        for rule in &self.rule_set.rules {
            let Some(pattern) = &rule.pattern else {
                continue;
            };
            let style = theme.style(&rule.group)?;
            layer.extend(
                pattern
                    .find_iter(line)
                    .filter(|m| m.start() < m.end())
                    .map(|m| Span::new(m.start(), m.end(), style.clone())),
            );
        }
        Ok(layer)
    }

    /// Find all whole-word keyword matches in `line`
    pub fn find_keywords(&self, theme: &Theme, line: &str) -> Result<Layer> {
        let mut layer = Layer::new();
        if self.keywords.is_empty() {
            return Ok(layer);
        }
        for word in WORD_RE.find_iter(line) {
            if let Some(group) = self.keywords.get(word.as_str()) {
                layer.push(Span::new(word.start(), word.end(), theme.style(group)?));
            }
        }
        Ok(layer)
    }

    /// Find pattern and keyword matches and normalize them into one layer
    pub fn find_all(&self, theme: &Theme, line: &str) -> Result<Layer> {
        let mut layer = self.find_patterns(theme, line)?;
        layer.extend(self.find_keywords(theme, line)?.iter().cloned());
        layer.normalize();
        Ok(layer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HighlightError;
    use crate::syntax::rules::Rule;
    use crate::syntax::style::{Color, Style};

    fn test_theme() -> Theme {
        let mut theme = Theme::new("test");
        theme.insert(Style::new("Number").with_fg(Color::new(1, 0, 0)));
        theme.insert(Style::new("Level").with_fg(Color::new(0, 1, 0)));
        theme.insert(Style::new("Date").with_fg(Color::new(0, 0, 1)));
        theme.resolve_all_links().unwrap();
        theme
    }

    fn bounds(layer: &Layer) -> Vec<(usize, usize)> {
        layer.iter().map(|s| (s.start, s.end)).collect()
    }

    #[test]
    fn test_find_patterns() {
        let mut set = RuleSet::new("test", 0);
        set.push(Rule::new("Number").with_pattern(r"\d+").unwrap());
        let matcher = Matcher::new(set);

        let layer = matcher.find_patterns(&test_theme(), "a 12 b 345").unwrap();
        assert_eq!(bounds(&layer), vec![(2, 4), (7, 10)]);
        assert_eq!(layer.spans()[0].style, test_theme().style("Number").unwrap());
    }

    #[test]
    fn test_empty_pattern_matches_are_skipped() {
        let mut set = RuleSet::new("test", 0);
        set.push(Rule::new("Number").with_pattern(r"\d*").unwrap());
        let matcher = Matcher::new(set);

        let layer = matcher.find_patterns(&test_theme(), "ab 7").unwrap();
        assert_eq!(bounds(&layer), vec![(3, 4)]);
    }

    #[test]
    fn test_find_keywords_whole_word() {
        let mut set = RuleSet::new("test", 0);
        set.push(Rule::new("Level").with_keywords(["INFO"]).unwrap());
        let matcher = Matcher::new(set);
        let theme = test_theme();

        let layer = matcher
            .find_keywords(&theme, "INFORMATION INFO xINFO INFO_X [INFO]")
            .unwrap();
        assert_eq!(bounds(&layer), vec![(12, 16), (31, 35)]);
    }

    #[test]
    fn test_find_keywords_case_sensitive_and_unicode() {
        let mut set = RuleSet::new("test", 0);
        set.push(Rule::new("Level").with_keywords(["WARN", "fertig"]).unwrap());
        let matcher = Matcher::new(set);

        let line = "warn WARN größe fertig";
        let layer = matcher.find_keywords(&test_theme(), line).unwrap();
        let words: Vec<&str> = layer.iter().map(|s| &line[s.start..s.end]).collect();
        assert_eq!(words, vec!["WARN", "fertig"]);
    }

    #[test]
    fn test_later_rule_wins_duplicate_keyword() {
        let mut set = RuleSet::new("test", 0);
        set.push(Rule::new("Level").with_keywords(["DONE"]).unwrap());
        set.push(Rule::new("Date").with_keywords(["DONE"]).unwrap());
        let matcher = Matcher::new(set);
        let theme = test_theme();

        let layer = matcher.find_keywords(&theme, "DONE").unwrap();
        assert_eq!(layer.len(), 1);
        assert_eq!(layer.spans()[0].style, theme.style("Date").unwrap());
    }

    #[test]
    fn test_find_all_later_rule_wins_overlap() {
        let mut set = RuleSet::new("test", 0);
        set.push(Rule::new("Number").with_pattern(r"\d+").unwrap());
        set.push(Rule::new("Date").with_pattern(r"\d{4}-\d{2}-\d{2}").unwrap());
        let matcher = Matcher::new(set);
        let theme = test_theme();

        let layer = matcher.find_all(&theme, "on 2024-01-31 at 5").unwrap();
        assert_eq!(bounds(&layer), vec![(3, 13), (17, 18)]);
        assert_eq!(layer.spans()[0].style, theme.style("Date").unwrap());
        assert_eq!(layer.spans()[1].style, theme.style("Number").unwrap());
    }

    #[test]
    fn test_keywords_win_over_patterns_in_same_set() {
        let mut set = RuleSet::new("test", 0);
        set.push(Rule::new("Level").with_keywords(["E42"]).unwrap());
        set.push(Rule::new("Number").with_pattern(r"\d+").unwrap());
        let matcher = Matcher::new(set);
        let theme = test_theme();

        let layer = matcher.find_all(&theme, "E42").unwrap();
        assert_eq!(bounds(&layer), vec![(0, 3)]);
        assert_eq!(layer.spans()[0].style, theme.style("Level").unwrap());
    }

    #[test]
    fn test_unknown_group() {
        let mut set = RuleSet::new("test", 0);
        set.push(Rule::new("Missing").with_pattern("x").unwrap());
        let matcher = Matcher::new(set);

        assert!(matches!(
            matcher.find_all(&test_theme(), "no match here either"),
            Err(HighlightError::GroupNotFound(group)) if group == "Missing"
        ));
    }

    #[test]
    fn test_no_rules_no_spans() {
        let matcher = Matcher::new(RuleSet::new("empty", 0));
        assert!(matcher.find_all(&test_theme(), "INFO 42").unwrap().is_empty());
    }
}

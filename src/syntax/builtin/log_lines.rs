//! Log line rules

use crate::syntax::rules::{Rule, RuleSet};

/// Create the built-in log line rule set
///
/// Later rules win where matches overlap, so broad patterns (numbers) come
/// first and more specific ones (dates, URLs, strings) after them.
pub fn log_rules(name: &str, priority: i32) -> RuleSet {
    let mut set = RuleSet::new(name, priority);

    // Numbers
    if let Ok(rule) = Rule::new("Number").with_pattern(r"\b\d+\b") {
        set.push(rule);
    }
    if let Ok(rule) = Rule::new("Float").with_pattern(r"\b\d+\.\d+(?:[eE][+-]?\d+)?\b") {
        set.push(rule);
    }
    if let Ok(rule) = Rule::new("Number").with_pattern(r"\b0x[0-9a-fA-F]+\b") {
        set.push(rule);
    }

    // Durations and sizes
    if let Ok(rule) = Rule::new("Constant")
        .with_pattern(r"\b\d+(?:\.\d+)?(?:ns|us|µs|ms|s|m|h|[KMGT]i?B)\b")
    {
        set.push(rule);
    }

    // key=value keys, including the '='
    if let Ok(rule) = Rule::new("Function").with_pattern(r"\b[\w.\-]+=") {
        set.push(rule);
    }

    // IPv4 addresses, with optional port
    if let Ok(rule) = Rule::new("Constant")
        .with_pattern(r"\b(?:\d{1,3}\.){3}\d{1,3}(?::\d{1,5})?\b")
    {
        set.push(rule);
    }

    // UUIDs
    if let Ok(rule) = Rule::new("Constant").with_pattern(
        r"\b[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}\b",
    ) {
        set.push(rule);
    }

    // Times, then full dates which take over a time they contain
    if let Ok(rule) = Rule::new("LogBlue").with_pattern(r"\b\d{2}:\d{2}:\d{2}(?:[.,]\d+)?\b") {
        set.push(rule);
    }
    if let Ok(rule) = Rule::new("LogBlue").with_pattern(
        r"\b\d{4}[-/]\d{2}[-/]\d{2}(?:[T ]\d{2}:\d{2}:\d{2}(?:[.,]\d+)?(?:Z|[+-]\d{2}:?\d{2})?)?\b",
    ) {
        set.push(rule);
    }

    // Bracketed tags like [main]
    if let Ok(rule) = Rule::new("Label").with_pattern(r"\[[\w.\-:/]+\]") {
        set.push(rule);
    }

    // Quoted strings
    if let Ok(rule) = Rule::new("String").with_pattern(r#""(?:[^"\\]|\\.)*""#) {
        set.push(rule);
    }
    if let Ok(rule) = Rule::new("String").with_pattern(r"'(?:[^'\\]|\\.)*'") {
        set.push(rule);
    }

    // URLs
    if let Ok(rule) = Rule::new("Underlined").with_pattern(r#"\b[a-z][a-z0-9+.\-]*://[^\s"'<>]+"#) {
        set.push(rule);
    }

    // Keywords
    if let Ok(rule) = Rule::new("Boolean").with_keywords(["true", "false", "TRUE", "FALSE"]) {
        set.push(rule);
    }
    if let Ok(rule) = Rule::new("Constant").with_keywords(["null", "nil", "None", "NULL", "undefined"]) {
        set.push(rule);
    }
    if let Ok(rule) = Rule::new("Statement")
        .with_keywords(["GET", "POST", "PUT", "PATCH", "DELETE", "HEAD", "OPTIONS"])
    {
        set.push(rule);
    }
    if let Ok(rule) = Rule::new("Comment").with_keywords(["TRACE", "VERBOSE"]) {
        set.push(rule);
    }
    if let Ok(rule) = Rule::new("Debug").with_keywords(["DEBUG", "DBG"]) {
        set.push(rule);
    }
    if let Ok(rule) = Rule::new("LogGreen").with_keywords(["INFO", "NOTICE", "OK", "SUCCESS"]) {
        set.push(rule);
    }
    if let Ok(rule) = Rule::new("WarningMsg").with_keywords(["WARN", "WARNING"]) {
        set.push(rule);
    }
    if let Ok(rule) = Rule::new("ErrorMsg")
        .with_keywords(["ERROR", "ERR", "FATAL", "CRITICAL", "PANIC", "FAIL", "FAILED"])
    {
        set.push(rule);
    }
    if let Ok(rule) = Rule::new("Exception").with_keywords(["Exception", "Traceback", "panicked"]) {
        set.push(rule);
    }

    set
}

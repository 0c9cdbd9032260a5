//! Text normalization applied to program output before comparison.
//!
//! Every filter is a pure `&str -> String` transform.

use regex::Regex;
use std::sync::OnceLock;

pub const ERROR_SENTINEL: &str = "<SOME ERROR MESSAGE>";

/// Signature shared by the output filters a variant can pick from
pub type TextFilter = fn(&str) -> String;

fn error_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?im)^.*\berror\b.*").expect("valid regex"))
}

fn edge_whitespace() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^[ \t]*\n?|[ \t]+$").expect("valid regex"))
}

fn comment() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"#.*\r?\n").expect("valid regex"))
}

fn line_break() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\r?\n").expect("valid regex"))
}

/// Remove carriage returns
pub fn unwindow(text: &str) -> String {
    text.replace('\r', "")
}

/// Replace every line mentioning the word "error" (any case) with
/// [`ERROR_SENTINEL`]
pub fn redact_errors(text: &str) -> String {
    error_line()
        .replace_all(&unwindow(text), ERROR_SENTINEL)
        .into_owned()
}

/// Drop blank lines along with leading and trailing blanks of each line
pub fn strip_blank_and_edge_whitespace(text: &str) -> String {
    edge_whitespace()
        .replace_all(&unwindow(text), "")
        .into_owned()
}

/// Drop `#` comments up to and including the line break that ends them
pub fn strip_comments(text: &str) -> String {
    comment().replace_all(text, "").into_owned()
}

/// Break text into lines, ignoring trailing whitespace of the whole text
pub fn to_lines(text: &str) -> Vec<String> {
    line_break()
        .split(text.trim_end())
        .map(String::from)
        .collect()
}

//! Placeholder substitution for the greeting template.
//!
//! This file is also compiled into `build.rs`, so it may only depend on
//! `std` and `regex`.

use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Template used when nothing else is configured.
pub const DEFAULT_TEMPLATE: &str = "$MESSAGE";

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$(?:\{([A-Za-z_][A-Za-z0-9_]*)\}|([A-Za-z_][A-Za-z0-9_]*))")
        .expect("placeholder pattern is a valid regex")
});

fn placeholder_name<'t>(caps: &Captures<'t>) -> &'t str {
    caps.get(1)
        .or_else(|| caps.get(2))
        .map(|m| m.as_str())
        .unwrap_or_default()
}

/// Replaces `$NAME` and `${NAME}` tokens with values from `lookup`.
///
/// Tokens without a value are left in place untouched.
pub fn render<F>(template: &str, mut lookup: F) -> String
where
    F: FnMut(&str) -> Option<String>,
{
    PLACEHOLDER
        .replace_all(template, |caps: &Captures<'_>| {
            lookup(placeholder_name(caps)).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Distinct placeholder names in order of first appearance.
pub fn placeholders(template: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for caps in PLACEHOLDER.captures_iter(template) {
        let name = placeholder_name(&caps);
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    names
}

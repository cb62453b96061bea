//! Placeholder extraction from prompt text.
//!
//! Prompt bodies reference variables with the `{{name}}` syntax. This module
//! owns the placeholder grammar: scanning text for referenced names,
//! stripping a named placeholder, and substituting values for a local
//! preview.
//!
//! The grammar is deliberately small: `{{`, optional inline whitespace, an
//! identifier, optional inline whitespace, `}}`. An identifier starts with
//! an ASCII letter or underscore and continues with letters, digits, or
//! underscores. Matching is case-sensitive (`{{Name}}` and `{{name}}` are
//! distinct names). A placeholder never spans a line break, and malformed
//! brace sequences simply fail to match — prompt text is free-form user
//! content, so the scanner fails open rather than erroring.

use regex::{Captures, Regex};
use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

static PLACEHOLDER_RE: OnceLock<Regex> = OnceLock::new();

fn placeholder_re() -> &'static Regex {
    PLACEHOLDER_RE.get_or_init(|| {
        Regex::new(r"\{\{[ \t]*([A-Za-z_][A-Za-z0-9_]*)[ \t]*\}\}")
            .expect("placeholder pattern is a valid regex")
    })
}

/// Scans `text` and returns the distinct placeholder names it references,
/// in first-occurrence order.
///
/// Repeat occurrences of a name contribute only their first position to the
/// ordering and do not appear twice in the output.
///
/// # Example
///
/// ```
/// use promptdeck::extract_variables;
///
/// let names = extract_variables("Hello {{name}}, your order {{order_id}} is ready.");
/// assert_eq!(names, vec!["name", "order_id"]);
///
/// assert_eq!(extract_variables("{{a}} {{b}} {{a}}"), vec!["a", "b"]);
/// assert!(extract_variables("no placeholders here").is_empty());
/// ```
pub fn extract_variables(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut names = Vec::new();

    for caps in placeholder_re().captures_iter(text) {
        if let Some(name) = caps.get(1) {
            if seen.insert(name.as_str()) {
                names.push(name.as_str().to_string());
            }
        }
    }

    names
}

/// Returns `true` if `name` is a valid placeholder identifier.
///
/// Used to validate manually added variable names before they ever reach
/// prompt text.
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Removes every `{{name}}` occurrence (with any interior whitespace) from
/// `text`, returning the stripped copy.
///
/// The name is matched literally, so names containing regex metacharacters
/// cannot corrupt the pattern. Used by the remove operation, which must
/// strip the placeholder from every prompt body before the next
/// reconciliation pass would rediscover it.
pub fn strip_placeholder(text: &str, name: &str) -> String {
    let pattern = format!(r"\{{\{{\s*{}\s*\}}\}}", regex::escape(name));
    match Regex::new(&pattern) {
        Ok(re) => re.replace_all(text, "").into_owned(),
        Err(_) => text.to_string(),
    }
}

/// Substitutes placeholder occurrences in `text` with the supplied values.
///
/// Placeholders whose name has no entry in `values` are left verbatim, so a
/// partial preview never destroys unresolved references.
pub fn render_placeholders(text: &str, values: &HashMap<String, String>) -> String {
    placeholder_re()
        .replace_all(text, |caps: &Captures| {
            let name = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
            match values.get(name) {
                Some(value) => value.clone(),
                None => caps
                    .get(0)
                    .map(|m| m.as_str().to_string())
                    .unwrap_or_default(),
            }
        })
        .into_owned()
}

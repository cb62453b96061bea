//! The variable reconciler: merges freshly extracted placeholder names with
//! the previous variable list.
//!
//! This runs on every text edit, version switch, save, and version creation,
//! so its output order and preservation rules are contractual:
//!
//! 1. Every defined entry is carried forward unchanged, in its original
//!    relative order, whether or not its placeholder still appears in text.
//!    A human configured it; only an explicit remove action drops it.
//! 2. Genuinely new names are appended in extraction order as undefined,
//!    string-typed entries with an empty default.
//! 3. Undefined entries whose placeholder is still referenced survive in
//!    their original relative order; the rest are dropped. They were never
//!    configured, so there is nothing to preserve.

use crate::variable::Variable;
use std::collections::HashSet;

/// Computes the next variable list from the extracted name set and the
/// previous list.
///
/// Pure and deterministic: the inputs are not mutated, and identical inputs
/// always produce an identical list. Given a previous list with unique
/// names, the output names are unique.
///
/// # Example
///
/// ```
/// use promptdeck::{reconcile, Variable, VarType};
///
/// let prev = vec![Variable::defined("name", VarType::String, "")];
/// let extracted = vec!["name".to_string(), "city".to_string()];
///
/// let next = reconcile(&extracted, &prev);
/// assert_eq!(next[0], prev[0]);
/// assert_eq!(next[1], Variable::discovered("city"));
/// ```
pub fn reconcile(extracted: &[String], prev: &[Variable]) -> Vec<Variable> {
    let known: HashSet<&str> = prev.iter().map(|v| v.name.as_str()).collect();
    let in_text: HashSet<&str> = extracted.iter().map(String::as_str).collect();

    let mut next: Vec<Variable> = prev.iter().filter(|v| v.is_defined).cloned().collect();

    for name in extracted {
        if !known.contains(name.as_str()) {
            next.push(Variable::discovered(name.clone()));
        }
    }

    for var in prev.iter().filter(|v| !v.is_defined) {
        if in_text.contains(var.name.as_str()) {
            next.push(var.clone());
        }
    }

    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variable::VarType;

    fn names(vars: &[Variable]) -> Vec<&str> {
        vars.iter().map(|v| v.name.as_str()).collect()
    }

    #[test]
    fn test_defined_kept_undefined_dropped() {
        let prev = vec![
            Variable::defined("name", VarType::String, ""),
            Variable {
                default_value: "x".to_string(),
                ..Variable::discovered("old")
            },
        ];
        let next = reconcile(&["name".to_string()], &prev);
        assert_eq!(next, vec![prev[0].clone()]);
    }

    #[test]
    fn test_new_name_appended_as_undefined() {
        let prev = vec![Variable::defined("name", VarType::String, "")];
        let next = reconcile(&["name".to_string(), "city".to_string()], &prev);
        assert_eq!(next.len(), 2);
        assert_eq!(next[0], prev[0]);
        assert_eq!(next[1], Variable::discovered("city"));
    }

    #[test]
    fn test_empty_text_drops_all_undefined() {
        let prev = vec![Variable::discovered("a")];
        assert!(reconcile(&[], &prev).is_empty());
    }

    #[test]
    fn test_defined_survive_empty_text() {
        let prev = vec![Variable::defined("kept", VarType::Array, "[]")];
        assert_eq!(reconcile(&[], &prev), prev);
    }

    #[test]
    fn test_output_order_defined_new_undefined() {
        let prev = vec![
            Variable::discovered("u1"),
            Variable::defined("d1", VarType::String, ""),
            Variable::discovered("u2"),
            Variable::defined("d2", VarType::Number, "0"),
        ];
        let extracted: Vec<String> = ["fresh", "u2", "u1", "d1"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let next = reconcile(&extracted, &prev);
        assert_eq!(names(&next), vec!["d1", "d2", "fresh", "u1", "u2"]);
    }

    #[test]
    fn test_idempotent() {
        let prev = vec![
            Variable::defined("a", VarType::String, "x"),
            Variable::discovered("b"),
        ];
        let extracted = vec!["b".to_string(), "c".to_string()];

        let once = reconcile(&extracted, &prev);
        let twice = reconcile(&extracted, &once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_never_duplicates_names() {
        let prev = vec![
            Variable::defined("a", VarType::String, ""),
            Variable::discovered("b"),
        ];
        let extracted = vec!["a".to_string(), "b".to_string(), "c".to_string()];

        let next = reconcile(&extracted, &prev);
        let mut unique: Vec<&str> = names(&next);
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), next.len());
    }

    #[test]
    fn test_inputs_not_mutated() {
        let prev = vec![Variable::discovered("gone")];
        let extracted = vec!["fresh".to_string()];
        let _ = reconcile(&extracted, &prev);
        assert_eq!(prev, vec![Variable::discovered("gone")]);
        assert_eq!(extracted, vec!["fresh".to_string()]);
    }
}

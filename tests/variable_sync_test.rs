//! Behavioral properties of the extract + reconcile pipeline.

use promptdeck::{extract_variables, reconcile, sync_variables, PromptTexts, VarType, Variable};

#[test]
fn extraction_returns_first_occurrence_order() {
    let names = extract_variables("Hello {{name}}, your order {{order_id}} is ready.");
    assert_eq!(names, vec!["name", "order_id"]);
}

#[test]
fn extraction_ignores_duplicates() {
    assert_eq!(extract_variables("{{a}} {{b}} {{a}}"), vec!["a", "b"]);
}

#[test]
fn reconcile_keeps_defined_and_drops_stale_undefined() {
    let prev = vec![
        Variable::defined("name", VarType::String, ""),
        Variable {
            default_value: "x".to_string(),
            ..Variable::discovered("old")
        },
    ];
    let next = reconcile(&extract_variables("{{name}}"), &prev);
    assert_eq!(next, vec![prev[0].clone()]);
}

#[test]
fn reconcile_appends_new_names_after_defined() {
    let prev = vec![Variable::defined("name", VarType::String, "")];
    let next = reconcile(&extract_variables("{{name}} {{city}}"), &prev);
    assert_eq!(
        next,
        vec![prev[0].clone(), Variable::discovered("city")]
    );
}

#[test]
fn reconcile_empty_text_clears_undefined() {
    let prev = vec![Variable::discovered("a")];
    assert!(reconcile(&extract_variables(""), &prev).is_empty());
}

#[test]
fn reconcile_is_idempotent() {
    let texts = PromptTexts::new("{{a}} {{b}}", "{{c}}");
    let prev = vec![
        Variable::defined("a", VarType::Number, "1"),
        Variable::discovered("b"),
        Variable::discovered("stale"),
    ];

    let once = sync_variables(&texts, &prev);
    let twice = sync_variables(&texts, &once);
    assert_eq!(once, twice);
}

#[test]
fn reconcile_preserves_defined_regardless_of_text() {
    let defined = vec![
        Variable::defined("a", VarType::Array, "[]"),
        Variable::defined("b", VarType::Boolean, "true"),
    ];
    for text in ["", "{{a}}", "{{b}} {{a}}", "unrelated {{c}}"] {
        let next = reconcile(&extract_variables(text), &defined);
        assert_eq!(&next[..2], &defined[..]);
    }
}

#[test]
fn reconcile_discovers_with_default_shape() {
    let next = reconcile(&extract_variables("{{fresh}}"), &[]);
    assert_eq!(
        next,
        vec![Variable {
            name: "fresh".to_string(),
            var_type: VarType::String,
            default_value: String::new(),
            is_defined: false,
        }]
    );
}

#[test]
fn reconcile_output_names_are_unique() {
    let prev = vec![
        Variable::defined("a", VarType::String, ""),
        Variable::discovered("b"),
    ];
    let next = reconcile(&extract_variables("{{a}} {{b}} {{c}} {{a}}"), &prev);

    let mut names: Vec<&str> = next.iter().map(|v| v.name.as_str()).collect();
    let total = names.len();
    names.sort();
    names.dedup();
    assert_eq!(names.len(), total);
}

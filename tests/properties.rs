use flex_context as fc;
use fc::{ActiveValues, Change, ContextDefinition, ContextParameter};
use proptest::prelude::*;
use serde_json::{json, Value};

fn ids() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-e]{1,2}", 0..6)
}

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i32>().prop_map(|n| json!(n)),
        "[a-z]{0,4}".prop_map(Value::String),
    ]
}

proptest! {
    #[test]
    fn untagged_changes_always_apply(active in ids()) {
        prop_assert!(fc::is_definition_applicable(&Change::default(), &active));
        prop_assert!(fc::is_definition_applicable(&Change::with_context(""), &active));
    }

    #[test]
    fn tagged_changes_apply_iff_member(tag in "[a-e]{1,2}", active in ids()) {
        let expected = active.contains(&tag);
        prop_assert_eq!(fc::is_definition_applicable(&Change::with_context(tag), &active), expected);
    }

    #[test]
    fn empty_definition_is_active(values in prop::collection::btree_map("[a-z]{1,3}", scalar(), 0..5)) {
        let active: ActiveValues = values.into_iter().collect();
        prop_assert!(fc::evaluate_definition(&ContextDefinition::new("x", vec![]), &active));
    }

    #[test]
    fn ne_negates_eq(expected in scalar(), current in prop::option::of(scalar())) {
        let mut active = ActiveValues::new();
        if let Some(v) = current {
            active.insert("s".into(), v);
        }
        let eq = ContextParameter::new("s", "EQ", expected.clone());
        let ne = ContextParameter::new("s", "NE", expected);
        prop_assert_ne!(fc::evaluate_parameter(&eq, &active), fc::evaluate_parameter(&ne, &active));
    }

    #[test]
    fn unknown_operators_never_match(op in "[A-Z]{3,5}", v in scalar()) {
        prop_assume!(op != "EQ" && op != "NE");
        let mut active = ActiveValues::new();
        active.insert("s".into(), v.clone());
        prop_assert!(!fc::evaluate_parameter(&ContextParameter::new("s", op.as_str(), v), &active));
    }

    #[test]
    fn definition_is_and_of_parameters(flags in prop::collection::vec(any::<bool>(), 0..6)) {
        let mut active = ActiveValues::new();
        active.insert("s".into(), json!("on"));
        let params = flags
            .iter()
            .map(|hit| ContextParameter::new("s", "EQ", json!(if *hit { "on" } else { "off" })))
            .collect();
        let def = ContextDefinition::new("d", params);
        prop_assert_eq!(fc::evaluate_definition(&def, &active), flags.iter().all(|f| *f));
    }
}

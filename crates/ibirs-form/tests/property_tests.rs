//! Property tests: format interpretation is total, synthesis never panics
//! and never invents or leaks parameter names.

use ibirs_client::{ParameterDescriptor, ParameterKind, ParameterOption, ParameterSchema};
use ibirs_form::{prompt_action, synthesize, ControlKind, FormatCode, PromptAction};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

prop_compose! {
    fn arb_option()(key in "[A-Z0-9]{1,4}", label in "[A-Za-z ]{0,8}") -> ParameterOption {
        ParameterOption { key, label }
    }
}

prop_compose! {
    fn arb_descriptor()(
        name in prop_oneof![
            "[A-Z][A-Z0-9_]{0,11}",
            Just("prompt_YYMD".to_string()),
            Just("prompt_YYM".to_string()),
            Just("prompt_COUNTRY".to_string()),
            "prompt_[A-Z]{1,6}",
        ],
        kind in prop_oneof![
            Just(ParameterKind::DefaultType),
            Just(ParameterKind::Unresolved),
        ],
        format in prop_oneof![Just(String::new()), "[AIPD][0-9]{0,3}", "[A-Z]{1,4}"],
        description in "[a-zあ-ん ]{0,8}",
        default_value in "[A-Z0-9]{0,6}",
        options in proptest::collection::vec(arb_option(), 0..4),
    ) -> ParameterDescriptor {
        ParameterDescriptor { name, kind, format, description, default_value, options }
    }
}

fn arb_schema() -> impl Strategy<Value = ParameterSchema> {
    (
        proptest::option::of("[A-Za-z ]{1,12}"),
        proptest::collection::vec(arb_descriptor(), 0..12),
    )
        .prop_map(|(display_name, parameters)| ParameterSchema {
            display_name,
            parameters,
        })
}

// ============================================================================
// Format codes
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn format_parse_is_total(code in ".{0,16}") {
        let _ = FormatCode::parse(&code);
    }

    #[test]
    fn alpha_lengths_round_trip(n in 1u32..=9999) {
        prop_assert_eq!(
            FormatCode::parse(&format!("A{n}")),
            FormatCode::Alpha { max_len: Some(n) }
        );
    }

    #[test]
    fn numeric_prefixes_always_map_to_numeric(tail in "[0-9.]{0,6}", prefix in "[IPD]") {
        prop_assert_eq!(FormatCode::parse(&format!("{prefix}{tail}")), FormatCode::Numeric);
    }
}

// ============================================================================
// Synthesis
// ============================================================================

proptest! {
    #[test]
    fn synthesis_is_total_and_name_faithful(schema in arb_schema()) {
        let form = synthesize(&schema);

        prop_assert!(form.controls.len() <= schema.parameters.len());
        for control in &form.controls {
            prop_assert!(
                schema.parameters.iter().any(|p| p.name == control.name),
                "control {} not in schema", control.name
            );
            prop_assert_ne!(
                prompt_action(&control.name),
                Some(PromptAction::Suppress)
            );
        }
    }

    #[test]
    fn submission_covers_exactly_the_rendered_controls(schema in arb_schema()) {
        let form = synthesize(&schema);
        let pairs = form.submission(&form.initial_values());

        prop_assert_eq!(pairs.len(), form.controls.len());
        for (pair, control) in pairs.iter().zip(&form.controls) {
            prop_assert_eq!(&pair.0, &control.name);
        }
    }

    #[test]
    fn country_controls_always_carry_the_fixed_set(schema in arb_schema()) {
        let form = synthesize(&schema);
        for control in &form.controls {
            if control.name.contains("prompt_COUNTRY") {
                match &control.kind {
                    ControlKind::Choice { options } => {
                        let keys: Vec<&str> = options.iter().map(|o| o.key.as_str()).collect();
                        prop_assert_eq!(keys, vec!["JAPAN", "ENGLAND", "ITALY"]);
                    }
                    other => prop_assert!(false, "expected a choice, got {:?}", other),
                }
            }
        }
    }
}

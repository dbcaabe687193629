//! Schema → form synthesis.
//!
//! Pure and total: any well-formed [`ParameterSchema`] yields a
//! [`FormSpec`], an empty schema included. Control order is schema order,
//! except the prompt-name specials render ahead of everything else:
//! country choices first (source order among themselves), then the date
//! picker, then the month picker.

use chrono::Utc;
use ibirs_client::{ParameterDescriptor, ParameterOption, ParameterSchema};

use crate::control::{ControlKind, ControlSpec, FormSpec};
use crate::format::FormatCode;
use crate::rules::{
    prompt_action, PromptAction, COUNTRY_LABEL, COUNTRY_OPTIONS, DATE_FALLBACK_LABEL,
    MONTH_FALLBACK_LABEL,
};

/// Build the form specification for one parameter schema.
pub fn synthesize(schema: &ParameterSchema) -> FormSpec {
    let mut countries = Vec::new();
    let mut date = None;
    let mut month = None;
    let mut generic = Vec::new();

    for descriptor in &schema.parameters {
        match prompt_action(&descriptor.name) {
            Some(PromptAction::CountryChoice) => countries.push(country_control(descriptor)),
            Some(PromptAction::DatePicker) => date = Some(date_control(descriptor)),
            Some(PromptAction::MonthPicker) => month = Some(month_control(descriptor)),
            Some(PromptAction::Suppress) => {}
            None => generic.push(generic_control(descriptor)),
        }
    }

    let mut controls = countries;
    controls.extend(date);
    controls.extend(month);
    controls.extend(generic);

    FormSpec {
        title: schema.display_name.clone(),
        controls,
    }
}

fn country_control(descriptor: &ParameterDescriptor) -> ControlSpec {
    let options = COUNTRY_OPTIONS
        .iter()
        .map(|country| ParameterOption {
            key: country.to_string(),
            label: country.to_string(),
        })
        .collect();
    ControlSpec {
        name: descriptor.name.clone(),
        label: COUNTRY_LABEL.to_string(),
        initial: COUNTRY_OPTIONS[0].to_string(),
        kind: ControlKind::Choice { options },
    }
}

fn date_control(descriptor: &ParameterDescriptor) -> ControlSpec {
    ControlSpec {
        name: descriptor.name.clone(),
        label: label_or(&descriptor.description, DATE_FALLBACK_LABEL),
        initial: if descriptor.default_value.is_empty() {
            today()
        } else {
            descriptor.default_value.clone()
        },
        kind: ControlKind::Date,
    }
}

fn month_control(descriptor: &ParameterDescriptor) -> ControlSpec {
    ControlSpec {
        name: descriptor.name.clone(),
        label: label_or(&descriptor.description, MONTH_FALLBACK_LABEL),
        initial: if descriptor.default_value.is_empty() {
            current_month()
        } else {
            descriptor.default_value.clone()
        },
        kind: ControlKind::Month,
    }
}

fn generic_control(descriptor: &ParameterDescriptor) -> ControlSpec {
    let name = descriptor.name.clone();
    let label = label_or(&descriptor.description, &descriptor.name);

    if !descriptor.options.is_empty() {
        // A choice can only ever submit one of its option keys, so the
        // declared default counts only when it names one.
        let initial = if !descriptor.default_value.is_empty()
            && descriptor
                .options
                .iter()
                .any(|option| option.key == descriptor.default_value)
        {
            descriptor.default_value.clone()
        } else {
            descriptor.options[0].key.clone()
        };
        return ControlSpec {
            name,
            label,
            initial,
            kind: ControlKind::Choice {
                options: descriptor.options.clone(),
            },
        };
    }

    let kind = match FormatCode::parse(&descriptor.format) {
        FormatCode::Alpha { max_len } => ControlKind::Text { max_len },
        FormatCode::Numeric => ControlKind::Number,
        FormatCode::Other => ControlKind::Text { max_len: None },
    };
    ControlSpec {
        name,
        label,
        initial: descriptor.default_value.clone(),
        kind,
    }
}

fn label_or(description: &str, fallback: &str) -> String {
    if description.is_empty() {
        fallback.to_string()
    } else {
        description.to_string()
    }
}

/// Current UTC calendar date, `YYYY-MM-DD`.
fn today() -> String {
    Utc::now().format("%Y-%m-%d").to_string()
}

/// Current UTC year-month, `YYYY-MM`.
fn current_month() -> String {
    Utc::now().format("%Y-%m").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ibirs_client::ParameterKind;

    fn descriptor(name: &str) -> ParameterDescriptor {
        ParameterDescriptor {
            name: name.to_string(),
            kind: ParameterKind::Unresolved,
            format: String::new(),
            description: String::new(),
            default_value: String::new(),
            options: Vec::new(),
        }
    }

    fn schema(parameters: Vec<ParameterDescriptor>) -> ParameterSchema {
        ParameterSchema {
            display_name: None,
            parameters,
        }
    }

    fn option(key: &str, label: &str) -> ParameterOption {
        ParameterOption {
            key: key.to_string(),
            label: label.to_string(),
        }
    }

    #[test]
    fn specials_render_ahead_of_generics_in_fixed_order() {
        let mut limit = descriptor("LIMIT");
        limit.format = "I6".to_string();
        let form = synthesize(&schema(vec![
            limit,
            descriptor("prompt_YYM"),
            descriptor("prompt_YYMD"),
            descriptor("prompt_COUNTRY"),
            descriptor("REGION"),
        ]));

        let names: Vec<&str> = form.controls.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["prompt_COUNTRY", "prompt_YYMD", "prompt_YYM", "LIMIT", "REGION"]
        );
    }

    #[test]
    fn country_choice_is_fixed_regardless_of_declared_options() {
        let mut country = descriptor("prompt_COUNTRY");
        country.options = vec![option("US", "United States")];
        country.default_value = "US".to_string();
        country.description = "国名".to_string();

        let form = synthesize(&schema(vec![country]));
        let control = &form.controls[0];
        assert_eq!(control.label, "国を選択してください");
        assert_eq!(control.initial, "JAPAN");
        match &control.kind {
            ControlKind::Choice { options } => {
                let keys: Vec<&str> = options.iter().map(|o| o.key.as_str()).collect();
                assert_eq!(keys, vec!["JAPAN", "ENGLAND", "ITALY"]);
            }
            other => panic!("expected a choice, got {other:?}"),
        }
    }

    #[test]
    fn every_country_match_gets_its_own_control() {
        let form = synthesize(&schema(vec![
            descriptor("prompt_COUNTRY"),
            descriptor("prompt_COUNTRY2"),
        ]));
        let names: Vec<&str> = form.controls.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["prompt_COUNTRY", "prompt_COUNTRY2"]);
        assert!(form
            .controls
            .iter()
            .all(|c| matches!(c.kind, ControlKind::Choice { .. })));
    }

    #[test]
    fn date_picker_defaults_to_today_with_fallback_label() {
        let before = today();
        let form = synthesize(&schema(vec![descriptor("prompt_YYMD")]));
        let after = today();

        let control = &form.controls[0];
        assert_eq!(control.kind, ControlKind::Date);
        assert_eq!(control.label, "年月日を選択してください");
        // Window, in case the test straddles UTC midnight.
        assert!(control.initial == before || control.initial == after);
    }

    #[test]
    fn date_picker_honors_a_declared_default() {
        let mut date = descriptor("prompt_YYMD");
        date.default_value = "2024-04-01".to_string();
        date.description = "集計日".to_string();

        let control = &synthesize(&schema(vec![date])).controls[0];
        assert_eq!(control.initial, "2024-04-01");
        assert_eq!(control.label, "集計日");
    }

    #[test]
    fn month_picker_defaults_to_current_month() {
        let before = current_month();
        let form = synthesize(&schema(vec![descriptor("prompt_YYM")]));
        let after = current_month();

        let control = &form.controls[0];
        assert_eq!(control.kind, ControlKind::Month);
        assert_eq!(control.label, "年月を選択してください");
        assert!(control.initial == before || control.initial == after);
    }

    #[test]
    fn unmatched_prompt_names_are_fully_suppressed() {
        let form = synthesize(&schema(vec![
            descriptor("prompt_REGION"),
            descriptor("REGION"),
        ]));

        let names: Vec<&str> = form.controls.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["REGION"]);
        assert!(!form.initial_values().contains_key("prompt_REGION"));
        let pairs = form.submission(&form.initial_values());
        assert!(pairs.iter().all(|(name, _)| name != "prompt_REGION"));
    }

    #[test]
    fn declared_options_become_a_choice_submitting_keys() {
        let mut region = descriptor("REGION");
        region.description = "地域".to_string();
        region.options = vec![option("E", "East"), option("W", "West")];
        region.default_value = "W".to_string();

        let control = &synthesize(&schema(vec![region])).controls[0];
        assert_eq!(control.label, "地域");
        assert_eq!(control.initial, "W");
        match &control.kind {
            ControlKind::Choice { options } => {
                assert_eq!(options[0].label, "East");
                assert_eq!(options[1].key, "W");
            }
            other => panic!("expected a choice, got {other:?}"),
        }
    }

    #[test]
    fn choice_default_that_names_no_option_falls_to_the_first_key() {
        let mut region = descriptor("REGION");
        region.options = vec![option("E", "East"), option("W", "West")];
        region.default_value = "NORTH".to_string();
        let control = &synthesize(&schema(vec![region])).controls[0];
        assert_eq!(control.initial, "E");

        let mut region = descriptor("REGION");
        region.options = vec![option("E", "East")];
        let control = &synthesize(&schema(vec![region])).controls[0];
        assert_eq!(control.initial, "E");
    }

    #[test]
    fn format_codes_refine_text_controls() {
        let mut name = descriptor("NAME");
        name.format = "A8".to_string();
        name.default_value = "TANAKA".to_string();
        let mut note = descriptor("NOTE");
        note.format = "A".to_string();
        let mut limit = descriptor("LIMIT");
        limit.format = "P12.2".to_string();
        let mut plain = descriptor("PLAIN");
        plain.format = "YYMD".to_string();

        let form = synthesize(&schema(vec![name, note, limit, plain]));
        assert_eq!(form.controls[0].kind, ControlKind::Text { max_len: Some(8) });
        assert_eq!(form.controls[0].initial, "TANAKA");
        assert_eq!(form.controls[1].kind, ControlKind::Text { max_len: None });
        assert_eq!(form.controls[2].kind, ControlKind::Number);
        assert_eq!(form.controls[3].kind, ControlKind::Text { max_len: None });
    }

    #[test]
    fn generic_label_falls_back_to_the_name() {
        let control = &synthesize(&schema(vec![descriptor("REGION")])).controls[0];
        assert_eq!(control.label, "REGION");
    }

    #[test]
    fn empty_schema_yields_a_working_empty_form() {
        let form = synthesize(&ParameterSchema::default());
        assert_eq!(form.title, None);
        assert!(form.is_empty());
        assert!(form.submission(&form.initial_values()).is_empty());
    }

    #[test]
    fn title_comes_from_the_display_name() {
        let schema = ParameterSchema {
            display_name: Some("売上レポート".to_string()),
            parameters: Vec::new(),
        };
        assert_eq!(synthesize(&schema).title.as_deref(), Some("売上レポート"));
    }
}

//! The synthesized form model.
//!
//! A [`FormSpec`] is what a rendering surface consumes: a heading plus
//! controls in display order. It owns no widgets; the CLI prints it, a web
//! front end would build inputs from it, and tests assert on it directly.

use std::collections::BTreeMap;

use ibirs_client::ParameterOption;
use serde::{Deserialize, Serialize};

/// Live form state: parameter name → entered value. Seeded from the control
/// initials, overlaid by user edits, consumed at submission.
pub type ValueMap = BTreeMap<String, String>;

/// What kind of input a control is, with its type-specific constraints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ControlKind {
    /// Free text, optionally length-clamped.
    Text {
        #[serde(skip_serializing_if = "Option::is_none")]
        max_len: Option<u32>,
    },
    /// Numeric entry, fractional values allowed.
    Number,
    /// Calendar date, `YYYY-MM-DD`.
    Date,
    /// Year and month, `YYYY-MM`.
    Month,
    /// Closed choice: surfaces display `label`, submissions carry `key`.
    Choice { options: Vec<ParameterOption> },
}

/// One rendered input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlSpec {
    pub name: String,
    pub label: String,
    /// Starting value; already resolved, never empty-by-accident (choice
    /// controls start on a real option key, pickers on a real date).
    pub initial: String,
    #[serde(flatten)]
    pub kind: ControlKind,
}

/// A complete synthesized form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormSpec {
    /// Heading, from the schema's display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Controls in display order.
    pub controls: Vec<ControlSpec>,
}

impl FormSpec {
    /// A zero-control form is valid; submitting it yields no pairs.
    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    /// Seed a value map with one entry per control.
    pub fn initial_values(&self) -> ValueMap {
        self.controls
            .iter()
            .map(|control| (control.name.clone(), control.initial.clone()))
            .collect()
    }

    /// Collect the submission pairs in control order. Controls missing from
    /// the map fall back to their initial value; map keys that name no
    /// control are ignored.
    pub fn submission(&self, values: &ValueMap) -> Vec<(String, String)> {
        self.controls
            .iter()
            .map(|control| {
                let value = values
                    .get(&control.name)
                    .cloned()
                    .unwrap_or_else(|| control.initial.clone());
                (control.name.clone(), value)
            })
            .collect()
    }
}

//! Parameter discovery: `describeFex` responses → [`ParameterSchema`].
//!
//! The describe response nests three things we care about:
//!
//! ```text
//! ibfsrpc
//! └── rootObject                  report metadata (attributes)
//!     ├── bindingInfo             key/value pairs, IBFS_displayName = heading
//!     └── amperMap                one entry per report variable
//!         └── entry
//!             ├── key value="NAME"
//!             └── value format=".." description=".."
//!                 ├── type name="defaultType" | "unresolved" | ...
//!                 ├── values          enumerated options (entry key/value)
//!                 └── userDefValues   declared defaults (item value="..")
//! ```
//!
//! Only `defaultType` and `unresolved` variables reach the schema; the
//! platform has already resolved everything else, so prompting for those
//! would be wrong.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::xml::Element;

/// Wire `type` names that make a variable eligible for prompting.
const TYPE_DEFAULT: &str = "defaultType";
const TYPE_UNRESOLVED: &str = "unresolved";

/// Eligibility class of a parameter, from the wire `type` element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterKind {
    /// Declared with `-DEFAULT`; the report runs without input, the declared
    /// value is only a starting point.
    DefaultType,
    /// Referenced but never given a value; the report cannot run without it.
    Unresolved,
}

/// One enumerated value of a closed-choice parameter. `key` is what gets
/// submitted, `label` what a surface displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterOption {
    pub key: String,
    pub label: String,
}

/// One declared or inferred input to a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterDescriptor {
    pub name: String,
    pub kind: ParameterKind,
    /// Format code, e.g. `A8` or `D12.2`. Empty when the server sent none.
    pub format: String,
    /// Human label; empty when absent. Label resolution falls back to `name`.
    pub description: String,
    /// First declared default, empty string if none.
    pub default_value: String,
    /// Non-empty means the parameter is a closed choice set.
    pub options: Vec<ParameterOption>,
}

/// Everything a form needs to know about one report's inputs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParameterSchema {
    /// Form heading, from the `IBFS_displayName` binding entry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Eligible parameters in source order.
    pub parameters: Vec<ParameterDescriptor>,
}

impl ParameterSchema {
    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }
}

/// Assemble a schema from a parsed describe response document.
///
/// Missing optional structure always resolves to an empty value, never an
/// error. Names are unique in the result; when the source repeats a name the
/// last occurrence wins (keeping the first occurrence's position).
pub(crate) fn schema_from_document(doc: &Element) -> ParameterSchema {
    let display_name = binding_value(doc, "IBFS_displayName");

    let mut parameters: Vec<ParameterDescriptor> = Vec::new();
    if let Some(amper_map) = doc.find("amperMap") {
        for entry in amper_map.children_named("entry") {
            let Some(descriptor) = descriptor_from_entry(entry) else {
                continue;
            };
            match parameters.iter_mut().find(|d| d.name == descriptor.name) {
                Some(existing) => {
                    warn!(name = %descriptor.name, "duplicate variable name, keeping last");
                    *existing = descriptor;
                }
                None => parameters.push(descriptor),
            }
        }
    }

    ParameterSchema {
        display_name,
        parameters,
    }
}

/// Look up one `bindingInfo` entry by key. Entries with a blank key or value
/// are ignored.
fn binding_value(doc: &Element, wanted: &str) -> Option<String> {
    let binding_info = doc.find("bindingInfo")?;
    for entry in binding_info.children_named("entry") {
        let key = entry.child("key").and_then(|k| k.attr("value"));
        let value = entry.child("value").and_then(|v| v.attr("value"));
        if let (Some(key), Some(value)) = (key, value) {
            if key == wanted && !value.is_empty() {
                return Some(value.to_string());
            }
        }
    }
    None
}

fn descriptor_from_entry(entry: &Element) -> Option<ParameterDescriptor> {
    let name = entry
        .child("key")
        .and_then(|k| k.attr("value"))
        .unwrap_or("");
    if name.is_empty() {
        warn!("amperMap entry without a variable name, skipping");
        return None;
    }

    let value = entry.child("value")?;
    let type_name = value
        .find("type")
        .and_then(|t| t.attr("name"))
        .unwrap_or("");
    let kind = match type_name {
        TYPE_DEFAULT => ParameterKind::DefaultType,
        TYPE_UNRESOLVED => ParameterKind::Unresolved,
        other => {
            debug!(name = %name, r#type = %other, "variable already resolved, skipping");
            return None;
        }
    };

    let default_value = value
        .find("userDefValues")
        .and_then(|list| list.children_named("item").next())
        .and_then(|item| item.attr("value"))
        .unwrap_or("")
        .to_string();

    let options = value
        .find("values")
        .map(|values| {
            values
                .children_named("entry")
                .map(|option| ParameterOption {
                    key: option
                        .child("key")
                        .and_then(|k| k.attr("value"))
                        .unwrap_or("")
                        .to_string(),
                    label: option
                        .child("value")
                        .and_then(|v| v.attr("value"))
                        .unwrap_or("")
                        .to_string(),
                })
                .collect()
        })
        .unwrap_or_default();

    Some(ParameterDescriptor {
        name: name.to_string(),
        kind,
        format: value.attr_or_empty("format").to_string(),
        description: value.attr_or_empty("description").to_string(),
        default_value,
        options,
    })
}

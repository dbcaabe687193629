//! Sign-on session state.
//!
//! The platform keeps the real session in cookies; this type carries the
//! user metadata and the CSRF token echoed back by `signOn` so later POST
//! requests can present it.

use serde::{Deserialize, Serialize};

use crate::xml::Element;

/// CSRF header captured at sign-on. The header NAME itself is dynamic; both
/// halves come from the response `properties` entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CsrfToken {
    pub name: String,
    pub value: String,
}

/// A signed-on user, as described by the `signOn` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user_name: String,
    /// Human display name. Falls back to `user_name` when the server sends a
    /// blank description.
    pub display_name: String,
    pub full_path: String,
    pub csrf: Option<CsrfToken>,
}

impl Session {
    /// Extract session state from a parsed `signOn` response document.
    pub(crate) fn from_document(doc: &Element) -> Self {
        let mut csrf_name = None;
        let mut csrf_value = None;
        if let Some(properties) = doc.find("properties") {
            for entry in properties.children_named("entry") {
                match entry.attr("key") {
                    Some("IBI_CSRF_Token_Name") => csrf_name = entry.attr("value"),
                    Some("IBI_CSRF_Token_Value") => csrf_value = entry.attr("value"),
                    _ => {}
                }
            }
        }
        let csrf = match (csrf_name, csrf_value) {
            (Some(name), Some(value)) if !name.is_empty() && !value.is_empty() => {
                Some(CsrfToken {
                    name: name.to_string(),
                    value: value.to_string(),
                })
            }
            _ => None,
        };

        let mut user_name = String::new();
        let mut display_name = String::new();
        let mut full_path = String::new();
        if let Some(root_object) = doc.find("rootObject") {
            user_name = root_object.attr_or_empty("name").to_string();
            display_name = root_object.attr_or_empty("description").to_string();
            full_path = root_object.attr_or_empty("fullPath").to_string();
        }
        if display_name.trim().is_empty() {
            display_name = user_name.clone();
        }

        Session {
            user_name,
            display_name,
            full_path,
            csrf,
        }
    }
}

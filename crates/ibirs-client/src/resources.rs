//! Repository folder listings.

use serde::{Deserialize, Serialize};

use crate::xml::Element;

/// One child of a repository folder, as returned by `IBIRS_action=get`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceItem {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub full_path: String,
    /// Wire `type` attribute, e.g. `MRFolder` or `FexFile`.
    pub kind: String,
    pub type_description: String,
    pub thumb_path: String,
    pub created_by: String,
    pub last_modified: String,
    pub container: bool,
    pub policy: String,
}

/// Extract folder items from a parsed `get` response document. Items live
/// under `rootObject > children > item`; a childless folder yields an empty
/// list.
pub(crate) fn items_from_document(doc: &Element) -> Vec<ResourceItem> {
    let Some(children) = doc.find("rootObject").and_then(|r| r.child("children")) else {
        return Vec::new();
    };
    children
        .children_named("item")
        .map(|item| ResourceItem {
            name: item.attr_or_empty("name").to_string(),
            description: item.attr("description").map(str::to_string),
            full_path: item.attr_or_empty("fullPath").to_string(),
            kind: item.attr_or_empty("type").to_string(),
            type_description: item.attr_or_empty("typeDescription").to_string(),
            thumb_path: item.attr_or_empty("thumbPath").to_string(),
            created_by: item.attr_or_empty("createdBy").to_string(),
            last_modified: item.attr_or_empty("lastModified").to_string(),
            container: item.attr_or_empty("container") == "true",
            policy: item.attr_or_empty("policy").to_string(),
        })
        .collect()
}

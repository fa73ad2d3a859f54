use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const FIELD_SELECT: &str = "field-select";

/// Form configuration as the host serializes it for its UI layer. Handlers
/// may append fields and default values before it reaches the client; host
/// keys this service does not model ride along in `rest`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FormConfig {
    pub id: String,
    pub action: String,
    #[serde(default)]
    pub fields: Vec<FormField>,
    #[serde(default)]
    pub values: Map<String, Value>,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    pub name: String,
    pub component: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub options: Vec<FieldOption>,
    pub value: Value,
    #[serde(default)]
    pub is_required: bool,
    pub group_id: String,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldOption {
    pub value: i64,
    pub label: String,
}

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const VALIDATION_NULLABLE: &str = "nullable";

/// The entity schema payload the host passes through its schema-definition
/// extension points. Handlers add properties and hand it back; everything
/// the host put there that this service does not model rides along in
/// `rest`. Property declaration order is the host's and must survive the
/// round trip, so the map is insertion-ordered.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Schema {
    #[serde(default)]
    pub properties: IndexMap<String, Property>,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum PropertyKind {
    Boolean,
    Integer,
    Number,
    String,
    Array,
    Object,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    #[serde(rename = "type")]
    pub kind: PropertyKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Property>>,
    #[serde(default)]
    pub api_summary: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub write_disabled_in_api: Option<bool>,
    #[serde(default)]
    pub validation: Vec<String>,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

impl Property {
    pub fn new(kind: PropertyKind) -> Self {
        Self {
            kind,
            items: None,
            api_summary: false,
            write_disabled_in_api: None,
            validation: Vec::new(),
            rest: Map::new(),
        }
    }

    pub fn boolean() -> Self {
        Self::new(PropertyKind::Boolean)
    }

    pub fn integer() -> Self {
        Self::new(PropertyKind::Integer)
    }

    pub fn array_of(items: Property) -> Self {
        let mut property = Self::new(PropertyKind::Array);
        property.items = Some(Box::new(items));
        property
    }

    pub fn nullable(mut self) -> Self {
        self.validation.push(VALIDATION_NULLABLE.to_string());
        self
    }

    pub fn api_summary(mut self, api_summary: bool) -> Self {
        self.api_summary = api_summary;
        self
    }

    pub fn writable(mut self) -> Self {
        self.write_disabled_in_api = Some(false);
        self
    }
}

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Where a method parameter is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaLocation {
    Query,
    Path,
}

/// A Discovery JSON Schema fragment: a schema, a property, or a method parameter.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonSchema {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(rename = "$ref", skip_serializing_if = "Option::is_none")]
    pub x_ref: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "default", skip_serializing_if = "Option::is_none")]
    pub default_value: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub repeated: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<SchemaLocation>,

    // Object properties
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, JsonSchema>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<Box<JsonSchema>>,

    // Array items
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<JsonSchema>>,

    // Enum values
    #[serde(rename = "enum", default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub enum_descriptions: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<String>,
}

impl JsonSchema {
    pub fn is_required(&self) -> bool {
        self.required.unwrap_or(false)
    }

    pub fn is_repeated(&self) -> bool {
        self.repeated.unwrap_or(false)
    }

    pub fn type_is(&self, name: &str) -> bool {
        self.schema_type.as_deref() == Some(name)
    }

    /// The `default` keyword as source text: strings verbatim, other scalars in JSON form.
    pub fn default_text(&self) -> Option<String> {
        self.default_value.as_ref().map(|v| match v {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_property_schema() {
        let json = r#"{
            "type": "string",
            "description": "Status of the book.",
            "enum": ["draft", "published"],
            "enumDescriptions": ["Not yet out.", "On shelves."],
            "default": "draft"
        }"#;
        let schema: JsonSchema = serde_json::from_str(json).unwrap();
        assert!(schema.type_is("string"));
        assert_eq!(schema.enum_values, vec!["draft", "published"]);
        assert_eq!(schema.enum_descriptions.len(), 2);
        assert_eq!(schema.default_text().as_deref(), Some("draft"));
        assert!(!schema.is_required());
    }

    #[test]
    fn test_parse_parameter_schema() {
        let json = r#"{"type": "integer", "format": "int32", "location": "query", "repeated": true, "default": 10}"#;
        let schema: JsonSchema = serde_json::from_str(json).unwrap();
        assert_eq!(schema.location, Some(SchemaLocation::Query));
        assert!(schema.is_repeated());
        assert_eq!(schema.default_text().as_deref(), Some("10"));
    }

    #[test]
    fn test_parse_nested_items_and_ref() {
        let json = r#"{
            "type": "array",
            "items": {"$ref": "Book"}
        }"#;
        let schema: JsonSchema = serde_json::from_str(json).unwrap();
        let items = schema.items.as_ref().unwrap();
        assert_eq!(items.x_ref.as_deref(), Some("Book"));
    }
}

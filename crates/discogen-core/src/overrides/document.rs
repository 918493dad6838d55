use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Per-service override file (`<service>.override.json`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OverrideDocument {
    /// Enum id -> raw value -> case name.
    pub enums: IndexMap<String, IndexMap<String, String>>,
    pub service_class: OverrideServiceClass,
    /// Model class name -> overrides.
    pub model_classes: IndexMap<String, OverrideModelClass>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OverrideServiceClass {
    /// Global query param name -> override.
    pub params: IndexMap<String, OverrideProperty>,
    /// Method id without the service segment -> override.
    pub methods: IndexMap<String, OverrideMethod>,
    /// Generated scope case name -> replacement.
    pub scopes_enum: IndexMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OverrideProperty {
    pub name: Option<String>,
    pub default_value: Option<String>,
    #[serde(rename = "type")]
    pub type_name: Option<String>,
    pub has_default_value: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OverrideMethod {
    pub base_name: Option<String>,
    pub full_method_name: Option<String>,
    /// Positional index (as a string) -> argument label.
    pub param_names: IndexMap<String, String>,
    pub query_params: IndexMap<String, OverrideProperty>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OverrideModelClass {
    pub properties: IndexMap<String, OverrideProperty>,
    #[serde(rename = "type")]
    pub type_name: Option<String>,
}

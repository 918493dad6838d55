use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::schema::JsonSchema;

/// Top-level Discovery REST description.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveryDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub version: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_path: Option<String>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub parameters: IndexMap<String, JsonSchema>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub schemas: IndexMap<String, JsonSchema>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub resources: IndexMap<String, Resource>,

    /// Methods declared directly on the API rather than on a resource.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub methods: IndexMap<String, RestMethod>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth: Option<Auth>,
}

impl DiscoveryDocument {
    /// OAuth scopes in document order, or an empty map.
    pub fn oauth_scopes(&self) -> IndexMap<String, OAuthScope> {
        self.auth
            .as_ref()
            .and_then(|a| a.oauth2.as_ref())
            .map(|o| o.scopes.clone())
            .unwrap_or_default()
    }

    /// Total number of methods, counting nested resources.
    pub fn method_count(&self) -> usize {
        self.methods.len() + self.resources.values().map(Resource::method_count).sum::<usize>()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Auth {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oauth2: Option<OAuth2>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OAuth2 {
    #[serde(default)]
    pub scopes: IndexMap<String, OAuthScope>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OAuthScope {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A resource groups methods and may nest further resources.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Resource {
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub methods: IndexMap<String, RestMethod>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub resources: IndexMap<String, Resource>,
}

impl Resource {
    pub fn method_count(&self) -> usize {
        self.methods.len() + self.resources.values().map(Resource::method_count).sum::<usize>()
    }
}

/// A single REST method.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestMethod {
    /// Dotted identifier, e.g. `books.volumes.list`.
    pub id: String,

    pub path: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub flat_path: Option<String>,

    pub http_method: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub parameters: IndexMap<String, JsonSchema>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameter_order: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub request: Option<SchemaRef>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<SchemaRef>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scopes: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub supports_media_upload: Option<bool>,
}

/// A `{"$ref": "Schema"}` pointer used for request and response bodies.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaRef {
    #[serde(rename = "$ref")]
    pub ref_path: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter_name: Option<String>,
}

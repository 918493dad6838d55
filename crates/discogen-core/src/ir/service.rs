use indexmap::IndexMap;

use super::properties::{PropertyDeclaration, TypeRef};

/// HTTP method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Options,
    Head,
    Trace,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Head => "HEAD",
            HttpMethod::Trace => "TRACE",
        }
    }

    /// Parse a discovery `httpMethod` value, case-insensitively.
    pub fn parse(verb: &str) -> Option<HttpMethod> {
        let method = match verb.to_ascii_uppercase().as_str() {
            "GET" => HttpMethod::Get,
            "POST" => HttpMethod::Post,
            "PUT" => HttpMethod::Put,
            "DELETE" => HttpMethod::Delete,
            "PATCH" => HttpMethod::Patch,
            "OPTIONS" => HttpMethod::Options,
            "HEAD" => HttpMethod::Head,
            "TRACE" => HttpMethod::Trace,
            _ => return None,
        };
        Some(method)
    }
}

/// The service class: API metadata, global query params, and all API methods.
#[derive(Debug, Clone)]
pub struct ServiceDeclaration {
    pub name: String,
    pub api_name: String,
    pub api_version: String,
    pub description: Option<String>,
    pub global_params: Vec<PropertyDeclaration>,
    /// Optional query params shared across methods, each declared once.
    pub other_query_params: Vec<PropertyDeclaration>,
    pub methods: Vec<ApiMethodDeclaration>,
}

/// A request or response body bound to a generated model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyDeclaration {
    pub type_ref: TypeRef,
    pub var_name: String,
}

/// A positional parameter in a method signature.
#[derive(Debug, Clone)]
pub struct MethodParameter {
    /// Argument label, when it differs from the parameter name.
    pub label: Option<String>,
    pub property: PropertyDeclaration,
}

/// One generated API method.
#[derive(Debug, Clone)]
pub struct ApiMethodDeclaration {
    /// Discovery method identifier, e.g. `books.volumes.get`.
    pub id: String,
    pub name: String,
    pub http_method: HttpMethod,
    /// Every parameter, in resolution order.
    pub parameters: Vec<PropertyDeclaration>,
    /// Positional parameters: the request body first, then required params.
    pub required_params: Vec<MethodParameter>,
    /// Every optional parameter this method accepts.
    pub optional_params: Vec<PropertyDeclaration>,
    /// Optional parameters first declared by this method.
    pub declared_params: Vec<PropertyDeclaration>,
    pub request_body: Option<BodyDeclaration>,
    pub response: Option<BodyDeclaration>,
    /// Path template with `{param}` placeholders.
    pub endpoint: String,
    pub supports_media_upload: bool,
    pub description: Option<String>,
    /// Full signature supplied by an override document.
    pub signature_override: Option<String>,
}

impl ApiMethodDeclaration {
    pub fn required_query_params(&self) -> impl Iterator<Item = &PropertyDeclaration> {
        self.required_params
            .iter()
            .map(|p| &p.property)
            .filter(|p| p.is_query())
    }
}

/// The service-wide set of optional query params, keyed by identifier.
///
/// Owned by the service transform and threaded through each method build.
#[derive(Debug, Clone, Default)]
pub struct SharedQueryParams {
    params: IndexMap<String, PropertyDeclaration>,
}

impl SharedQueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `param` unless one with the same name is already shared.
    /// Returns `true` when it was newly declared.
    pub fn declare(&mut self, param: &PropertyDeclaration) -> bool {
        if self.params.contains_key(param.dedup_key()) {
            return false;
        }
        self.params
            .insert(param.dedup_key().to_string(), param.clone());
        true
    }

    pub fn get(&self, name: &str) -> Option<&PropertyDeclaration> {
        self.params.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.params.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn into_vec(self) -> Vec<PropertyDeclaration> {
        self.params.into_values().collect()
    }
}

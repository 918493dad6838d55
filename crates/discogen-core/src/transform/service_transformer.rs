//! Service Transformer: the service class, its API methods, and the scopes enum.

use indexmap::IndexMap;
use log::{debug, warn};

use crate::error::TransformError;
use crate::ir::{
    ApiMethodDeclaration, BodyDeclaration, Declaration, EnumCase, HttpMethod, MethodParameter,
    Optionality, PropertyDeclaration, ScopesEnumDeclaration, ServiceDeclaration,
    SharedQueryParams, TypeRef,
};
use crate::parse::document::{DiscoveryDocument, OAuthScope, Resource, RestMethod};
use crate::parse::schema::JsonSchema;

use super::naming::{identifier_from_components, identifier_name};
use super::schema_transformer::{Scope, TransformContext, apply_override, quote};

/// Global parameters supplied by the API client itself.
pub const CLIENT_SUPPLIED_PARAMS: &[&str] = &["key", "oauth_token"];

/// Description attached to every request-body parameter.
pub const POST_BODY_DESCRIPTION: &str = "Post Body";

/// The service declaration plus the models and enums its parameters needed.
#[derive(Debug, Clone)]
pub struct ServiceOutput {
    pub service: ServiceDeclaration,
    /// Declarations synthesized from global parameters.
    pub global_param_models: Vec<Declaration>,
    /// Declarations synthesized from method parameters.
    pub method_param_models: Vec<Declaration>,
}

impl TransformContext<'_> {
    /// Build the service declaration for `doc`.
    pub fn service_from_document(&self, doc: &DiscoveryDocument) -> Result<ServiceOutput, TransformError> {
        let mut global_param_models = Vec::new();
        let global_params = self.global_params(&doc.parameters, &mut global_param_models);

        let mut shared = SharedQueryParams::new();
        let mut method_param_models = Vec::new();
        let mut methods = Vec::new();

        for (key, method) in &doc.methods {
            methods.push(self.api_method(key, method, &[], &mut shared, &mut method_param_models)?);
        }
        for (name, resource) in &doc.resources {
            self.resource_methods(
                resource,
                &[name.clone()],
                &mut shared,
                &mut method_param_models,
                &mut methods,
            )?;
        }

        debug!(
            "built service {} ({} methods, {} shared query params)",
            self.service_name,
            methods.len(),
            shared.len()
        );

        Ok(ServiceOutput {
            service: ServiceDeclaration {
                name: self.service_name.to_string(),
                api_name: doc.name.clone(),
                api_version: doc.version.clone(),
                description: doc.description.clone(),
                global_params,
                other_query_params: shared.into_vec(),
                methods,
            },
            global_param_models,
            method_param_models,
        })
    }

    fn global_params(
        &self,
        parameters: &IndexMap<String, JsonSchema>,
        out: &mut Vec<Declaration>,
    ) -> Vec<PropertyDeclaration> {
        let scope = Scope::new(self.service_name, Vec::new());
        parameters
            .iter()
            .filter(|(name, _)| !CLIENT_SUPPLIED_PARAMS.contains(&name.as_str()))
            .map(|(name, schema)| {
                let mut property = self.resolve_property(name, schema, &scope, out);
                if let Some(ov) = self.overrides.global_param(name) {
                    apply_override(&mut property, ov);
                }
                property
            })
            .collect()
    }

    fn resource_methods(
        &self,
        resource: &Resource,
        path: &[String],
        shared: &mut SharedQueryParams,
        out: &mut Vec<Declaration>,
        methods: &mut Vec<ApiMethodDeclaration>,
    ) -> Result<(), TransformError> {
        for (key, method) in &resource.methods {
            methods.push(self.api_method(key, method, path, shared, out)?);
        }
        for (name, child) in &resource.resources {
            let mut child_path = path.to_vec();
            child_path.push(name.clone());
            self.resource_methods(child, &child_path, shared, out, methods)?;
        }
        Ok(())
    }

    /// Build one API method. Optional parameters are declared on `shared`
    /// the first time their name is seen.
    pub fn api_method(
        &self,
        key: &str,
        method: &RestMethod,
        resource_path: &[String],
        shared: &mut SharedQueryParams,
        out: &mut Vec<Declaration>,
    ) -> Result<ApiMethodDeclaration, TransformError> {
        let http_method =
            HttpMethod::parse(&method.http_method).ok_or_else(|| TransformError::UnsupportedHttpMethod {
                method_id: method.id.clone(),
                verb: method.http_method.clone(),
            })?;

        let name = match self.overrides.method_base_name(&method.id) {
            Some(base) => base.to_string(),
            None => {
                let mut components = vec![key.to_string()];
                components.extend(resource_path.iter().cloned());
                identifier_from_components(&components, false)
            }
        };

        let mut prefix = vec![self.service_name.to_string()];
        prefix.extend(resource_path.iter().cloned());
        let scope = Scope::new(identifier_from_components(&prefix, true), resource_path.to_vec());

        let parameters: Vec<PropertyDeclaration> = method
            .parameters
            .iter()
            .map(|(param_name, schema)| {
                let mut property = self.resolve_property(param_name, schema, &scope, out);
                if let Some(ov) = self.overrides.method_query_param(&method.id, param_name) {
                    apply_override(&mut property, ov);
                }
                property
            })
            .collect();

        let request_body = method.request.as_ref().map(|r| BodyDeclaration {
            type_ref: TypeRef::named(self.reference_name(&r.ref_path)),
            var_name: identifier_name(&r.ref_path, false, false),
        });
        let response = method.response.as_ref().map(|r| BodyDeclaration {
            type_ref: TypeRef::named(self.reference_name(&r.ref_path)),
            var_name: identifier_name(&r.ref_path, false, false),
        });

        let mut required: Vec<PropertyDeclaration> = Vec::new();
        if let Some(body) = &request_body {
            required.push(body_parameter(body));
        }
        required.extend(ordered_required(&parameters, &method.parameter_order));

        let required_params = required
            .into_iter()
            .enumerate()
            .map(|(index, property)| MethodParameter {
                label: self
                    .overrides
                    .method_param_name(&method.id, index)
                    .map(str::to_string),
                property,
            })
            .collect();

        let mut optional_params = Vec::new();
        let mut declared_params = Vec::new();
        for param in parameters.iter().filter(|p| !p.required) {
            if shared.declare(param) {
                declared_params.push(param.clone());
                optional_params.push(param.clone());
                continue;
            }
            if let Some(existing) = shared.get(param.dedup_key()) {
                if !existing.is_equivalent(param) {
                    warn!(
                        "{}: optional parameter `{}` differs from the shared declaration; using the shared one",
                        method.id,
                        param.identifier_name
                    );
                }
                optional_params.push(existing.clone());
            }
        }

        debug!(
            "built method {name} ({} {}, {} required, {} optional)",
            http_method.as_str(),
            method.path,
            parameters.iter().filter(|p| p.required).count(),
            optional_params.len()
        );

        Ok(ApiMethodDeclaration {
            id: method.id.clone(),
            name,
            http_method,
            parameters,
            required_params,
            optional_params,
            declared_params,
            request_body,
            response,
            endpoint: method.path.clone(),
            supports_media_upload: method.supports_media_upload.unwrap_or(false),
            description: method.description.clone(),
            signature_override: self.overrides.method_full_name(&method.id).map(str::to_string),
        })
    }

    /// One case per scope URL, named from its last path segment.
    pub fn scopes_enum(&self, scopes: &IndexMap<String, OAuthScope>) -> ScopesEnumDeclaration {
        let cases = scopes
            .iter()
            .map(|(url, scope)| {
                let generated = scope_case_name(url, self.service_name);
                let identifier = self
                    .overrides
                    .scope_case(&generated)
                    .map(str::to_string)
                    .unwrap_or(generated);
                EnumCase {
                    raw_value: url.clone(),
                    literal: quote(url),
                    identifier,
                    description: scope.description.clone(),
                }
            })
            .collect();
        ScopesEnumDeclaration {
            name: format!("{}OAuthScopes", self.service_name),
            cases,
        }
    }
}

/// Derive a case name from a scope URL.
///
/// `https://www.googleapis.com/auth/books` for service `Books` becomes `Books`;
/// `.../auth/drive.readonly` for `Drive` becomes `Readonly`.
pub fn scope_case_name(url: &str, service_name: &str) -> String {
    let tail = url.rsplit('/').find(|s| !s.is_empty()).unwrap_or(url);
    let mut components: Vec<&str> = tail.split('.').collect();
    if components
        .first()
        .is_some_and(|first| first.eq_ignore_ascii_case(service_name))
    {
        components.remove(0);
        if components.is_empty() {
            components.push(service_name);
        }
    }
    identifier_from_components(&components, true)
}

fn body_parameter(body: &BodyDeclaration) -> PropertyDeclaration {
    PropertyDeclaration {
        source_name: body.var_name.clone(),
        identifier_name: body.var_name.clone(),
        target_type: body.type_ref.clone(),
        optionality: Optionality::NonOptional,
        is_enum: false,
        default_value: None,
        required: true,
        description: Some(POST_BODY_DESCRIPTION.to_string()),
        location: None,
        transform: None,
    }
}

/// Required parameters in `parameterOrder` first, then the rest in document order.
fn ordered_required(parameters: &[PropertyDeclaration], order: &[String]) -> Vec<PropertyDeclaration> {
    let mut ordered: Vec<PropertyDeclaration> = order
        .iter()
        .filter_map(|name| parameters.iter().find(|p| p.required && &p.source_name == name))
        .cloned()
        .collect();
    for param in parameters.iter().filter(|p| p.required) {
        if !order.contains(&param.source_name) {
            ordered.push(param.clone());
        }
    }
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{ParameterLocation, TargetType};
    use crate::overrides::OverrideRegistry;

    fn method(json: &str) -> RestMethod {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_scope_case_names() {
        assert_eq!(scope_case_name("https://www.googleapis.com/auth/books", "Books"), "Books");
        assert_eq!(
            scope_case_name("https://www.googleapis.com/auth/drive.readonly", "Drive"),
            "Readonly"
        );
        assert_eq!(
            scope_case_name("https://www.googleapis.com/auth/drive.metadata.readonly", "Drive"),
            "MetadataReadonly"
        );
        assert_eq!(scope_case_name("https://mail.google.com/", "Gmail"), "MailGoogleCom");
        assert_eq!(
            scope_case_name("https://www.googleapis.com/auth/cloud-platform", "Books"),
            "CloudPlatform"
        );
    }

    #[test]
    fn test_scope_literals_are_escaped() {
        let overrides = OverrideRegistry::empty();
        let ctx = TransformContext::new("Books", &overrides);
        let mut scopes = IndexMap::new();
        scopes.insert("https://example.com/auth/books".to_string(), OAuthScope::default());
        scopes.insert("https://example.com/auth/\"quoted\"".to_string(), OAuthScope::default());
        let scopes = ctx.scopes_enum(&scopes);
        assert_eq!(scopes.cases[0].literal, "\"https://example.com/auth/books\"");
        assert_eq!(scopes.cases[1].literal, r#""https://example.com/auth/\"quoted\"""#);
        assert_eq!(scopes.cases[1].raw_value, "https://example.com/auth/\"quoted\"");
    }

    #[test]
    fn test_get_method() {
        let overrides = OverrideRegistry::empty();
        let ctx = TransformContext::new("Books", &overrides);
        let get = method(
            r#"{
                "id": "books.volumes.get",
                "path": "volumes/{id}",
                "httpMethod": "GET",
                "parameters": {
                    "id": {"type": "string", "required": true, "location": "path"},
                    "verbose": {"type": "boolean", "location": "query"}
                },
                "parameterOrder": ["id"],
                "response": {"$ref": "Volume"}
            }"#,
        );
        let mut shared = SharedQueryParams::new();
        let decl = ctx
            .api_method("get", &get, &["volumes".to_string()], &mut shared, &mut Vec::new())
            .unwrap();
        assert_eq!(decl.name, "getVolumes");
        assert_eq!(decl.http_method, HttpMethod::Get);
        assert_eq!(decl.required_params.len(), 1);
        let id = &decl.required_params[0].property;
        assert_eq!(id.identifier_name, "id");
        assert_eq!(id.target_type, TypeRef::Primitive(TargetType::String));
        assert_eq!(id.optionality, Optionality::NonOptional);
        assert_eq!(id.location, Some(ParameterLocation::Path));
        assert_eq!(decl.optional_params.len(), 1);
        assert_eq!(decl.optional_params[0].identifier_name, "verbose");
        assert_eq!(decl.optional_params[0].optionality, Optionality::Optional);
        assert_eq!(decl.response.as_ref().unwrap().var_name, "volume");
        assert_eq!(
            decl.response.as_ref().unwrap().type_ref,
            TypeRef::named("BooksVolume")
        );
    }

    #[test]
    fn test_request_body_comes_first() {
        let overrides = OverrideRegistry::from_json(
            r#"{"serviceClass": {"methods": {"shelves.insert": {
                "baseName": "addShelf",
                "paramNames": {"1": "forUser"},
                "fullMethodName": "public func addShelf(_ shelf: BooksShelf)"
            }}}}"#,
        )
        .unwrap();
        let ctx = TransformContext::new("Books", &overrides);
        let insert = method(
            r#"{
                "id": "books.shelves.insert",
                "path": "users/{userId}/shelves",
                "httpMethod": "post",
                "parameters": {
                    "userId": {"type": "string", "required": true, "location": "path"}
                },
                "request": {"$ref": "Shelf"},
                "response": {"$ref": "Shelf"}
            }"#,
        );
        let decl = ctx
            .api_method(
                "insert",
                &insert,
                &["shelves".to_string()],
                &mut SharedQueryParams::new(),
                &mut Vec::new(),
            )
            .unwrap();
        assert_eq!(decl.name, "addShelf");
        assert_eq!(decl.http_method, HttpMethod::Post);
        let body = &decl.required_params[0];
        assert_eq!(body.property.identifier_name, "shelf");
        assert_eq!(body.property.description.as_deref(), Some(POST_BODY_DESCRIPTION));
        assert_eq!(body.label, None);
        assert_eq!(decl.required_params[1].label.as_deref(), Some("forUser"));
        assert!(decl.signature_override.is_some());
    }

    #[test]
    fn test_parameter_order_wins() {
        let overrides = OverrideRegistry::empty();
        let ctx = TransformContext::new("Books", &overrides);
        let get = method(
            r#"{
                "id": "books.bookshelves.volumes.get",
                "path": "users/{userId}/bookshelves/{shelf}/volumes/{volumeId}",
                "httpMethod": "GET",
                "parameters": {
                    "volumeId": {"type": "string", "required": true, "location": "path"},
                    "shelf": {"type": "string", "required": true, "location": "path"},
                    "userId": {"type": "string", "required": true, "location": "path"}
                },
                "parameterOrder": ["userId", "shelf"]
            }"#,
        );
        let path = ["bookshelves".to_string(), "volumes".to_string()];
        let decl = ctx
            .api_method("get", &get, &path, &mut SharedQueryParams::new(), &mut Vec::new())
            .unwrap();
        assert_eq!(decl.name, "getBookshelvesVolumes");
        let order: Vec<&str> = decl
            .required_params
            .iter()
            .map(|p| p.property.identifier_name.as_str())
            .collect();
        assert_eq!(order, vec!["userId", "shelf", "volumeId"]);
        assert!(decl.response.is_none());
    }

    #[test]
    fn test_unknown_verb_fails() {
        let overrides = OverrideRegistry::empty();
        let ctx = TransformContext::new("Books", &overrides);
        let bad = method(r#"{"id": "books.volumes.poke", "path": "volumes", "httpMethod": "POKE"}"#);
        let err = ctx
            .api_method("poke", &bad, &[], &mut SharedQueryParams::new(), &mut Vec::new())
            .unwrap_err();
        assert!(matches!(err, TransformError::UnsupportedHttpMethod { .. }));
    }
}

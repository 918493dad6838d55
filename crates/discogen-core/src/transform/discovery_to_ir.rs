use indexmap::IndexMap;
use log::{debug, info};

use crate::error::TransformError;
use crate::ir::{Declaration, IrInfo, IrSpec};
use crate::overrides::OverrideRegistry;
use crate::parse::document::DiscoveryDocument;

use super::naming::identifier_name;
use super::schema_transformer::TransformContext;

/// Transform a parsed discovery document into file-grouped declarations.
///
/// Each top-level schema gets its own group keyed by its class name. The
/// service group holds the service declaration, the models synthesized for
/// global and method parameters, and the scopes enum.
pub fn transform(doc: &DiscoveryDocument, overrides: &OverrideRegistry) -> Result<IrSpec, TransformError> {
    let service_name = identifier_name(&doc.name, true, false);
    let ctx = TransformContext::new(&service_name, overrides);

    let mut groups: IndexMap<String, Vec<Declaration>> = IndexMap::new();
    let mut owners: IndexMap<String, String> = IndexMap::new();

    for (schema_name, schema) in &doc.schemas {
        let group = ctx.reference_name(schema_name);
        if let Some(first) = owners.get(&group) {
            return Err(TransformError::GroupCollision {
                group,
                first: first.clone(),
                second: schema_name.clone(),
            });
        }
        let declarations = ctx.declarations_from_schema(schema_name, schema);
        debug!("group {group}: {} declarations", declarations.len());
        owners.insert(group.clone(), schema_name.clone());
        groups.insert(group, declarations);
    }

    let output = ctx.service_from_document(doc)?;
    if let Some(first) = owners.get(&service_name) {
        return Err(TransformError::GroupCollision {
            group: service_name,
            first: first.clone(),
            second: doc.name.clone(),
        });
    }

    let mut service_group = vec![Declaration::Service(output.service)];
    service_group.extend(output.global_param_models);
    service_group.extend(output.method_param_models);
    let scopes = doc.oauth_scopes();
    if !scopes.is_empty() {
        service_group.push(Declaration::Scopes(ctx.scopes_enum(&scopes)));
    }
    groups.insert(service_name.clone(), service_group);

    let spec = IrSpec {
        info: IrInfo {
            api_name: doc.name.clone(),
            version: doc.version.clone(),
            service_name: service_name.clone(),
            title: doc.title.clone(),
            description: doc.description.clone(),
        },
        service_group: service_name,
        groups,
    };
    info!(
        "transformed {} {}: {} file groups, {} declarations",
        doc.name,
        doc.version,
        spec.groups.len(),
        spec.declaration_count()
    );
    Ok(spec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::from_json;

    #[test]
    fn test_groups_and_service_group_order() {
        let doc = from_json(
            r#"{
                "name": "books",
                "version": "v1",
                "parameters": {
                    "alt": {"type": "string", "enum": ["json"], "location": "query", "default": "json"},
                    "key": {"type": "string", "location": "query"}
                },
                "schemas": {
                    "Volume": {"id": "Volume", "type": "object", "properties": {"title": {"type": "string"}}}
                },
                "resources": {
                    "volumes": {"methods": {"list": {
                        "id": "books.volumes.list",
                        "path": "volumes",
                        "httpMethod": "GET",
                        "parameters": {
                            "projection": {"type": "string", "enum": ["full", "lite"], "location": "query"}
                        }
                    }}}
                },
                "auth": {"oauth2": {"scopes": {"https://www.googleapis.com/auth/books": {"description": "Manage your books"}}}}
            }"#,
        )
        .unwrap();
        let spec = transform(&doc, &OverrideRegistry::empty()).unwrap();
        let keys: Vec<&str> = spec.groups.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["BooksVolume", "Books"]);
        assert_eq!(spec.service_group, "Books");

        let names: Vec<&str> = spec.groups["Books"].iter().map(Declaration::name).collect();
        assert_eq!(
            names,
            vec!["Books", "BooksAlt", "BooksVolumesProjection", "BooksOAuthScopes"]
        );

        let Declaration::Service(service) = &spec.groups["Books"][0] else {
            panic!("expected service");
        };
        assert_eq!(service.api_name, "books");
        assert_eq!(service.global_params.len(), 1);
        assert_eq!(service.global_params[0].default_value.as_deref(), Some(".Json"));
    }

    #[test]
    fn test_group_collision() {
        let doc = from_json(
            r#"{
                "name": "books",
                "version": "v1",
                "schemas": {
                    "volume_info": {"type": "object", "properties": {}},
                    "VolumeInfo": {"type": "object", "properties": {}}
                }
            }"#,
        )
        .unwrap();
        let err = transform(&doc, &OverrideRegistry::empty()).unwrap_err();
        match err {
            TransformError::GroupCollision { group, first, second } => {
                assert_eq!(group, "BooksVolumeInfo");
                assert_eq!(first, "volume_info");
                assert_eq!(second, "VolumeInfo");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}

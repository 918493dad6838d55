use discogen_core::GeneratorError;
use discogen_core::ir::{ListModelDeclaration, ModelDeclaration, PropertyDeclaration};
use minijinja::{Environment, Value, context};

use super::render;
use crate::type_mapper::{declared_type, swift_type, transform_name};

/// Emit an ObjectMapper model class.
pub fn emit_model(env: &Environment<'_>, model: &ModelDeclaration) -> Result<String, GeneratorError> {
    render(
        env,
        "model_class.swift.j2",
        context! {
            name => model.name.clone(),
            supertype => model.supertype.as_str(),
            description => model.description.clone(),
            properties => properties_ctx(&model.properties),
        },
    )
}

/// Emit a paginated list class, iterable and subscriptable over `items`.
pub fn emit_model_list(env: &Environment<'_>, list: &ListModelDeclaration) -> Result<String, GeneratorError> {
    render(
        env,
        "model_list.swift.j2",
        context! {
            name => list.name.clone(),
            supertype => list.supertype.as_str(),
            description => list.description.clone(),
            item_type => swift_type(&list.item_type),
            items => property_ctx(&list.items),
            properties => properties_ctx(&list.properties),
        },
    )
}

pub(crate) fn properties_ctx(properties: &[PropertyDeclaration]) -> Vec<Value> {
    properties.iter().map(property_ctx).collect()
}

pub(crate) fn property_ctx(property: &PropertyDeclaration) -> Value {
    context! {
        name => property.identifier_name.clone(),
        description => property.description.clone(),
        declaration => declaration_line(property),
        mapping => mapping_line(property),
    }
}

/// `public var name: Type = default // REQUIRED`
pub(crate) fn declaration_line(property: &PropertyDeclaration) -> String {
    let mut line = format!(
        "public var {}: {}",
        property.identifier_name,
        declared_type(property)
    );
    if let Some(default) = &property.default_value {
        line.push_str(" = ");
        line.push_str(default);
    }
    if property.required {
        line.push_str(" // REQUIRED");
    }
    line
}

fn mapping_line(property: &PropertyDeclaration) -> String {
    match property.transform {
        Some(kind) => format!(
            "{} <- (map[\"{}\"], {}())",
            property.identifier_name,
            property.source_name,
            transform_name(kind)
        ),
        None => format!(
            "{} <- map[\"{}\"]",
            property.identifier_name, property.source_name
        ),
    }
}

//! Schema Transformer: derives models, list models, and enums from schema nodes.
//!
//! Resolution of a property type follows a fixed priority: enumeration,
//! primitive, array, nested object, free-form map, cross-reference. Every
//! declaration synthesized along the way is appended to the caller's output
//! vector after its parent.

use indexmap::IndexMap;
use log::{debug, warn};

use crate::ir::{
    Declaration, EnumCase, EnumDeclaration, ListModelDeclaration, ModelDeclaration, Optionality,
    ParameterLocation, PropertyDeclaration, Supertype, TargetType, TypeRef,
};
use crate::overrides::{OverrideProperty, OverrideRegistry};
use crate::parse::schema::{JsonSchema, SchemaLocation};

use super::naming::{identifier_from_components, identifier_name, singularize};
use super::type_mapper::{target_type, transform_for};

/// Run-scoped inputs shared by every transform call.
#[derive(Debug, Clone, Copy)]
pub struct TransformContext<'a> {
    /// Capitalized service identifier, e.g. `Books`.
    pub service_name: &'a str,
    pub overrides: &'a OverrideRegistry,
}

/// Naming scope for properties resolved at one nesting level.
#[derive(Debug, Clone, Default)]
pub struct Scope {
    /// Prepended to synthesized type names.
    pub type_prefix: String,
    /// Raw resource/property path, joined with `.` to form enum override ids.
    pub path: Vec<String>,
    /// Class whose property overrides apply at this level.
    pub owner: Option<String>,
}

impl Scope {
    pub fn new(type_prefix: impl Into<String>, path: Vec<String>) -> Self {
        Self {
            type_prefix: type_prefix.into(),
            path,
            owner: None,
        }
    }

    pub fn owned_by(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    fn enum_id(&self, property: &str) -> String {
        let mut parts = self.path.clone();
        parts.push(property.to_string());
        parts.join(".")
    }

    fn type_name(&self, property: &str) -> String {
        format!("{}{}", self.type_prefix, identifier_name(property, true, true))
    }

    fn child(&self, property: &str, type_name: &str) -> Scope {
        let mut path = self.path.clone();
        path.push(property.to_string());
        Scope {
            type_prefix: type_name.to_string(),
            path,
            owner: Some(type_name.to_string()),
        }
    }
}

impl<'a> TransformContext<'a> {
    pub fn new(service_name: &'a str, overrides: &'a OverrideRegistry) -> Self {
        Self {
            service_name,
            overrides,
        }
    }

    /// Type name a `$ref` to `schema_name` resolves to.
    pub fn reference_name(&self, schema_name: &str) -> String {
        identifier_from_components(&[self.service_name, schema_name], true)
    }

    /// Declarations derived from one top-level schema: the schema's own
    /// declaration first, then everything synthesized for its properties.
    pub fn declarations_from_schema(&self, schema_name: &str, schema: &JsonSchema) -> Vec<Declaration> {
        let name = self.reference_name(schema_name);
        let scope = Scope::new(name.clone(), vec![schema_name.to_string()]).owned_by(name.clone());

        if !schema.enum_values.is_empty() {
            let enum_decl = self.enum_from_schema(&name, schema_name, schema);
            debug!("built enum {} ({} cases)", enum_decl.name, enum_decl.cases.len());
            return vec![Declaration::Enum(enum_decl)];
        }

        let mut nested = Vec::new();
        let mut properties = self.resolve_properties(&schema.properties, &scope, &mut nested);

        let items_index = properties
            .iter()
            .position(|p| p.source_name == "items" && matches!(p.target_type, TypeRef::List(_)));
        let head = if let Some(index) = items_index {
            let items = properties.remove(index);
            Declaration::ModelList(self.list_model(name, schema, items, properties))
        } else {
            let supertype = self.supertype_for(&name, schema);
            debug!("built model {name}: {} ({} properties)", supertype.as_str(), properties.len());
            Declaration::Model(ModelDeclaration {
                name,
                supertype,
                properties,
                description: schema.description.clone(),
            })
        };

        let mut declarations = Vec::with_capacity(nested.len() + 1);
        declarations.push(head);
        declarations.extend(nested);
        declarations
    }

    fn list_model(
        &self,
        name: String,
        schema: &JsonSchema,
        items: PropertyDeclaration,
        properties: Vec<PropertyDeclaration>,
    ) -> ListModelDeclaration {
        let item_type = items.target_type.element().clone();
        let supertype = match self.overrides.model_supertype(&name) {
            Some(custom) => Supertype::Custom(custom.to_string()),
            None => Supertype::GoogleObjectList,
        };
        debug!("built list model {name} of {:?}", item_type);
        ListModelDeclaration {
            name,
            supertype,
            item_type,
            items,
            properties,
            description: schema.description.clone(),
        }
    }

    /// Override type first, then `kind` with a default, then the plain base.
    pub fn supertype_for(&self, class_name: &str, schema: &JsonSchema) -> Supertype {
        if let Some(custom) = self.overrides.model_supertype(class_name) {
            return Supertype::Custom(custom.to_string());
        }
        match schema.properties.get("kind") {
            Some(kind) if kind.default_value.is_some() => Supertype::GoogleObject,
            _ => Supertype::Mappable,
        }
    }

    /// Resolve every property at one level, in document order.
    pub fn resolve_properties(
        &self,
        properties: &IndexMap<String, JsonSchema>,
        scope: &Scope,
        out: &mut Vec<Declaration>,
    ) -> Vec<PropertyDeclaration> {
        properties
            .iter()
            .map(|(name, schema)| {
                let mut property = self.resolve_property(name, schema, scope, out);
                if let Some(owner) = &scope.owner {
                    if let Some(ov) = self.overrides.model_property(owner, name) {
                        apply_override(&mut property, ov);
                    }
                }
                property
            })
            .collect()
    }

    /// Resolve a single property or parameter without applying overrides.
    pub fn resolve_property(
        &self,
        name: &str,
        schema: &JsonSchema,
        scope: &Scope,
        out: &mut Vec<Declaration>,
    ) -> PropertyDeclaration {
        let type_name = scope.type_name(name);
        let mut target = self.resolve_type(name, schema, &type_name, scope, out);
        let is_enum = !schema.enum_values.is_empty();

        if target.is_unresolved() {
            warn!(
                "could not resolve type of `{name}` in {}; emitting a placeholder",
                if scope.type_prefix.is_empty() { self.service_name } else { scope.type_prefix.as_str() }
            );
        }
        if schema.is_repeated() {
            target = TypeRef::list(target);
        }

        let default_value = schema.default_text().map(|raw| {
            if is_enum {
                format!(".{}", self.enum_case_identifier(&scope.enum_id(name), &raw))
            } else if target == TypeRef::Primitive(TargetType::String) {
                quote(&raw)
            } else {
                raw
            }
        });

        let required = schema.is_required();
        PropertyDeclaration {
            source_name: name.to_string(),
            identifier_name: identifier_name(name, false, false),
            optionality: optionality_for(required, default_value.is_some(), &target),
            transform: transform_for(&target),
            target_type: target,
            is_enum,
            default_value,
            required,
            description: schema.description.clone(),
            location: schema.location.map(|l| match l {
                SchemaLocation::Query => ParameterLocation::Query,
                SchemaLocation::Path => ParameterLocation::Path,
            }),
        }
    }

    fn resolve_type(
        &self,
        name: &str,
        schema: &JsonSchema,
        type_name: &str,
        scope: &Scope,
        out: &mut Vec<Declaration>,
    ) -> TypeRef {
        if !schema.enum_values.is_empty() {
            let enum_decl = self.enum_from_schema(type_name, &scope.enum_id(name), schema);
            debug!("built enum {}", enum_decl.name);
            out.push(Declaration::Enum(enum_decl));
            return TypeRef::named(type_name);
        }

        if let Some(primitive) = target_type(schema.schema_type.as_deref(), schema.format.as_deref()) {
            return TypeRef::Primitive(primitive);
        }

        if schema.type_is("array") {
            return match schema.items.as_deref() {
                Some(items) => {
                    let element_name = singularize(type_name);
                    TypeRef::list(self.resolve_type(name, items, &element_name, scope, out))
                }
                None => TypeRef::list(TypeRef::Unresolved),
            };
        }

        if schema.type_is("object") && !schema.properties.is_empty() {
            self.nested_model(name, schema, type_name, scope, out);
            return TypeRef::named(type_name);
        }

        if let Some(values) = schema.additional_properties.as_deref() {
            let value_name = singularize(type_name);
            return TypeRef::Map(Box::new(self.resolve_type(name, values, &value_name, scope, out)));
        }

        if let Some(reference) = schema.x_ref.as_deref() {
            return TypeRef::named(self.reference_name(reference));
        }

        TypeRef::Unresolved
    }

    fn nested_model(
        &self,
        name: &str,
        schema: &JsonSchema,
        type_name: &str,
        scope: &Scope,
        out: &mut Vec<Declaration>,
    ) {
        let child = scope.child(name, type_name);
        let mut nested = Vec::new();
        let properties = self.resolve_properties(&schema.properties, &child, &mut nested);
        let supertype = self.supertype_for(type_name, schema);
        debug!("built nested model {type_name} ({} properties)", properties.len());
        out.push(Declaration::Model(ModelDeclaration {
            name: type_name.to_string(),
            supertype,
            properties,
            description: schema.description.clone(),
        }));
        out.extend(nested);
    }

    /// Build an enum named `name`; `enum_id` keys case-name overrides.
    pub fn enum_from_schema(&self, name: &str, enum_id: &str, schema: &JsonSchema) -> EnumDeclaration {
        let raw_type = target_type(schema.schema_type.as_deref(), schema.format.as_deref())
            .unwrap_or(TargetType::String);
        let cases = schema
            .enum_values
            .iter()
            .enumerate()
            .map(|(index, raw)| EnumCase {
                raw_value: raw.clone(),
                literal: if raw_type == TargetType::String {
                    quote(raw)
                } else {
                    raw.clone()
                },
                identifier: self.enum_case_identifier(enum_id, raw),
                description: schema
                    .enum_descriptions
                    .get(index)
                    .filter(|d| !d.trim().is_empty())
                    .cloned(),
            })
            .collect();
        EnumDeclaration {
            name: name.to_string(),
            raw_type,
            cases,
            description: schema.description.clone(),
        }
    }

    fn enum_case_identifier(&self, enum_id: &str, raw: &str) -> String {
        match self.overrides.enum_case(enum_id, raw) {
            Some(custom) => custom.to_string(),
            None => identifier_name(raw, true, false),
        }
    }
}

/// Required or defaulted values are always present; primitives are plain
/// optionals; everything else is implicitly unwrapped.
pub fn optionality_for(required: bool, has_default: bool, target: &TypeRef) -> Optionality {
    if required || has_default {
        Optionality::NonOptional
    } else if target.is_primitive() {
        Optionality::Optional
    } else {
        Optionality::ImplicitlyUnwrapped
    }
}

/// Layer an override record over a resolved property.
pub fn apply_override(property: &mut PropertyDeclaration, ov: &OverrideProperty) {
    if let Some(type_name) = &ov.type_name {
        let retyped = TypeRef::from_override(type_name);
        property.is_enum &= retyped == property.target_type;
        property.transform = transform_for(&retyped);
        property.target_type = retyped;
    }
    if let Some(name) = &ov.name {
        property.identifier_name = name.clone();
    }
    if let Some(default) = &ov.default_value {
        property.default_value = Some(default.clone());
    }
    if ov.has_default_value == Some(false) {
        property.default_value = None;
    }
    property.optionality = optionality_for(
        property.required,
        property.default_value.is_some(),
        &property.target_type,
    );
}

pub(crate) fn quote(raw: &str) -> String {
    let escaped = raw.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{escaped}\"")
}

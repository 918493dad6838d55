use discogen_core::ir::{PropertyDeclaration, TargetType, TransformKind, TypeRef};

/// Swift spelling of a primitive.
pub fn primitive_name(ty: TargetType) -> &'static str {
    match ty {
        TargetType::Bool => "Bool",
        TargetType::Int => "Int",
        TargetType::UInt => "UInt",
        TargetType::Double => "Double",
        TargetType::Float => "Float",
        TargetType::String => "String",
        TargetType::Bytes => "Data",
        TargetType::DateTime => "Date",
        TargetType::Int64 => "Int64",
        TargetType::UInt64 => "UInt64",
        TargetType::Url => "URL",
        TargetType::Any => "Any",
    }
}

/// Map a resolved `TypeRef` to its Swift spelling.
pub fn swift_type(type_ref: &TypeRef) -> String {
    match type_ref {
        TypeRef::Primitive(ty) => primitive_name(*ty).to_string(),
        TypeRef::Named(name) => name.clone(),
        TypeRef::List(inner) => format!("[{}]", swift_type(inner)),
        TypeRef::Map(value) => format!("[String: {}]", swift_type(value)),
        // Typed placeholder for properties no rule could resolve.
        TypeRef::Unresolved => primitive_name(TargetType::Any).to_string(),
    }
}

/// Type with its optionality suffix, e.g. `String?` or `BooksVolume!`.
pub fn declared_type(property: &PropertyDeclaration) -> String {
    format!(
        "{}{}",
        swift_type(&property.target_type),
        property.optionality.suffix()
    )
}

/// ObjectMapper transform used when (de)serializing `kind`.
pub fn transform_name(kind: TransformKind) -> &'static str {
    match kind {
        TransformKind::Url => "URLTransform",
        TransformKind::DateTime => "RFC3339Transform",
        TransformKind::Bytes => "Base64Transform",
    }
}

/// Expression turning `var` into the `String` sent as a query value.
pub fn query_value(property: &PropertyDeclaration, var: &str) -> String {
    if property.is_enum {
        return match property.target_type {
            TypeRef::List(_) => format!("{var}.map {{ $0.rawValue }}.joined(separator: \",\")"),
            _ => format!("{var}.rawValue"),
        };
    }
    match &property.target_type {
        TypeRef::Primitive(TargetType::String) => var.to_string(),
        TypeRef::List(inner) if **inner == TypeRef::Primitive(TargetType::String) => {
            format!("{var}.joined(separator: \",\")")
        }
        TypeRef::List(_) => format!("{var}.map {{ \"\\($0)\" }}.joined(separator: \",\")"),
        _ => format!("\"\\({var})\""),
    }
}

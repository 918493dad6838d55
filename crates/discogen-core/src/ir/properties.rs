use super::types::{TargetType, TransformKind};

/// A resolved type reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    Primitive(TargetType),
    /// A generated (or override-named) declaration.
    Named(String),
    List(Box<TypeRef>),
    /// String-keyed map.
    Map(Box<TypeRef>),
    /// No resolution rule applied; emitted as a typed placeholder.
    Unresolved,
}

impl TypeRef {
    pub fn named(name: impl Into<String>) -> Self {
        TypeRef::Named(name.into())
    }

    pub fn list(inner: TypeRef) -> Self {
        TypeRef::List(Box::new(inner))
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, TypeRef::Primitive(_))
    }

    pub fn is_unresolved(&self) -> bool {
        matches!(self, TypeRef::Unresolved)
    }

    /// Element type of a list, or the type itself.
    pub fn element(&self) -> &TypeRef {
        match self {
            TypeRef::List(inner) => inner,
            other => other,
        }
    }

    /// Parse a type name supplied by an override document.
    pub fn from_override(name: &str) -> TypeRef {
        let name = name.trim();
        if let Some(inner) = name.strip_prefix('[').and_then(|n| n.strip_suffix(']')) {
            if let Some((key, value)) = inner.split_once(':') {
                if key.trim() == "String" {
                    return TypeRef::Map(Box::new(TypeRef::from_override(value)));
                }
            } else {
                return TypeRef::list(TypeRef::from_override(inner));
            }
        }
        match TargetType::from_name(name) {
            Some(ty) => TypeRef::Primitive(ty),
            None => TypeRef::named(name),
        }
    }
}

/// How a property's presence is expressed in the emitted type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Optionality {
    Optional,
    NonOptional,
    ImplicitlyUnwrapped,
}

impl Optionality {
    pub fn suffix(&self) -> &'static str {
        match self {
            Optionality::Optional => "?",
            Optionality::NonOptional => "",
            Optionality::ImplicitlyUnwrapped => "!",
        }
    }
}

/// Parameter location for method parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterLocation {
    Query,
    Path,
}

/// A property (or parameter) derived from a schema node.
#[derive(Debug, Clone)]
pub struct PropertyDeclaration {
    /// Name as found in the JSON document.
    pub source_name: String,
    /// Sanitized identifier.
    pub identifier_name: String,
    pub target_type: TypeRef,
    pub optionality: Optionality,
    pub is_enum: bool,
    /// Default value as a literal in target source syntax.
    pub default_value: Option<String>,
    pub required: bool,
    pub description: Option<String>,
    pub location: Option<ParameterLocation>,
    pub transform: Option<TransformKind>,
}

impl PropertyDeclaration {
    /// Key used for set membership and deduplication.
    pub fn dedup_key(&self) -> &str {
        &self.identifier_name
    }

    /// Full equivalence: name, type, optionality, and default value all match.
    pub fn is_equivalent(&self, other: &PropertyDeclaration) -> bool {
        self.identifier_name == other.identifier_name
            && self.target_type == other.target_type
            && self.optionality == other.optionality
            && self.default_value == other.default_value
    }

    pub fn is_query(&self) -> bool {
        self.location == Some(ParameterLocation::Query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn property(name: &str, ty: TypeRef) -> PropertyDeclaration {
        PropertyDeclaration {
            source_name: name.to_string(),
            identifier_name: name.to_string(),
            target_type: ty,
            optionality: Optionality::Optional,
            is_enum: false,
            default_value: None,
            required: false,
            description: None,
            location: None,
            transform: None,
        }
    }

    #[test]
    fn test_dedup_key_ignores_type() {
        let a = property("pageToken", TypeRef::Primitive(TargetType::String));
        let b = property("pageToken", TypeRef::Primitive(TargetType::Int));
        assert_eq!(a.dedup_key(), b.dedup_key());
        assert!(!a.is_equivalent(&b));
    }

    #[test]
    fn test_equivalence_compares_default() {
        let a = property("maxResults", TypeRef::Primitive(TargetType::Int));
        let mut b = a.clone();
        assert!(a.is_equivalent(&b));
        b.default_value = Some("10".to_string());
        assert!(!a.is_equivalent(&b));
        // Description is not part of equivalence.
        b.default_value = None;
        b.description = Some("Maximum results.".to_string());
        assert!(a.is_equivalent(&b));
    }

    #[test]
    fn test_type_from_override() {
        assert_eq!(
            TypeRef::from_override("String"),
            TypeRef::Primitive(TargetType::String)
        );
        assert_eq!(
            TypeRef::from_override("[Int64]"),
            TypeRef::list(TypeRef::Primitive(TargetType::Int64))
        );
        assert_eq!(
            TypeRef::from_override("[String: BooksVolume]"),
            TypeRef::Map(Box::new(TypeRef::named("BooksVolume")))
        );
        assert_eq!(TypeRef::from_override("MyType"), TypeRef::named("MyType"));
    }
}

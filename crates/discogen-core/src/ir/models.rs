use super::properties::{PropertyDeclaration, TypeRef};
use super::types::TargetType;

/// Base type of a generated model class.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Supertype {
    /// Resources carrying a `kind` discriminator.
    GoogleObject,
    /// Plain mappable objects.
    Mappable,
    /// Paginated list resources.
    GoogleObjectList,
    /// Supplied by an override document.
    Custom(String),
}

impl Supertype {
    pub fn as_str(&self) -> &str {
        match self {
            Supertype::GoogleObject => "GoogleObject",
            Supertype::Mappable => "Mappable",
            Supertype::GoogleObjectList => "GoogleObjectList",
            Supertype::Custom(name) => name,
        }
    }
}

/// A class-like declaration.
#[derive(Debug, Clone)]
pub struct ModelDeclaration {
    pub name: String,
    pub supertype: Supertype,
    pub properties: Vec<PropertyDeclaration>,
    pub description: Option<String>,
}

/// A model backed by a list of items (a paginated response).
#[derive(Debug, Clone)]
pub struct ListModelDeclaration {
    pub name: String,
    pub supertype: Supertype,
    /// Element type of the backing `items` list.
    pub item_type: TypeRef,
    /// The `items` property itself.
    pub items: PropertyDeclaration,
    /// Every other property, in document order.
    pub properties: Vec<PropertyDeclaration>,
    pub description: Option<String>,
}

/// One enum case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumCase {
    /// Raw value as it appears in JSON.
    pub raw_value: String,
    /// Literal in target source syntax (quoted for strings).
    pub literal: String,
    pub identifier: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct EnumDeclaration {
    pub name: String,
    pub raw_type: TargetType,
    pub cases: Vec<EnumCase>,
    pub description: Option<String>,
}

/// The OAuth scopes enum; always string-backed.
#[derive(Debug, Clone)]
pub struct ScopesEnumDeclaration {
    pub name: String,
    pub cases: Vec<EnumCase>,
}

impl ScopesEnumDeclaration {
    pub fn raw_type(&self) -> TargetType {
        TargetType::String
    }
}

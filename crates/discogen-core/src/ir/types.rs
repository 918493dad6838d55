use indexmap::IndexMap;

use super::declaration::Declaration;

/// The fully resolved declaration set for one generation run, grouped by output file.
#[derive(Debug, Clone)]
pub struct IrSpec {
    pub info: IrInfo,
    /// Group key holding the service declaration.
    pub service_group: String,
    /// File group name -> declarations destined for that file, in production order.
    pub groups: IndexMap<String, Vec<Declaration>>,
}

impl IrSpec {
    pub fn declaration_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// Find a declaration by name in any group.
    pub fn find(&self, name: &str) -> Option<&Declaration> {
        self.groups.values().flatten().find(|d| d.name() == name)
    }
}

/// API metadata.
#[derive(Debug, Clone)]
pub struct IrInfo {
    /// Raw API name as it appears in URLs (e.g. `books`).
    pub api_name: String,
    pub version: String,
    /// Sanitized, capitalized service identifier (e.g. `Books`).
    pub service_name: String,
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Target primitive types produced by the Type Mapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetType {
    Bool,
    Int,
    UInt,
    Double,
    Float,
    String,
    Bytes,
    DateTime,
    Int64,
    UInt64,
    Url,
    Any,
}

impl TargetType {
    /// Parse a primitive as spelled in override documents (`Int`, `URL`, `Data`, ...).
    pub fn from_name(name: &str) -> Option<TargetType> {
        let ty = match name {
            "Bool" => TargetType::Bool,
            "Int" => TargetType::Int,
            "UInt" => TargetType::UInt,
            "Double" => TargetType::Double,
            "Float" => TargetType::Float,
            "String" => TargetType::String,
            "Data" => TargetType::Bytes,
            "Date" => TargetType::DateTime,
            "Int64" => TargetType::Int64,
            "UInt64" => TargetType::UInt64,
            "URL" => TargetType::Url,
            "Any" => TargetType::Any,
            _ => return None,
        };
        Some(ty)
    }
}

/// Types that need a custom encode/decode transform when emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransformKind {
    Url,
    DateTime,
    Bytes,
}

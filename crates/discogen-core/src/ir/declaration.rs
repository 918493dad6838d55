use std::collections::HashSet;

use super::models::{EnumDeclaration, ListModelDeclaration, ModelDeclaration, ScopesEnumDeclaration};
use super::service::ServiceDeclaration;

/// Every kind of generated source construct.
#[derive(Debug, Clone)]
pub enum Declaration {
    Model(ModelDeclaration),
    ModelList(ListModelDeclaration),
    Enum(EnumDeclaration),
    Service(ServiceDeclaration),
    Scopes(ScopesEnumDeclaration),
}

impl Declaration {
    pub fn name(&self) -> &str {
        match self {
            Declaration::Model(m) => &m.name,
            Declaration::ModelList(l) => &l.name,
            Declaration::Enum(e) => &e.name,
            Declaration::Service(s) => &s.name,
            Declaration::Scopes(s) => &s.name,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Declaration::Model(_) => "model",
            Declaration::ModelList(_) => "model_list",
            Declaration::Enum(_) => "enum",
            Declaration::Service(_) => "service",
            Declaration::Scopes(_) => "scopes",
        }
    }
}

/// Drop later declarations whose name was already seen, keeping first-seen order.
pub fn dedup_by_name(declarations: &[Declaration]) -> Vec<&Declaration> {
    let mut seen = HashSet::new();
    declarations
        .iter()
        .filter(|d| seen.insert(d.name().to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{Supertype, TargetType};

    fn model(name: &str) -> Declaration {
        Declaration::Model(ModelDeclaration {
            name: name.to_string(),
            supertype: Supertype::Mappable,
            properties: Vec::new(),
            description: None,
        })
    }

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        let enum_decl = Declaration::Enum(EnumDeclaration {
            name: "BooksVolumeStatus".to_string(),
            raw_type: TargetType::String,
            cases: Vec::new(),
            description: None,
        });
        let decls = vec![
            model("BooksVolume"),
            model("BooksVolumeAuthor"),
            enum_decl,
            model("BooksVolumeAuthor"),
        ];
        let deduped = dedup_by_name(&decls);
        let names: Vec<&str> = deduped.iter().map(|d| d.name()).collect();
        assert_eq!(
            names,
            vec!["BooksVolume", "BooksVolumeAuthor", "BooksVolumeStatus"]
        );
        assert_eq!(deduped[2].kind(), "enum");
    }
}

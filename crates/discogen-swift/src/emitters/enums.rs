use discogen_core::GeneratorError;
use discogen_core::ir::{EnumCase, EnumDeclaration, ScopesEnumDeclaration};
use minijinja::{Environment, Value, context};

use super::render;
use crate::type_mapper::primitive_name;

/// Emit a raw-value enum.
pub fn emit_enum(env: &Environment<'_>, decl: &EnumDeclaration) -> Result<String, GeneratorError> {
    render(
        env,
        "enum.swift.j2",
        context! {
            name => decl.name.clone(),
            raw_type => primitive_name(decl.raw_type),
            description => decl.description.clone(),
            cases => cases_ctx(&decl.cases),
        },
    )
}

/// Emit the OAuth scopes enum; case docs carry the scope descriptions.
pub fn emit_scopes(env: &Environment<'_>, decl: &ScopesEnumDeclaration) -> Result<String, GeneratorError> {
    render(
        env,
        "enum.swift.j2",
        context! {
            name => decl.name.clone(),
            raw_type => primitive_name(decl.raw_type()),
            cases => cases_ctx(&decl.cases),
        },
    )
}

fn cases_ctx(cases: &[EnumCase]) -> Vec<Value> {
    cases
        .iter()
        .map(|c| {
            context! {
                identifier => c.identifier.clone(),
                literal => c.literal.clone(),
                description => c.description.clone(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emitters::environment;
    use discogen_core::ir::TargetType;

    fn case(identifier: &str, raw: &str, description: Option<&str>) -> EnumCase {
        EnumCase {
            raw_value: raw.to_string(),
            literal: format!("\"{raw}\""),
            identifier: identifier.to_string(),
            description: description.map(str::to_string),
        }
    }

    #[test]
    fn test_string_enum() {
        let env = environment().unwrap();
        let decl = EnumDeclaration {
            name: "ServiceBookStatus".to_string(),
            raw_type: TargetType::String,
            cases: vec![case("Draft", "draft", None), case("Published", "published", None)],
            description: None,
        };
        let output = emit_enum(&env, &decl).unwrap();
        insta::assert_snapshot!(output, @r#"
        public enum ServiceBookStatus: String {
            case Draft = "draft"
            case Published = "published"
        }
        "#);
    }

    #[test]
    fn test_case_documentation() {
        let env = environment().unwrap();
        let decl = EnumDeclaration {
            name: "BooksVolumesProjection".to_string(),
            raw_type: TargetType::String,
            cases: vec![
                case("Full", "full", Some("Includes all volume data.")),
                case("Lite", "lite", None),
            ],
            description: Some("Restrict information returned to a set of selected fields.".to_string()),
        };
        let output = emit_enum(&env, &decl).unwrap();
        assert_eq!(
            output,
            "/// Restrict information returned to a set of selected fields.\n\
             public enum BooksVolumesProjection: String {\n    \
             /// Includes all volume data.\n    \
             case Full = \"full\"\n    \
             case Lite = \"lite\"\n\
             }"
        );
    }

    #[test]
    fn test_scopes_enum() {
        let env = environment().unwrap();
        let decl = ScopesEnumDeclaration {
            name: "BooksOAuthScopes".to_string(),
            cases: vec![case(
                "Books",
                "https://www.googleapis.com/auth/books",
                Some("Manage your books"),
            )],
        };
        let output = emit_scopes(&env, &decl).unwrap();
        assert!(output.starts_with("public enum BooksOAuthScopes: String {"));
        assert!(output.contains("    /// Manage your books\n"));
        assert!(output.contains("    case Books = \"https://www.googleapis.com/auth/books\""));
    }
}

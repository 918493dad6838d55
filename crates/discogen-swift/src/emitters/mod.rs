pub mod enums;
pub mod header;
pub mod model_class;
pub mod service;

use discogen_core::GeneratorError;
use discogen_core::ir::Declaration;
use minijinja::{Environment, Value};

const TEMPLATES: &[(&str, &str)] = &[
    ("header.swift.j2", include_str!("../../templates/header.swift.j2")),
    ("model_class.swift.j2", include_str!("../../templates/model_class.swift.j2")),
    ("model_list.swift.j2", include_str!("../../templates/model_list.swift.j2")),
    ("enum.swift.j2", include_str!("../../templates/enum.swift.j2")),
    ("service.swift.j2", include_str!("../../templates/service.swift.j2")),
];

/// Render `value` as `///` documentation lines indented by `indent` spaces.
fn doc_comment(value: String, indent: usize) -> String {
    let pad = " ".repeat(indent);
    value
        .lines()
        .map(|line| format!("{pad}/// {}", line.trim_end()).trim_end().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// The template environment shared by every emitter.
pub fn environment() -> Result<Environment<'static>, GeneratorError> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.add_filter("doc_comment", doc_comment);
    for &(name, source) in TEMPLATES {
        env.add_template(name, source)
            .map_err(|e| render_error(name, e))?;
    }
    Ok(env)
}

pub(crate) fn render(env: &Environment<'_>, name: &str, ctx: Value) -> Result<String, GeneratorError> {
    env.get_template(name)
        .and_then(|tmpl| tmpl.render(ctx))
        .map_err(|e| render_error(name, e))
}

fn render_error(name: &str, err: minijinja::Error) -> GeneratorError {
    GeneratorError::Render {
        name: name.to_string(),
        message: err.to_string(),
    }
}

/// Emit any declaration as Swift source.
pub fn emit(env: &Environment<'_>, declaration: &Declaration) -> Result<String, GeneratorError> {
    match declaration {
        Declaration::Model(model) => model_class::emit_model(env, model),
        Declaration::ModelList(list) => model_class::emit_model_list(env, list),
        Declaration::Enum(decl) => enums::emit_enum(env, decl),
        Declaration::Scopes(scopes) => enums::emit_scopes(env, scopes),
        Declaration::Service(service) => service::emit_service(env, service),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_doc_comment() {
        assert_eq!(doc_comment("One line.".to_string(), 0), "/// One line.");
        assert_eq!(
            doc_comment("First.\n\nThird.".to_string(), 4),
            "    /// First.\n    ///\n    /// Third."
        );
    }

    #[test]
    fn test_templates_compile() {
        let env = environment().unwrap();
        for (name, _) in TEMPLATES {
            assert!(env.get_template(name).is_ok(), "{name}");
        }
    }
}

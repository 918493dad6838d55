use chrono::NaiveDate;
use discogen_core::GeneratorError;
use discogen_core::config::HeaderConfig;
use minijinja::{Environment, context};

use super::render;

/// Emit the comment block and imports opening every generated file.
pub fn emit_header(
    env: &Environment<'_>,
    file_name: &str,
    header: &HeaderConfig,
    date: NaiveDate,
) -> Result<String, GeneratorError> {
    render(
        env,
        "header.swift.j2",
        context! {
            file_name => file_name,
            project_name => header.project_name.clone(),
            author => header.author.clone(),
            copyright_holder => header.copyright_holder(),
            created => date.format("%-m/%-d/%y").to_string(),
            year => date.format("%Y").to_string(),
        },
    )
}

use chrono::NaiveDate;
use discogen_core::config::HeaderConfig;
use discogen_core::ir::{IrSpec, dedup_by_name};
use discogen_core::{CodeGenerator, GeneratedFile, GeneratorError};
use log::debug;

use crate::emitters;

/// Settings for one Swift generation run.
#[derive(Debug, Clone)]
pub struct SwiftConfig {
    pub header: HeaderConfig,
    /// Date stamped into every file header.
    pub date: NaiveDate,
}

impl SwiftConfig {
    /// Header settings dated today.
    pub fn new(header: HeaderConfig) -> Self {
        Self {
            header,
            date: chrono::Local::now().date_naive(),
        }
    }
}

/// Swift/ObjectMapper client generator: one `.swift` file per declaration group.
pub struct SwiftGenerator;

impl CodeGenerator for SwiftGenerator {
    type Config = SwiftConfig;
    type Error = GeneratorError;

    fn generate(&self, ir: &IrSpec, config: &SwiftConfig) -> Result<Vec<GeneratedFile>, GeneratorError> {
        let env = emitters::environment()?;
        let mut files = Vec::with_capacity(ir.groups.len());

        for (group, declarations) in &ir.groups {
            let file_name = format!("{group}.swift");
            let unique = dedup_by_name(declarations);
            if unique.len() < declarations.len() {
                debug!(
                    "{file_name}: dropped {} duplicate declarations",
                    declarations.len() - unique.len()
                );
            }

            let mut content = emitters::header::emit_header(&env, &file_name, &config.header, config.date)?;
            content.push_str("\n\n");
            let rendered = unique
                .into_iter()
                .map(|decl| emitters::emit(&env, decl))
                .collect::<Result<Vec<_>, _>>()?;
            content.push_str(&rendered.join("\n\n"));
            content.push('\n');

            files.push(GeneratedFile {
                path: file_name,
                content,
            });
        }

        Ok(files)
    }
}

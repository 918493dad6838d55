pub mod config;
pub mod error;
pub mod fetch;
pub mod ir;
pub mod overrides;
pub mod parse;
pub mod pipeline;
pub mod transform;

pub use error::GeneratorError;

/// A generated file with path and content.
#[derive(Debug, Clone)]
pub struct GeneratedFile {
    pub path: String,
    pub content: String,
}

/// Trait for code generators that produce files from the declaration IR.
pub trait CodeGenerator {
    type Config;
    type Error: std::error::Error + Send + Sync + 'static;
    fn generate(
        &self,
        ir: &ir::IrSpec,
        config: &Self::Config,
    ) -> Result<Vec<GeneratedFile>, Self::Error>;
}

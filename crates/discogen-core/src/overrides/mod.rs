//! User-supplied renames and retypes layered over the mechanical output.
//!
//! An override document is loaded once per run from `<service>.override.json`
//! and passed explicitly into the transforms. Every lookup answers `None` when
//! the file or the key is absent.

pub mod document;

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::OverrideError;
pub use document::{
    OverrideDocument, OverrideMethod, OverrideModelClass, OverrideProperty, OverrideServiceClass,
};

/// Read-only override lookups for one generation run.
#[derive(Debug, Clone, Default)]
pub struct OverrideRegistry {
    document: OverrideDocument,
}

impl OverrideRegistry {
    /// A registry that never overrides anything.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(document: OverrideDocument) -> Self {
        Self { document }
    }

    pub fn from_json(input: &str) -> Result<Self, serde_json::Error> {
        Ok(Self::new(serde_json::from_str(input)?))
    }

    /// File name holding overrides for `service`.
    pub fn file_name(service: &str) -> String {
        format!("{service}.override.json")
    }

    pub fn path_for(dir: &Path, service: &str) -> PathBuf {
        dir.join(Self::file_name(service))
    }

    /// Load `<dir>/<service>.override.json`. A missing file yields an empty registry.
    pub fn load(dir: &Path, service: &str) -> Result<Self, OverrideError> {
        let path = Self::path_for(dir, service);
        if !path.exists() {
            log::debug!("no override file at {}", path.display());
            return Ok(Self::empty());
        }
        let content = fs::read_to_string(&path).map_err(|source| OverrideError::Io {
            path: path.clone(),
            source,
        })?;
        let registry =
            Self::from_json(&content).map_err(|source| OverrideError::Json { path: path.clone(), source })?;
        log::info!("loaded overrides from {}", path.display());
        Ok(registry)
    }

    pub fn document(&self) -> &OverrideDocument {
        &self.document
    }

    pub fn global_param(&self, name: &str) -> Option<&OverrideProperty> {
        self.document.service_class.params.get(name)
    }

    fn method(&self, method_id: &str) -> Option<&OverrideMethod> {
        self.document
            .service_class
            .methods
            .get(strip_service_segment(method_id))
    }

    pub fn method_base_name(&self, method_id: &str) -> Option<&str> {
        self.method(method_id)?.base_name.as_deref()
    }

    pub fn method_full_name(&self, method_id: &str) -> Option<&str> {
        self.method(method_id)?.full_method_name.as_deref()
    }

    /// Argument label for the positional parameter at `index`.
    pub fn method_param_name(&self, method_id: &str, index: usize) -> Option<&str> {
        self.method(method_id)?
            .param_names
            .get(&index.to_string())
            .map(String::as_str)
    }

    pub fn method_query_param(&self, method_id: &str, name: &str) -> Option<&OverrideProperty> {
        self.method(method_id)?.query_params.get(name)
    }

    pub fn model_class(&self, class_name: &str) -> Option<&OverrideModelClass> {
        self.document.model_classes.get(class_name)
    }

    pub fn model_supertype(&self, class_name: &str) -> Option<&str> {
        self.model_class(class_name)?.type_name.as_deref()
    }

    pub fn model_property(&self, class_name: &str, property: &str) -> Option<&OverrideProperty> {
        self.model_class(class_name)?.properties.get(property)
    }

    /// Case name for `raw` in the enum identified by `enum_id`.
    pub fn enum_case(&self, enum_id: &str, raw: &str) -> Option<&str> {
        self.document.enums.get(enum_id)?.get(raw).map(String::as_str)
    }

    pub fn scope_case(&self, generated: &str) -> Option<&str> {
        self.document
            .service_class
            .scopes_enum
            .get(generated)
            .map(String::as_str)
    }
}

/// `books.volumes.list` -> `volumes.list`.
pub fn strip_service_segment(method_id: &str) -> &str {
    match method_id.split_once('.') {
        Some((_, rest)) => rest,
        None => "",
    }
}

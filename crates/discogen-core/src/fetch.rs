//! The seam to whatever supplies discovery documents.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::FetchError;
use crate::parse::{self, document::DiscoveryDocument};

/// Supplies the discovery document for a service/version pair.
///
/// Fetching is the only step of a run allowed to block on the outside world.
pub trait DiscoverySource {
    fn fetch(&self, service: &str, version: &str) -> Result<DiscoveryDocument, FetchError>;
}

/// Reads discovery documents from disk.
///
/// `root` is either a single document or a directory of
/// `<service>.<version>.json` files.
#[derive(Debug, Clone)]
pub struct FileDiscoverySource {
    root: PathBuf,
}

impl FileDiscoverySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn document_path(&self, service: &str, version: &str) -> PathBuf {
        if self.root.is_dir() {
            self.root.join(format!("{service}.{version}.json"))
        } else {
            self.root.clone()
        }
    }
}

impl DiscoverySource for FileDiscoverySource {
    fn fetch(&self, service: &str, version: &str) -> Result<DiscoveryDocument, FetchError> {
        let path = self.document_path(service, version);
        let doc = read_document(&path)?;
        if doc.name != service || doc.version != version {
            log::warn!(
                "{} describes {} {}, not the requested {service} {version}",
                path.display(),
                doc.name,
                doc.version
            );
        }
        Ok(doc)
    }
}

/// Read and parse one discovery document.
pub fn read_document(path: &Path) -> Result<DiscoveryDocument, FetchError> {
    let content = fs::read_to_string(path).map_err(|source| FetchError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse::from_json(&content)?)
}

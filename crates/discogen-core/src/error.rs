use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("missing required field: {0}")]
    MissingField(String),
}

#[derive(Debug, Error)]
pub enum OverrideError {
    #[error("failed to read override file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse override file {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum TransformError {
    #[error("unsupported HTTP method `{verb}` on {method_id}")]
    UnsupportedHttpMethod { method_id: String, verb: String },

    #[error("schemas `{first}` and `{second}` both map to file group `{group}`")]
    GroupCollision {
        group: String,
        first: String,
        second: String,
    },
}

/// Failure of the external discovery collaborator.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to read discovery document {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("discovery request failed: {0}")]
    Http(String),

    #[error("invalid discovery document: {0}")]
    Parse(#[from] ParseError),
}

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("failed to render {name}: {message}")]
    Render { name: String, message: String },
}

/// Errors that abort a generation run.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("fetch failed: {0}")]
    FetchFailed(#[from] FetchError),

    #[error(transparent)]
    Transform(#[from] TransformError),

    #[error("emit failed: {0}")]
    Emit(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("failed to write {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

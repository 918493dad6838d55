pub mod directory;
pub mod document;
pub mod schema;

use crate::error::ParseError;
use directory::DirectoryList;
use document::DiscoveryDocument;

/// Parse a Discovery document from JSON.
pub fn from_json(input: &str) -> Result<DiscoveryDocument, ParseError> {
    let doc: DiscoveryDocument = serde_json::from_str(input)?;
    validate(&doc)?;
    Ok(doc)
}

/// Parse a discovery directory listing from JSON.
pub fn directory_from_json(input: &str) -> Result<DirectoryList, ParseError> {
    Ok(serde_json::from_str(input)?)
}

fn validate(doc: &DiscoveryDocument) -> Result<(), ParseError> {
    if doc.name.trim().is_empty() {
        return Err(ParseError::MissingField("name".to_string()));
    }
    if doc.version.trim().is_empty() {
        return Err(ParseError::MissingField("version".to_string()));
    }
    Ok(())
}

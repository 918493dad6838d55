use std::time::Duration;

use discogen_core::config::DiscoveryConfig;
use discogen_core::error::FetchError;
use discogen_core::fetch::DiscoverySource;
use discogen_core::parse::{self, directory::DirectoryList, document::DiscoveryDocument};
use log::debug;

/// Fetches discovery documents from a discovery service over HTTP.
pub struct HttpDiscoverySource {
    agent: ureq::Agent,
    base_url: String,
}

impl HttpDiscoverySource {
    pub fn new(config: &DiscoveryConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build();
        Self {
            agent,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    /// `{base_url}/{service}/{version}/rest`
    pub fn document_url(&self, service: &str, version: &str) -> String {
        format!("{}/{service}/{version}/rest", self.base_url)
    }

    /// The directory of every API the service knows about.
    pub fn list(&self) -> Result<DirectoryList, FetchError> {
        let body = self.get(&self.base_url)?;
        Ok(parse::directory_from_json(&body)?)
    }

    fn get(&self, url: &str) -> Result<String, FetchError> {
        debug!("GET {url}");
        let response = self
            .agent
            .get(url)
            .call()
            .map_err(|e| FetchError::Http(format!("{url}: {e}")))?;
        response
            .into_string()
            .map_err(|e| FetchError::Http(format!("{url}: failed to read response: {e}")))
    }
}

impl DiscoverySource for HttpDiscoverySource {
    fn fetch(&self, service: &str, version: &str) -> Result<DiscoveryDocument, FetchError> {
        let body = self.get(&self.document_url(service, version))?;
        Ok(parse::from_json(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_url() {
        let source = HttpDiscoverySource::new(&DiscoveryConfig::default());
        assert_eq!(
            source.document_url("books", "v1"),
            "https://www.googleapis.com/discovery/v1/apis/books/v1/rest"
        );
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let config = DiscoveryConfig {
            base_url: "http://localhost:8080/apis/".to_string(),
            timeout_secs: 5,
        };
        let source = HttpDiscoverySource::new(&config);
        assert_eq!(
            source.document_url("drive", "v3"),
            "http://localhost:8080/apis/drive/v3/rest"
        );
    }
}

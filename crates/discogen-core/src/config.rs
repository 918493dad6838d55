use std::fs;
use std::path::Path;

use serde::Deserialize;

/// Project configuration loaded from `.discogen.yaml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DiscogenConfig {
    /// Discovery API name, e.g. `books`.
    pub service: Option<String>,
    /// API version, e.g. `v1`.
    pub version: Option<String>,
    pub output: String,
    /// Directory searched for `<service>.override.json`.
    pub overrides_dir: String,
    pub discovery: DiscoveryConfig,
    pub header: HeaderConfig,
}

impl Default for DiscogenConfig {
    fn default() -> Self {
        Self {
            service: None,
            version: None,
            output: "Sources/Generated".to_string(),
            overrides_dir: ".".to_string(),
            discovery: DiscoveryConfig::default(),
            header: HeaderConfig::default(),
        }
    }
}

/// Where discovery documents come from.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_DISCOVERY_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

/// File header fields stamped on every generated file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HeaderConfig {
    pub project_name: String,
    pub author: String,
    /// Falls back to `author` when unset.
    pub copyright_holder: Option<String>,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            project_name: "GoogleAPISwiftClient".to_string(),
            author: "discogen".to_string(),
            copyright_holder: None,
        }
    }
}

impl HeaderConfig {
    pub fn copyright_holder(&self) -> &str {
        self.copyright_holder.as_deref().unwrap_or(&self.author)
    }
}

/// Public Google discovery service.
pub const DEFAULT_DISCOVERY_URL: &str = "https://www.googleapis.com/discovery/v1/apis";

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".discogen.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<DiscogenConfig>, String> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)
        .map_err(|e| format!("failed to read config {}: {}", path.display(), e))?;
    let config: DiscogenConfig = serde_yaml_ng::from_str(&content)
        .map_err(|e| format!("failed to parse config {}: {}", path.display(), e))?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# discogen configuration
# service: books
# version: v1
output: Sources/Generated
overrides_dir: .         # looks for <service>.override.json here

discovery:
  base_url: https://www.googleapis.com/discovery/v1/apis
  timeout_secs: 30

header:
  project_name: GoogleAPISwiftClient
  author: discogen
  # copyright_holder: Example Corp
"#
}

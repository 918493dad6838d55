use serde::{Deserialize, Serialize};

/// The discovery directory listing (`/discovery/v1/apis`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DirectoryList {
    #[serde(default)]
    pub items: Vec<DirectoryItem>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryItem {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub preferred: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discovery_rest_url: Option<String>,
}

impl DirectoryItem {
    /// `"<title>, <version>"`, falling back to the name when untitled.
    pub fn display_line(&self) -> String {
        let title = self.title.as_deref().unwrap_or(&self.name);
        format!("{}, {}", title, self.version)
    }
}

impl DirectoryList {
    pub fn preferred(&self) -> impl Iterator<Item = &DirectoryItem> {
        self.items.iter().filter(|i| i.preferred)
    }
}

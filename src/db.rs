use std::path::Path;

use serde::Deserialize;

use crate::error::Result;

// ---------------------------------------------------------------------------
// Raw catalogue records
//
// The on-disk/over-the-wire format belongs to external loaders; these structs
// are the already-parsed handoff they give to `Catalogue::build`. YAML
// convenience constructors are provided for loaders that keep their database
// in that form.
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct RawPattern {
    pub id: u32,
    pub regex: String,
    pub position: u32,
    #[serde(default)]
    pub version_group: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawBrowserType {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawBrowser {
    pub id: u32,
    pub family: String,
    /// Display name; defaults to the family when absent.
    #[serde(default)]
    pub name: Option<String>,
    pub type_id: u32,
    /// Non-owning association to an operating-system record.
    #[serde(default)]
    pub operating_system_id: Option<u32>,
    /// Declared device-category token (e.g. "personal computer").
    #[serde(default)]
    pub device_category: Option<String>,
    #[serde(default)]
    pub patterns: Vec<RawPattern>,
    #[serde(default)]
    pub producer: String,
    #[serde(default)]
    pub producer_url: String,
    #[serde(default)]
    pub info_url: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub icon: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawOperatingSystem {
    pub id: u32,
    pub name: String,
    pub family: String,
    #[serde(default)]
    pub patterns: Vec<RawPattern>,
    #[serde(default)]
    pub producer: String,
    #[serde(default)]
    pub producer_url: String,
    #[serde(default)]
    pub info_url: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub icon: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawDeviceCategory {
    /// Category token, resolved against the closed `Category` enumeration.
    pub category: String,
    pub name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub info_url: String,
}

/// The full set of already-parsed records handed to `Catalogue::build`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCatalogue {
    #[serde(default)]
    pub browser_types: Vec<RawBrowserType>,
    #[serde(default)]
    pub operating_systems: Vec<RawOperatingSystem>,
    #[serde(default)]
    pub browsers: Vec<RawBrowser>,
    #[serde(default)]
    pub device_categories: Vec<RawDeviceCategory>,
}

impl RawCatalogue {
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }
}

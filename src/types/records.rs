use super::Category;
use crate::pattern::PatternSet;

/// Descriptive browser-type metadata (e.g. "Browser", "Email client").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserType {
    pub id: u32,
    pub name: String,
}

/// Immutable browser record. Owns its `PatternSet`; the operating-system
/// association is a non-owning id into the catalogue (the platform a browser
/// is historically tied to), not a pointer to the record itself.
#[derive(Debug)]
pub struct Browser {
    pub id: u32,
    pub family: String,
    pub name: String,
    pub patterns: PatternSet,
    pub type_id: u32,
    pub operating_system_id: Option<u32>,
    pub device_category: Option<Category>,
    pub producer: String,
    pub producer_url: String,
    pub info_url: String,
    pub url: String,
    pub icon: String,
}

/// Immutable operating-system record, owning its `PatternSet`.
#[derive(Debug)]
pub struct OperatingSystem {
    pub id: u32,
    pub name: String,
    pub family: String,
    pub patterns: PatternSet,
    pub producer: String,
    pub producer_url: String,
    pub info_url: String,
    pub url: String,
    pub icon: String,
}

/// Descriptive metadata for one device category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceCategory {
    pub category: Category,
    pub name: String,
    pub icon: String,
    pub info_url: String,
}

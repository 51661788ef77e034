use std::borrow::Cow;

use super::Category;

/// Sentinel for the browser family and name when no pattern matched.
pub const UNKNOWN: &str = "unknown";

/// The classification produced by one `classify` call.
///
/// Borrows from the catalogue (record fields) and from the input string
/// (extracted version), avoiding allocation on the match path. Every field
/// is always defined: a dimension that did not match carries its canonical
/// empty value, so unmatched results compare equal across calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification<'a> {
    pub family: Cow<'a, str>,
    pub name: Cow<'a, str>,
    pub version: Cow<'a, str>,
    pub browser_type: Cow<'a, str>,
    pub producer: Cow<'a, str>,
    pub producer_url: Cow<'a, str>,
    pub info_url: Cow<'a, str>,
    pub url: Cow<'a, str>,
    pub icon: Cow<'a, str>,
    pub operating_system: OsInfo<'a>,
    pub device: DeviceInfo<'a>,
}

/// Operating-system fields of a classification. "No match" is the
/// distinguished empty value, not an absent one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OsInfo<'a> {
    pub name: Cow<'a, str>,
    pub family: Cow<'a, str>,
    pub producer: Cow<'a, str>,
    pub producer_url: Cow<'a, str>,
    pub info_url: Cow<'a, str>,
    pub url: Cow<'a, str>,
    pub icon: Cow<'a, str>,
}

/// Device-category fields of a classification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceInfo<'a> {
    pub category: Category,
    pub name: Cow<'a, str>,
    pub icon: Cow<'a, str>,
    pub info_url: Cow<'a, str>,
}

impl<'a> OsInfo<'a> {
    /// True unless this is the distinguished empty value.
    pub fn is_matched(&self) -> bool {
        !self.name.is_empty() || !self.family.is_empty()
    }
}

impl<'a> Classification<'a> {
    /// The canonical "unknown" result: family and name `"unknown"`, every
    /// other string empty, device category `Other`.
    pub fn unknown() -> Self {
        Self {
            family: Cow::Borrowed(UNKNOWN),
            name: Cow::Borrowed(UNKNOWN),
            version: Cow::Borrowed(""),
            browser_type: Cow::Borrowed(""),
            producer: Cow::Borrowed(""),
            producer_url: Cow::Borrowed(""),
            info_url: Cow::Borrowed(""),
            url: Cow::Borrowed(""),
            icon: Cow::Borrowed(""),
            operating_system: OsInfo::default(),
            device: DeviceInfo::default(),
        }
    }

    /// True when the browser dimension matched.
    pub fn is_browser_matched(&self) -> bool {
        self.family != UNKNOWN
    }
}

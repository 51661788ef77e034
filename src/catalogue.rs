use indexmap::IndexMap;
use rayon::prelude::*;

use crate::db::{RawBrowser, RawCatalogue, RawOperatingSystem, RawPattern};
use crate::error::{Error, Result};
use crate::pattern::{PatternEntry, PatternSet};
use crate::prefilter::LiteralPrefilter;
use crate::types::{Browser, BrowserType, Category, DeviceCategory, OperatingSystem};

/// One entry of a flattened search sequence: indices into the dimension's
/// record vector and into that record's `PatternSet`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SearchEntry {
    pub record: usize,
    pub pattern: usize,
}

/// The immutable classification database: all category records, their
/// compiled pattern sets, by-id lookup tables, and the flattened
/// priority-ordered search sequences for the browser and operating-system
/// dimensions.
///
/// Built once by `Catalogue::build` and never mutated afterwards, so any
/// number of threads may classify against a shared reference without
/// synchronization. Replacing the database means building a new catalogue
/// and swapping the reference atomically; that is the caller's concern.
#[derive(Debug)]
pub struct Catalogue {
    browsers: Vec<Browser>,
    operating_systems: Vec<OperatingSystem>,
    browser_types: IndexMap<u32, BrowserType>,
    device_categories: IndexMap<Category, DeviceCategory>,
    browser_index: IndexMap<u32, usize>,
    os_index: IndexMap<u32, usize>,
    browser_order: Vec<SearchEntry>,
    os_order: Vec<SearchEntry>,
    browser_prefilter: LiteralPrefilter,
    os_prefilter: LiteralPrefilter,
}

impl Catalogue {
    /// Validate the raw records, compile every pattern, flatten the search
    /// sequences and freeze. Fails on the first invariant violation: empty
    /// required field, duplicate id, unresolvable reference, unknown
    /// category token or uncompilable regex.
    pub fn build(raw: RawCatalogue) -> Result<Self> {
        // Browser types.
        let mut browser_types: IndexMap<u32, BrowserType> = IndexMap::new();
        for t in raw.browser_types {
            if t.name.is_empty() {
                return Err(Error::EmptyField {
                    kind: "browser type",
                    id: t.id,
                    field: "name",
                });
            }
            if browser_types
                .insert(t.id, BrowserType { id: t.id, name: t.name })
                .is_some()
            {
                return Err(Error::DuplicateId {
                    kind: "browser type",
                    id: t.id,
                });
            }
        }

        // Device categories, keyed by resolved category.
        let mut device_categories: IndexMap<Category, DeviceCategory> = IndexMap::new();
        for d in raw.device_categories {
            let category = Category::from_str(&d.category).ok_or(Error::UnknownCategory {
                token: d.category.clone(),
            })?;
            if d.name.is_empty() {
                return Err(Error::EmptyField {
                    kind: "device category",
                    id: category as u32,
                    field: "name",
                });
            }
            let record = DeviceCategory {
                category,
                name: d.name,
                icon: d.icon,
                info_url: d.info_url,
            };
            if device_categories.insert(category, record).is_some() {
                return Err(Error::DuplicateCategory {
                    category: category.as_str(),
                });
            }
        }

        // Operating systems: pattern compilation dominates, run it in
        // parallel across records.
        let operating_systems: Vec<OperatingSystem> = raw
            .operating_systems
            .into_par_iter()
            .map(build_operating_system)
            .collect::<Result<Vec<_>>>()?;

        let mut os_index: IndexMap<u32, usize> = IndexMap::new();
        for (idx, os) in operating_systems.iter().enumerate() {
            if os_index.insert(os.id, idx).is_some() {
                return Err(Error::DuplicateId {
                    kind: "operating system",
                    id: os.id,
                });
            }
        }

        // Browsers, referencing the tables built above.
        let browsers: Vec<Browser> = raw
            .browsers
            .into_par_iter()
            .map(|b| build_browser(b, &browser_types, &os_index))
            .collect::<Result<Vec<_>>>()?;

        let mut browser_index: IndexMap<u32, usize> = IndexMap::new();
        for (idx, b) in browsers.iter().enumerate() {
            if browser_index.insert(b.id, idx).is_some() {
                return Err(Error::DuplicateId {
                    kind: "browser",
                    id: b.id,
                });
            }
        }

        // Flatten each dimension into one globally ordered sequence and
        // build its literal prefilter.
        let browser_order = flatten(browsers.iter().map(|b| (b.id, &b.patterns)));
        let os_order = flatten(operating_systems.iter().map(|o| (o.id, &o.patterns)));

        let browser_prefilter = LiteralPrefilter::build(
            browser_order
                .iter()
                .map(|e| browsers[e.record].patterns.entries()[e.pattern].regex_source()),
        )?;
        let os_prefilter = LiteralPrefilter::build(
            os_order
                .iter()
                .map(|e| operating_systems[e.record].patterns.entries()[e.pattern].regex_source()),
        )?;

        Ok(Self {
            browsers,
            operating_systems,
            browser_types,
            device_categories,
            browser_index,
            os_index,
            browser_order,
            os_order,
            browser_prefilter,
            os_prefilter,
        })
    }

    pub fn browsers(&self) -> &[Browser] {
        &self.browsers
    }

    pub fn operating_systems(&self) -> &[OperatingSystem] {
        &self.operating_systems
    }

    pub fn browser(&self, id: u32) -> Option<&Browser> {
        self.browser_index.get(&id).map(|&idx| &self.browsers[idx])
    }

    pub fn operating_system(&self, id: u32) -> Option<&OperatingSystem> {
        self.os_index.get(&id).map(|&idx| &self.operating_systems[idx])
    }

    pub fn browser_type(&self, id: u32) -> Option<&BrowserType> {
        self.browser_types.get(&id)
    }

    pub fn device_category(&self, category: Category) -> Option<&DeviceCategory> {
        self.device_categories.get(&category)
    }

    pub(crate) fn browser_order(&self) -> &[SearchEntry] {
        &self.browser_order
    }

    pub(crate) fn os_order(&self) -> &[SearchEntry] {
        &self.os_order
    }

    pub(crate) fn browser_prefilter(&self) -> &LiteralPrefilter {
        &self.browser_prefilter
    }

    pub(crate) fn os_prefilter(&self) -> &LiteralPrefilter {
        &self.os_prefilter
    }
}

/// Flatten one dimension's pattern sets into a single search sequence
/// ordered by `(position, pattern id, record id)`. Position is a global
/// priority across records: the pattern for a specific variant sorts before
/// the generic one regardless of which record owns it.
fn flatten<'a>(records: impl Iterator<Item = (u32, &'a PatternSet)>) -> Vec<SearchEntry> {
    let mut order: Vec<(u32, u32, u32, SearchEntry)> = Vec::new();
    for (record_idx, (record_id, set)) in records.enumerate() {
        for (pattern_idx, entry) in set.entries().iter().enumerate() {
            order.push((
                entry.position(),
                entry.id(),
                record_id,
                SearchEntry {
                    record: record_idx,
                    pattern: pattern_idx,
                },
            ));
        }
    }
    order.sort_by_key(|&(position, pattern_id, record_id, _)| (position, pattern_id, record_id));
    order.into_iter().map(|(_, _, _, e)| e).collect()
}

fn compile_pattern_set(raw: Vec<RawPattern>) -> Result<PatternSet> {
    let entries = raw
        .into_iter()
        .map(|p| PatternEntry::compile(p.id, &p.regex, p.position, p.version_group))
        .collect::<Result<Vec<_>>>()?;
    PatternSet::from_entries(entries)
}

fn build_operating_system(raw: RawOperatingSystem) -> Result<OperatingSystem> {
    if raw.name.is_empty() {
        return Err(Error::EmptyField {
            kind: "operating system",
            id: raw.id,
            field: "name",
        });
    }
    if raw.family.is_empty() {
        return Err(Error::EmptyField {
            kind: "operating system",
            id: raw.id,
            field: "family",
        });
    }
    Ok(OperatingSystem {
        id: raw.id,
        patterns: compile_pattern_set(raw.patterns)?,
        name: raw.name,
        family: raw.family,
        producer: raw.producer,
        producer_url: raw.producer_url,
        info_url: raw.info_url,
        url: raw.url,
        icon: raw.icon,
    })
}

fn build_browser(
    raw: RawBrowser,
    browser_types: &IndexMap<u32, BrowserType>,
    os_index: &IndexMap<u32, usize>,
) -> Result<Browser> {
    if raw.family.is_empty() {
        return Err(Error::EmptyField {
            kind: "browser",
            id: raw.id,
            field: "family",
        });
    }
    if raw.name.as_deref() == Some("") {
        return Err(Error::EmptyField {
            kind: "browser",
            id: raw.id,
            field: "name",
        });
    }
    if !browser_types.contains_key(&raw.type_id) {
        return Err(Error::UnknownReference {
            kind: "browser",
            id: raw.id,
            target: "browser type",
            target_id: raw.type_id,
        });
    }
    if let Some(os_id) = raw.operating_system_id {
        if !os_index.contains_key(&os_id) {
            return Err(Error::UnknownReference {
                kind: "browser",
                id: raw.id,
                target: "operating system",
                target_id: os_id,
            });
        }
    }
    let device_category = match raw.device_category {
        Some(token) => {
            Some(Category::from_str(&token).ok_or(Error::UnknownCategory { token })?)
        }
        None => None,
    };
    Ok(Browser {
        id: raw.id,
        name: raw.name.unwrap_or_else(|| raw.family.clone()),
        family: raw.family,
        patterns: compile_pattern_set(raw.patterns)?,
        type_id: raw.type_id,
        operating_system_id: raw.operating_system_id,
        device_category,
        producer: raw.producer,
        producer_url: raw.producer_url,
        info_url: raw.info_url,
        url: raw.url,
        icon: raw.icon,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{RawBrowserType, RawDeviceCategory};

    fn pattern(id: u32, regex: &str, position: u32) -> RawPattern {
        RawPattern {
            id,
            regex: regex.to_string(),
            position,
            version_group: None,
        }
    }

    fn browser_type(id: u32) -> RawBrowserType {
        RawBrowserType {
            id,
            name: "Browser".to_string(),
        }
    }

    fn browser(id: u32, family: &str, patterns: Vec<RawPattern>) -> RawBrowser {
        RawBrowser {
            id,
            family: family.to_string(),
            name: None,
            type_id: 1,
            operating_system_id: None,
            device_category: None,
            patterns,
            producer: String::new(),
            producer_url: String::new(),
            info_url: String::new(),
            url: String::new(),
            icon: String::new(),
        }
    }

    #[test]
    fn empty_raw_catalogue_builds() {
        let c = Catalogue::build(RawCatalogue::default()).unwrap();
        assert!(c.browsers().is_empty());
        assert!(c.browser_order().is_empty());
    }

    #[test]
    fn lookup_by_id() {
        let raw = RawCatalogue {
            browser_types: vec![browser_type(1)],
            browsers: vec![browser(10, "Firefox", vec![pattern(1, "Firefox", 1)])],
            ..Default::default()
        };
        let c = Catalogue::build(raw).unwrap();
        assert_eq!(c.browser(10).unwrap().family, "Firefox");
        assert!(c.browser(11).is_none());
        assert_eq!(c.browser_type(1).unwrap().name, "Browser");
    }

    #[test]
    fn flatten_orders_by_position_across_records() {
        // The specific "Chrome Mobile" pattern (position 1) belongs to a
        // different browser than the generic "Chrome" one (position 2); the
        // flattened sequence must still try it first.
        let raw = RawCatalogue {
            browser_types: vec![browser_type(1)],
            browsers: vec![
                browser(1, "Chrome", vec![pattern(2, "Chrome", 2)]),
                browser(2, "Chrome Mobile", vec![pattern(1, "Chrome Mobile", 1)]),
            ],
            ..Default::default()
        };
        let c = Catalogue::build(raw).unwrap();
        let first = c.browser_order()[0];
        assert_eq!(c.browsers()[first.record].family, "Chrome Mobile");
    }

    #[test]
    fn empty_family_rejected() {
        let raw = RawCatalogue {
            browser_types: vec![browser_type(1)],
            browsers: vec![browser(1, "", vec![])],
            ..Default::default()
        };
        let err = Catalogue::build(raw).unwrap_err();
        assert!(matches!(
            err,
            Error::EmptyField { kind: "browser", id: 1, field: "family" }
        ));
    }

    #[test]
    fn empty_explicit_name_rejected() {
        // An absent name defaults to the family; an explicitly empty one is
        // a violated invariant, not a default.
        let mut b = browser(1, "Firefox", vec![]);
        b.name = Some(String::new());
        let raw = RawCatalogue {
            browser_types: vec![browser_type(1)],
            browsers: vec![b],
            ..Default::default()
        };
        assert!(matches!(
            Catalogue::build(raw).unwrap_err(),
            Error::EmptyField { kind: "browser", id: 1, field: "name" }
        ));
    }

    #[test]
    fn duplicate_browser_id_rejected() {
        let raw = RawCatalogue {
            browser_types: vec![browser_type(1)],
            browsers: vec![browser(1, "A", vec![]), browser(1, "B", vec![])],
            ..Default::default()
        };
        assert!(matches!(
            Catalogue::build(raw).unwrap_err(),
            Error::DuplicateId { kind: "browser", id: 1 }
        ));
    }

    #[test]
    fn duplicate_os_id_rejected() {
        let os = |name: &str| RawOperatingSystem {
            id: 3,
            name: name.to_string(),
            family: name.to_string(),
            patterns: vec![],
            producer: String::new(),
            producer_url: String::new(),
            info_url: String::new(),
            url: String::new(),
            icon: String::new(),
        };
        let raw = RawCatalogue {
            operating_systems: vec![os("Linux"), os("FreeBSD")],
            ..Default::default()
        };
        assert!(matches!(
            Catalogue::build(raw).unwrap_err(),
            Error::DuplicateId { kind: "operating system", id: 3 }
        ));
    }

    #[test]
    fn unknown_type_reference_rejected() {
        let raw = RawCatalogue {
            browsers: vec![browser(1, "A", vec![])],
            ..Default::default()
        };
        assert!(matches!(
            Catalogue::build(raw).unwrap_err(),
            Error::UnknownReference { target: "browser type", target_id: 1, .. }
        ));
    }

    #[test]
    fn unknown_os_reference_rejected() {
        let mut b = browser(1, "A", vec![]);
        b.operating_system_id = Some(99);
        let raw = RawCatalogue {
            browser_types: vec![browser_type(1)],
            browsers: vec![b],
            ..Default::default()
        };
        assert!(matches!(
            Catalogue::build(raw).unwrap_err(),
            Error::UnknownReference { target: "operating system", target_id: 99, .. }
        ));
    }

    #[test]
    fn invalid_regex_rejected() {
        let raw = RawCatalogue {
            browser_types: vec![browser_type(1)],
            browsers: vec![browser(1, "A", vec![pattern(5, "(broken", 1)])],
            ..Default::default()
        };
        assert!(matches!(
            Catalogue::build(raw).unwrap_err(),
            Error::InvalidPattern { id: 5, .. }
        ));
    }

    #[test]
    fn unknown_category_token_rejected() {
        let raw = RawCatalogue {
            device_categories: vec![RawDeviceCategory {
                category: "hovercraft".to_string(),
                name: "Hovercraft".to_string(),
                icon: String::new(),
                info_url: String::new(),
            }],
            ..Default::default()
        };
        assert!(matches!(
            Catalogue::build(raw).unwrap_err(),
            Error::UnknownCategory { .. }
        ));
    }

    #[test]
    fn duplicate_category_rejected() {
        let cat = |name: &str| RawDeviceCategory {
            category: "smartphone".to_string(),
            name: name.to_string(),
            icon: String::new(),
            info_url: String::new(),
        };
        let raw = RawCatalogue {
            device_categories: vec![cat("Smartphone"), cat("Phone")],
            ..Default::default()
        };
        assert!(matches!(
            Catalogue::build(raw).unwrap_err(),
            Error::DuplicateCategory { .. }
        ));
    }
}

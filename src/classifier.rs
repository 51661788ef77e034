use crate::catalogue::Catalogue;
use crate::merger::merge;
use crate::types::{Browser, Classification, OperatingSystem};

/// A browser-dimension match: the winning record plus the version string
/// captured from the input, when the winning pattern declared one.
#[derive(Debug, Clone, Copy)]
pub(crate) struct BrowserMatch<'a> {
    pub browser: &'a Browser,
    pub version: Option<&'a str>,
}

/// The matching engine. Owns an immutable catalogue; `classify` is pure,
/// synchronous and re-entrant, so one classifier may be shared across any
/// number of threads.
#[derive(Debug)]
pub struct Classifier {
    catalogue: Catalogue,
}

impl Classifier {
    pub fn new(catalogue: Catalogue) -> Self {
        Self { catalogue }
    }

    pub fn catalogue(&self) -> &Catalogue {
        &self.catalogue
    }

    pub fn into_catalogue(self) -> Catalogue {
        self.catalogue
    }

    /// Classify a raw user-agent string.
    ///
    /// Runs the browser and operating-system searches independently over
    /// their flattened priority sequences and merges the partial matches.
    /// "No match" in any dimension is a normal outcome: the corresponding
    /// fields carry their sentinel values and the device category falls
    /// back to `Other`. Any string content is valid input; an unknown or
    /// garbage user agent simply matches nothing.
    pub fn classify<'a>(&'a self, user_agent: &'a str) -> Classification<'a> {
        if user_agent.is_empty() {
            return Classification::unknown();
        }
        let browser = self.match_browser(user_agent);
        let os = self.match_operating_system(user_agent);
        merge(&self.catalogue, browser, os)
    }

    /// First match over the flattened browser sequence. The prefilter
    /// yields candidate indices in sequence order, so the first regex
    /// success is the globally highest-priority match.
    fn match_browser<'a>(&'a self, user_agent: &'a str) -> Option<BrowserMatch<'a>> {
        let order = self.catalogue.browser_order();
        for idx in self.catalogue.browser_prefilter().candidates(user_agent) {
            let entry = order[idx];
            let browser = &self.catalogue.browsers()[entry.record];
            let pattern = &browser.patterns.entries()[entry.pattern];
            if let Some(m) = pattern.try_match(user_agent) {
                return Some(BrowserMatch {
                    browser,
                    version: m.version,
                });
            }
        }
        None
    }

    /// Identical algorithm over the operating-system sequence.
    fn match_operating_system<'a>(&'a self, user_agent: &'a str) -> Option<&'a OperatingSystem> {
        let order = self.catalogue.os_order();
        for idx in self.catalogue.os_prefilter().candidates(user_agent) {
            let entry = order[idx];
            let os = &self.catalogue.operating_systems()[entry.record];
            let pattern = &os.patterns.entries()[entry.pattern];
            if pattern.try_match(user_agent).is_some() {
                return Some(os);
            }
        }
        None
    }
}

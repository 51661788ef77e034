use std::borrow::Cow;

use crate::catalogue::Catalogue;
use crate::classifier::BrowserMatch;
use crate::types::{Browser, Category, Classification, DeviceCategory, OperatingSystem, OsInfo};

/// Mutable accumulator for one classification. Starts from the canonical
/// unknown result and is overwritten field by field as matches are applied,
/// so every field ends in a defined state whether or not a dimension
/// matched.
pub(crate) struct ClassificationBuilder<'a> {
    result: Classification<'a>,
}

impl<'a> ClassificationBuilder<'a> {
    pub fn new() -> Self {
        Self {
            result: Classification::unknown(),
        }
    }

    /// Copy the matched browser's scalar fields into the result. The
    /// browser's associated operating system (a historical platform tie,
    /// e.g. a mobile browser bound to its OS) is copied too; a direct OS
    /// match applied afterwards overrides it.
    pub fn apply_browser(
        &mut self,
        catalogue: &'a Catalogue,
        browser: &'a Browser,
        version: Option<&'a str>,
    ) {
        let r = &mut self.result;
        r.family = Cow::Borrowed(browser.family.as_str());
        r.name = Cow::Borrowed(browser.name.as_str());
        r.version = version.map(Cow::Borrowed).unwrap_or(Cow::Borrowed(""));
        r.browser_type = catalogue
            .browser_type(browser.type_id)
            .map(|t| Cow::Borrowed(t.name.as_str()))
            .unwrap_or(Cow::Borrowed(""));
        r.producer = Cow::Borrowed(browser.producer.as_str());
        r.producer_url = Cow::Borrowed(browser.producer_url.as_str());
        r.info_url = Cow::Borrowed(browser.info_url.as_str());
        r.url = Cow::Borrowed(browser.url.as_str());
        r.icon = Cow::Borrowed(browser.icon.as_str());

        if let Some(os) = browser
            .operating_system_id
            .and_then(|id| catalogue.operating_system(id))
        {
            fill_os(&mut r.operating_system, os);
        }
    }

    pub fn apply_os(&mut self, os: &'a OperatingSystem) {
        fill_os(&mut self.result.operating_system, os);
    }

    pub fn apply_device(&mut self, category: Category, record: Option<&'a DeviceCategory>) {
        let d = &mut self.result.device;
        d.category = category;
        if let Some(rec) = record {
            d.name = Cow::Borrowed(rec.name.as_str());
            d.icon = Cow::Borrowed(rec.icon.as_str());
            d.info_url = Cow::Borrowed(rec.info_url.as_str());
        }
    }

    pub fn build(self) -> Classification<'a> {
        self.result
    }
}

fn fill_os<'a>(info: &mut OsInfo<'a>, os: &'a OperatingSystem) {
    info.name = Cow::Borrowed(os.name.as_str());
    info.family = Cow::Borrowed(os.family.as_str());
    info.producer = Cow::Borrowed(os.producer.as_str());
    info.producer_url = Cow::Borrowed(os.producer_url.as_str());
    info.info_url = Cow::Borrowed(os.info_url.as_str());
    info.url = Cow::Borrowed(os.url.as_str());
    info.icon = Cow::Borrowed(os.icon.as_str());
}

/// Compose the partial dimension matches into one classification. Pure: no
/// side effects, no I/O. The device category is derived from the winning
/// browser's declared association, falling back to `Other` when no browser
/// matched.
pub(crate) fn merge<'a>(
    catalogue: &'a Catalogue,
    browser: Option<BrowserMatch<'a>>,
    os: Option<&'a OperatingSystem>,
) -> Classification<'a> {
    let mut builder = ClassificationBuilder::new();

    if let Some(m) = &browser {
        builder.apply_browser(catalogue, m.browser, m.version);
        let category = m.browser.device_category.unwrap_or(Category::Other);
        builder.apply_device(category, catalogue.device_category(category));
    }

    if let Some(os) = os {
        builder.apply_os(os);
    }

    builder.build()
}

//! User-Agent classification engine.
//!
//! Matches raw user-agent strings against a prioritized, pre-compiled regex
//! catalogue and returns a structured [`Classification`]: browser family and
//! version, operating system, and device category. Build an immutable
//! [`Catalogue`] once from already-parsed records, wrap it in a
//! [`Classifier`], and classify from any number of threads.

mod catalogue;
mod classifier;
mod db;
mod error;
mod literal;
mod merger;
mod pattern;
mod prefilter;
mod types;

pub use catalogue::Catalogue;
pub use classifier::Classifier;
pub use db::{
    RawBrowser, RawBrowserType, RawCatalogue, RawDeviceCategory, RawOperatingSystem, RawPattern,
};
pub use error::{Error, Result};
pub use pattern::{PatternEntry, PatternMatch, PatternSet};
pub use types::*;

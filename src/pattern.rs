use crate::error::{Error, Result};

/// One identified, pre-compiled regex with its priority `position` and an
/// optional capture-group index used to extract a version string.
#[derive(Debug)]
pub struct PatternEntry {
    id: u32,
    position: u32,
    version_group: Option<usize>,
    regex: fancy_regex::Regex,
    /// Original regex source, kept for literal-prefilter extraction.
    source: String,
}

/// A successful match: the winning entry plus the version captured from the
/// input, when the entry declares a version group and the group participated.
#[derive(Debug)]
pub struct PatternMatch<'a> {
    pub entry: &'a PatternEntry,
    pub version: Option<&'a str>,
}

impl PatternEntry {
    /// Compile a pattern from its stored source. The source is compiled
    /// exactly as given; no prefixing or flag injection.
    pub fn compile(id: u32, source: &str, position: u32, version_group: Option<usize>) -> Result<Self> {
        let regex = fancy_regex::Regex::new(source).map_err(|e| Error::InvalidPattern {
            id,
            regex: source.to_string(),
            source: Box::new(e),
        })?;
        Ok(Self {
            id,
            position,
            version_group,
            regex,
            source: source.to_string(),
        })
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn position(&self) -> u32 {
        self.position
    }

    pub fn version_group(&self) -> Option<usize> {
        self.version_group
    }

    pub(crate) fn regex_source(&self) -> &str {
        &self.source
    }

    /// Try this entry against `input`. A regex-engine runtime error
    /// (e.g. the backtracking limit on a pathological input) counts as no
    /// match.
    pub fn try_match<'a>(&'a self, input: &'a str) -> Option<PatternMatch<'a>> {
        let captures = self.regex.captures(input).ok().flatten()?;
        let version = self
            .version_group
            .and_then(|g| captures.get(g))
            .map(|m| m.as_str())
            .filter(|v| !v.is_empty());
        Some(PatternMatch { entry: self, version })
    }
}

/// An ordered collection of `PatternEntry` for one classification dimension,
/// strictly ordered by `(position, id)`. The order is a correctness
/// invariant: lower positions encode more specific patterns and must be
/// tried first.
#[derive(Debug, Default)]
pub struct PatternSet {
    entries: Vec<PatternEntry>,
}

impl PatternSet {
    /// Build a set from entries in any order; they are sorted by
    /// `(position, id)` once here. Duplicate ids break the total order and
    /// are rejected.
    pub fn from_entries(mut entries: Vec<PatternEntry>) -> Result<Self> {
        entries.sort_by_key(|e| (e.position, e.id));
        let mut ids: Vec<u32> = entries.iter().map(|e| e.id).collect();
        ids.sort_unstable();
        if let Some(dup) = ids.windows(2).find(|w| w[0] == w[1]) {
            return Err(Error::DuplicateId {
                kind: "pattern",
                id: dup[0],
            });
        }
        Ok(Self { entries })
    }

    /// An empty set is valid and matches nothing.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Entries in `(position, id)` order.
    pub fn entries(&self) -> &[PatternEntry] {
        &self.entries
    }

    /// Return the first entry (in `(position, id)` order) matching `input`,
    /// short-circuiting on success. Empty input never matches and is
    /// guarded before any regex evaluation.
    pub fn find_first_match<'a>(&'a self, input: &'a str) -> Option<PatternMatch<'a>> {
        if input.is_empty() {
            return None;
        }
        self.entries.iter().find_map(|e| e.try_match(input))
    }
}

use aho_corasick::AhoCorasick;

use crate::error::Result;
use crate::literal::prefilter_literals;

/// Minimum prefix-literal length worth feeding the automaton; shorter
/// literals fire on nearly every input and cost more than they save.
const MIN_LITERAL_LEN: usize = 3;

/// Literal prefilter over one flattened search sequence.
///
/// Built once per dimension at catalogue-build time: each sequence entry
/// contributes its required prefix literals to a case-insensitive
/// Aho-Corasick automaton. At classify time the automaton runs once over
/// the input and only the entries whose literals occurred (plus the
/// always-tried entries without usable literals) are handed to the regex
/// engine, in sequence order.
#[derive(Debug)]
pub(crate) struct LiteralPrefilter {
    automaton: Option<AhoCorasick>,
    /// Automaton pattern index → search-sequence index.
    literal_to_entry: Vec<usize>,
    /// Entries with no usable literal, ascending; always candidates.
    always: Vec<usize>,
    entry_count: usize,
}

impl LiteralPrefilter {
    /// Build from the regex sources of a search sequence, in sequence order.
    pub fn build<'a>(sources: impl IntoIterator<Item = &'a str>) -> Result<Self> {
        let mut literals: Vec<String> = Vec::new();
        let mut literal_to_entry: Vec<usize> = Vec::new();
        let mut always: Vec<usize> = Vec::new();
        let mut entry_count = 0;

        for (idx, source) in sources.into_iter().enumerate() {
            entry_count = idx + 1;
            match prefilter_literals(source, MIN_LITERAL_LEN) {
                Some(lits) => {
                    for lit in lits {
                        literals.push(lit);
                        literal_to_entry.push(idx);
                    }
                }
                None => always.push(idx),
            }
        }

        let automaton = if literals.is_empty() {
            None
        } else {
            Some(
                AhoCorasick::builder()
                    .ascii_case_insensitive(true)
                    .build(&literals)?,
            )
        };

        Ok(Self {
            automaton,
            literal_to_entry,
            always,
            entry_count,
        })
    }

    /// Sequence indices worth trying against `input`, ascending. Entries not
    /// returned cannot match: one of their required literals is absent.
    pub fn candidates(&self, input: &str) -> Vec<usize> {
        let automaton = match &self.automaton {
            Some(a) => a,
            None => return self.always.clone(),
        };

        let mut hit = vec![false; self.entry_count];
        for m in automaton.find_overlapping_iter(input) {
            hit[self.literal_to_entry[m.pattern().as_usize()]] = true;
        }
        for &idx in &self.always {
            hit[idx] = true;
        }

        hit.iter()
            .enumerate()
            .filter_map(|(idx, &h)| h.then_some(idx))
            .collect()
    }
}

use regex_syntax::hir::literal::{ExtractKind, Extractor};
use regex_syntax::parse;

/// Extract prefix literals from a regex source for Aho-Corasick prefilter
/// candidates. Returns `Some(lits)` only when every extracted prefix is an
/// exact UTF-8 literal of at least `min_len` bytes — then a match requires
/// one of the literals to occur in the input. Returns `None` when the
/// pattern cannot be parsed by regex-syntax (PCRE-only constructs) or when
/// any prefix is too short to be selective; such entries must always be
/// tried.
pub(crate) fn prefilter_literals(pattern: &str, min_len: usize) -> Option<Vec<String>> {
    let hir = parse(pattern).ok()?;

    let mut extractor = Extractor::new();
    extractor.kind(ExtractKind::Prefix);
    let seq = extractor.extract(&hir);

    let literals = seq.literals()?;
    if literals.is_empty() {
        return None;
    }

    let mut out = Vec::with_capacity(literals.len());
    for lit in literals {
        let s = std::str::from_utf8(lit.as_bytes()).ok()?;
        // One short prefix poisons the whole set: dropping it would make
        // the prefilter skip inputs the entry could match.
        if s.len() < min_len {
            return None;
        }
        out.push(s.to_string());
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_literal() {
        assert_eq!(prefilter_literals("Firefox", 3), Some(vec!["Firefox".into()]));
    }

    #[test]
    fn alternation() {
        let lits = prefilter_literals("Firefox|Chrome", 3).unwrap();
        assert!(lits.contains(&"Firefox".to_string()));
        assert!(lits.contains(&"Chrome".to_string()));
    }

    #[test]
    fn short_prefix_disables_prefilter() {
        assert_eq!(prefilter_literals(r"\d+\.\d+", 3), None);
    }

    #[test]
    fn mixed_lengths_disable_prefilter() {
        // "ab" is under min_len, so the whole entry stays an always-candidate.
        assert_eq!(prefilter_literals("Firefox|ab", 3), None);
    }

    #[test]
    fn lookahead_disables_prefilter() {
        // regex-syntax cannot parse lookarounds; fancy-regex handles them at
        // match time instead.
        assert_eq!(prefilter_literals(r"Tablet(?! PC)", 3), None);
    }
}

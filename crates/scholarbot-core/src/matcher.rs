//! Keyword trigger matching.
//!
//! A pure, case-insensitive substring check against a fixed keyword list.
//! No tokenization, no stemming, no ranking: "scholarship" matches inside
//! "scholarships" and "Tuition" matches "tuition assistance".

/// Immutable set of trigger keywords, case-folded once at construction.
#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    keywords: Vec<String>,
}

impl KeywordMatcher {
    /// Build a matcher from the configured keyword list.
    ///
    /// Keywords are lowercased and blank entries dropped. The original order
    /// is preserved (matching short-circuits on the first hit).
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        Self { keywords }
    }

    /// True iff any keyword is a substring of the case-folded text.
    ///
    /// An empty keyword list matches nothing.
    pub fn matches(&self, text: &str) -> bool {
        if self.keywords.is_empty() {
            return false;
        }
        let lowered = text.to_lowercase();
        self.keywords.iter().any(|k| lowered.contains(k.as_str()))
    }

    /// Number of active keywords.
    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    /// Whether the matcher has no keywords (and so never matches).
    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher() -> KeywordMatcher {
        KeywordMatcher::new(["scholarship", "financial aid", "fly-in", "tuition"])
    }

    #[test]
    fn test_matches_exact_keyword() {
        assert!(matcher().matches("looking for a scholarship"));
    }

    #[test]
    fn test_matches_is_case_insensitive() {
        assert!(matcher().matches("ANY SCHOLARSHIP ADVICE?"));
        assert!(KeywordMatcher::new(["TUITION"]).matches("tuition help"));
    }

    #[test]
    fn test_matches_substring_inside_word() {
        // Plain substring semantics: "scholarship" hits "scholarships"
        assert!(matcher().matches("best scholarships for stem majors"));
    }

    #[test]
    fn test_matches_multiword_keyword() {
        assert!(matcher().matches("how does financial aid work"));
        assert!(!matcher().matches("financial planning advice"));
    }

    #[test]
    fn test_no_match_returns_false() {
        assert!(!matcher().matches("what laptop should I buy"));
    }

    #[test]
    fn test_empty_keyword_list_never_matches() {
        let m = KeywordMatcher::new(Vec::<String>::new());
        assert!(!m.matches("scholarship"));
        assert!(!m.matches(""));
        assert!(m.is_empty());
    }

    #[test]
    fn test_blank_keywords_dropped() {
        let m = KeywordMatcher::new(["", "  ", "tuition"]);
        assert_eq!(m.len(), 1);
        assert!(m.matches("tuition"));
        // A blank keyword must not match everything
        assert!(!m.matches("unrelated"));
    }

    #[test]
    fn test_empty_text_no_match() {
        assert!(!matcher().matches(""));
    }

    #[test]
    fn test_unicode_case_folding() {
        let m = KeywordMatcher::new(["bürse"]);
        assert!(m.matches("BÜRSE info"));
    }
}

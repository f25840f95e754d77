//! Locates "Clocked In/Out" lines in recognition output.

use std::sync::LazyLock;

use regex::Regex;

/// Fuzzy "Clocked In/Out" pattern, tolerant to common misreads:
/// Ciocked (l→i), Eiocked (Cl→Ei), Clockeg (d→g), Clockeqd (d→qd).
/// Requires an "e" after "ock" so "clocking on" does not match, and
/// accepts a truncated "ou" or a cut-off "o" for "Out".
pub const CLOCK_EVENT_PATTERN: &str = r"(?i)[ce].{0,2}ocke\w{0,2}\s*(?:in|ou|o\W)";

static CLOCK_EVENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(CLOCK_EVENT_PATTERN).expect("clock event pattern compiles"));

/// A line judged to mark a clock-in/out event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnchorMatch<'a> {
    /// Index into the caller's line list.
    pub line: usize,
    pub text: &'a str,
}

/// Whether a single line looks like a clock-in/out status line.
pub fn is_clock_event(line: &str) -> bool {
    CLOCK_EVENT.is_match(line)
}

/// All anchor lines, in line order. Zero matches is a normal outcome; the
/// extractors fall back to anchor-free strategies.
pub fn find_anchors<'a>(lines: &[&'a str]) -> Vec<AnchorMatch<'a>> {
    lines
        .iter()
        .enumerate()
        .filter(|(_, line)| is_clock_event(line))
        .map(|(line, text)| AnchorMatch { line, text })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_clean_status_lines() {
        assert!(is_clock_event("Clocked In"));
        assert!(is_clock_event("Clocked Out"));
        assert!(is_clock_event("clocked in 9:15 AM"));
    }

    #[test]
    fn tolerates_misread_leading_characters() {
        assert!(is_clock_event("Ciocked In"));
        assert!(is_clock_event("Eiocked Out"));
    }

    #[test]
    fn tolerates_inserted_characters_after_ocke() {
        assert!(is_clock_event("Clockeg In"));
        assert!(is_clock_event("Clockeqd In"));
    }

    #[test]
    fn accepts_truncated_out() {
        assert!(is_clock_event("Clocked Ou"));
        assert!(is_clock_event("Clocked O."));
    }

    #[test]
    fn rejects_unrelated_phrases() {
        assert!(!is_clock_event("Clocking On"));
        assert!(!is_clock_event("clock"));
        assert!(!is_clock_event("Please select your shift"));
    }

    #[test]
    fn finds_all_anchors_in_line_order() {
        let lines = vec!["Store Alpha", "Clocked In", "noise", "Ciocked Out"];
        let anchors = find_anchors(&lines);
        assert_eq!(anchors.len(), 2);
        assert_eq!(anchors[0].line, 1);
        assert_eq!(anchors[1].line, 3);
        assert_eq!(anchors[1].text, "Ciocked Out");
    }

    #[test]
    fn no_anchor_is_a_valid_outcome() {
        let lines = vec!["Store Alpha", "9:15 AM"];
        assert!(find_anchors(&lines).is_empty());
    }
}

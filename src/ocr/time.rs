//! Clock-time extraction from combined recognition text.

use std::sync::LazyLock;

use regex::Regex;

use super::anchor::find_anchors;

/// 12-hour time with optional seconds: `H:MM[:SS] AM|PM`.
pub const TIME_12H_PATTERN: &str = r"\d{1,2}:\d{2}(?::\d{2})?\s*[AaPp][Mm]";

/// Bare time without a meridiem: `H:MM[:SS]`.
pub const TIME_BARE_PATTERN: &str = r"\d{1,2}:\d{2}(?::\d{2})?";

static TIME_12H: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(TIME_12H_PATTERN).expect("12-hour time pattern compiles"));
static TIME_BARE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(TIME_BARE_PATTERN).expect("bare time pattern compiles"));

/// Extracts the clock time from combined recognition text.
///
/// Strategy order, first hit wins:
/// 1. the first anchor line itself, 12-hour pattern only;
/// 2. the three lines below that anchor, 12-hour pattern;
/// 3. the same three lines, bare pattern;
/// 4. first 12-hour match anywhere;
/// 5. first bare match anywhere.
///
/// The matched substring is trimmed but never reformatted. Empty string
/// when nothing matches.
pub fn extract_time(text: &str) -> String {
    let lines: Vec<&str> = text.split('\n').collect();

    if let Some(anchor) = find_anchors(&lines).first() {
        if let Some(m) = TIME_12H.find(lines[anchor.line]) {
            return m.as_str().trim().to_string();
        }
        let below = &lines[(anchor.line + 1).min(lines.len())..(anchor.line + 4).min(lines.len())];
        for line in below {
            if let Some(m) = TIME_12H.find(line) {
                return m.as_str().trim().to_string();
            }
        }
        for line in below {
            if let Some(m) = TIME_BARE.find(line) {
                return m.as_str().trim().to_string();
            }
        }
    }

    if let Some(m) = TIME_12H.find(text) {
        return m.as_str().trim().to_string();
    }
    if let Some(m) = TIME_BARE.find(text) {
        return m.as_str().trim().to_string();
    }
    String::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_on_the_anchor_line() {
        assert_eq!(extract_time("Store Alpha\nClocked In 9:15 AM"), "9:15 AM");
    }

    #[test]
    fn time_with_seconds_is_kept_whole() {
        assert_eq!(extract_time("Clocked Out\n10:03:42 PM"), "10:03:42 PM");
    }

    #[test]
    fn time_found_up_to_three_lines_below_the_anchor() {
        assert_eq!(extract_time("Clocked In\nnoise\nnoise\n9:15 AM"), "9:15 AM");
    }

    #[test]
    fn fourth_line_below_anchor_is_out_of_reach() {
        // 9:15 AM sits four lines below, so only the global scan finds it;
        // the answer is the same either way here.
        let text = "Clocked In\na\nb\nc\n9:15 AM";
        assert_eq!(extract_time(text), "9:15 AM");
    }

    #[test]
    fn twelve_hour_wins_over_bare_below_the_anchor() {
        // The bare 17:30 is closer, but the 12-hour scan of the window runs first.
        let text = "Clocked In\n17:30\n9:15 AM";
        assert_eq!(extract_time(text), "9:15 AM");
    }

    #[test]
    fn anchor_relative_bare_time_beats_global_twelve_hour() {
        // No 12-hour time near the anchor; the bare match in the window wins
        // over a 12-hour match further down.
        let text = "Clocked In\n17:30\nnoise\nnoise\nnoise\n9:15 AM";
        assert_eq!(extract_time(text), "17:30");
    }

    #[test]
    fn global_twelve_hour_fallback_without_anchor() {
        assert_eq!(extract_time("Store Alpha\n8:05 am\n17:30"), "8:05 am");
    }

    #[test]
    fn global_bare_fallback_without_anchor() {
        assert_eq!(extract_time("Store Alpha\n17:30"), "17:30");
    }

    #[test]
    fn meridiem_case_is_preserved() {
        assert_eq!(extract_time("clocked in 9:15 pm"), "9:15 pm");
    }

    #[test]
    fn empty_when_no_time_present() {
        assert_eq!(extract_time("Store Alpha\nClocked In"), "");
        assert_eq!(extract_time(""), "");
    }
}

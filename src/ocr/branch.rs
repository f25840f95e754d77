//! Branch/location-name extraction from combined recognition text.
//!
//! The branch name is printed in bold directly above the "Clocked In/Out"
//! status line, so candidates are collected above every anchor, filtered
//! for place-name plausibility, deduplicated, and ranked. Two anchor-free
//! fallbacks cover photos where the status line itself was garbled away.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use super::anchor::find_anchors;

/// Words that must never be returned as a branch name: common English
/// filler from the POS screen plus known misreadings of "clock(ed)".
pub const NOISE_WORDS: &[&str] = &[
    "the", "and", "for", "you", "are", "not", "has", "was", "hrs",
    "exit", "full", "screen", "press", "hold", "esc", "psm", "nmi",
    "rostered", "anyone", "found", "breaks", "before", "after",
    "please", "select", "your", "shift", "details", "below",
    "department", "security", "contractor", "friday", "saturday",
    "sunday", "monday", "tuesday", "wednesday", "thursday",
    "start", "work", "location", "excessive", "subject",
    "disciplinary", "action", "additional", "minutes", "hours",
    "awarded", "worked", "commencing", "responsible", "working",
    "notify", "contacted", "emergency", "managers", "unless",
    "information", "message", "call", "limit", "messages",
    "clock", "clocked", "clockeg", "clockeqd", "clocking",
    "ciocked", "eiocked",
];

static NOISE_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| NOISE_WORDS.iter().copied().collect());

/// `location|branch|site` keyword followed by a letters-only value.
const LOCATION_KEYWORD_PATTERN: &str = r"(?i)(?:location|branch|site)\s*[:\-]?\s*([A-Za-z]+)";

static LOCATION_KEYWORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(LOCATION_KEYWORD_PATTERN).expect("location keyword pattern compiles"));

/// How many lines above an anchor are searched for the branch name.
const SCAN_LINES_ABOVE: usize = 5;

fn is_noise_word(word: &str) -> bool {
    NOISE_SET.contains(word.to_ascii_lowercase().as_str())
}

/// Strips a line down to letters and whitespace, trimming the edges.
pub fn clean_text(s: &str) -> String {
    let kept: String = s
        .chars()
        .filter(|c| c.is_ascii_alphabetic() || c.is_whitespace())
        .collect();
    kept.trim().to_string()
}

/// Whether a cleaned candidate looks like a real place name.
///
/// Rejects short strings, more than two words, words under three letters,
/// noise words, and letter shapes no place name has: a run of more than 4
/// consonants or more than 2 vowels (AEIOU) once spaces are removed.
pub fn is_plausible_branch_name(candidate: &str) -> bool {
    if candidate.len() < 4 {
        return false;
    }
    let words: Vec<&str> = candidate.split_whitespace().collect();
    if words.len() > 2 {
        return false;
    }
    for word in &words {
        if word.len() < 3 || is_noise_word(word) {
            return false;
        }
    }

    let mut consonant_run = 0u32;
    let mut vowel_run = 0u32;
    for ch in candidate.chars().filter(|c| !c.is_whitespace()) {
        if matches!(ch.to_ascii_uppercase(), 'A' | 'E' | 'I' | 'O' | 'U') {
            vowel_run += 1;
            consonant_run = 0;
        } else {
            consonant_run += 1;
            vowel_run = 0;
        }
        if consonant_run > 4 || vowel_run > 2 {
            return false;
        }
    }
    true
}

/// The longest clean word of at least five letters that is not noise.
/// First such word wins a length tie.
fn longest_clean_word(line: &str) -> Option<String> {
    let cleaned = clean_text(line);
    let mut best: Option<&str> = None;
    for word in cleaned.split_whitespace() {
        if word.len() >= 5 && !is_noise_word(word) && best.is_none_or(|b| word.len() > b.len()) {
            best = Some(word);
        }
    }
    best.map(str::to_string)
}

/// Drops candidates that look like a shorter candidate plus recognition
/// noise: B goes when some strictly shorter A is a substring of B. If that
/// would drop everything, the list is kept as-is instead.
fn dedup_candidates(candidates: Vec<String>) -> Vec<String> {
    if candidates.len() < 2 {
        return candidates;
    }
    let kept: Vec<String> = candidates
        .iter()
        .filter(|c| {
            !candidates
                .iter()
                .any(|other| other.len() < c.len() && c.contains(other.as_str()))
        })
        .cloned()
        .collect();
    if kept.is_empty() { candidates } else { kept }
}

/// Extracts the branch/location name from combined recognition text.
///
/// Candidates are collected above every anchor (nearest line first, up to
/// five lines), deduplicated, and ranked: fewer words first, then longer
/// strings. Anchor-free fallbacks: a `location:`-style keyword line, then
/// the first plausible all-caps line. Empty string when nothing survives.
pub fn extract_branch(text: &str) -> String {
    let lines: Vec<&str> = text
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let mut candidates: Vec<String> = Vec::new();
    for anchor in find_anchors(&lines) {
        let floor = anchor.line.saturating_sub(SCAN_LINES_ABOVE);
        for j in (floor..anchor.line).rev() {
            let candidate = clean_text(lines[j]);
            if is_plausible_branch_name(&candidate) {
                candidates.push(candidate.to_uppercase());
                break;
            }
            // Noisy line: fall back to its single longest usable word.
            if let Some(word) = longest_clean_word(lines[j]) {
                let upper = word.to_uppercase();
                if is_plausible_branch_name(&upper) {
                    candidates.push(upper);
                    break;
                }
            }
        }
    }

    let mut candidates = dedup_candidates(candidates);
    if !candidates.is_empty() {
        // Fewer words first; longer strings first within equal word counts.
        candidates
            .sort_by_key(|c| (c.split_whitespace().count(), std::cmp::Reverse(c.len())));
        return candidates[0].clone();
    }

    // Fallback 1: explicit location/branch/site keyword.
    for line in &lines {
        if let Some(caps) = LOCATION_KEYWORD.captures(line) {
            let value = caps.get(1).map_or("", |m| m.as_str()).trim();
            if is_plausible_branch_name(value) {
                return value.to_uppercase();
            }
        }
    }

    // Fallback 2: first plausible all-caps line.
    for line in &lines {
        let cleaned = clean_text(line);
        if cleaned.len() >= 3 && is_all_caps(&cleaned) && is_plausible_branch_name(&cleaned) {
            return cleaned;
        }
    }

    String::new()
}

/// At least one letter and no lowercase letters.
fn is_all_caps(s: &str) -> bool {
    s.chars().any(|c| c.is_ascii_alphabetic()) && !s.chars().any(|c| c.is_ascii_lowercase())
}

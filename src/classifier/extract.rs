//! Dictionary-driven entity extraction.
//!
//! All extractors take text that has already been case-folded by the caller
//! and return ordered, de-duplicated lists (order of first discovery).

use super::dictionary::{
    ACTIVITIES, CROPS, KEYWORD_CANDIDATES, REGIONS, SEASONS, SWAHILI_ACTIVITIES, SWAHILI_CROPS,
};

/// Upper bound on extracted keywords.
pub const MAX_KEYWORDS: usize = 10;

/// Keyword candidates of this many characters or fewer are ignored.
const MIN_KEYWORD_CHARS: usize = 3;

/// Push `value` unless it is already present.
fn push_unique(list: &mut Vec<String>, value: &str) {
    if !list.iter().any(|v| v == value) {
        list.push(value.to_string());
    }
}

/// English table first (first matching variant per key), then the Swahili map.
fn extract_dual(
    text: &str,
    english: &[(&str, &[&str])],
    swahili: &[(&str, &str)],
) -> Vec<String> {
    let mut found = Vec::new();

    for (key, forms) in english {
        if forms.iter().any(|form| text.contains(form)) {
            push_unique(&mut found, key);
        }
    }

    for (form, key) in swahili {
        if text.contains(form) {
            push_unique(&mut found, key);
        }
    }

    found
}

/// Canonical crop keys mentioned in `text`.
pub fn extract_crops(text: &str) -> Vec<String> {
    extract_dual(text, CROPS, SWAHILI_CROPS)
}

/// Canonical farming-activity keys mentioned in `text`.
pub fn extract_activities(text: &str) -> Vec<String> {
    extract_dual(text, ACTIVITIES, SWAHILI_ACTIVITIES)
}

/// Season display names named in `text`, followed by every season active
/// in `current_month` whether or not the text mentions it.
pub fn extract_seasons(text: &str, current_month: u32) -> Vec<String> {
    let mut found = Vec::new();

    for season in SEASONS {
        if season.keywords.iter().any(|kw| text.contains(kw)) {
            push_unique(&mut found, season.name);
        }
    }

    for season in SEASONS {
        if season.months.contains(&current_month) {
            push_unique(&mut found, season.name);
        }
    }

    found
}

/// Matched place names, each followed by the zone it belongs to.
///
/// A place listed under several zones contributes each of those zones.
pub fn extract_regions(text: &str) -> Vec<String> {
    let mut found = Vec::new();

    for (zone, places) in REGIONS {
        for place in places.iter() {
            if text.contains(place) {
                push_unique(&mut found, place);
                push_unique(&mut found, zone);
            }
        }
    }

    found
}

/// Domain keywords present in `text`, at most [`MAX_KEYWORDS`].
///
/// Scans the whole vocabulary independently of the other extractors, so a
/// keyword can appear here even when its entity was not extracted.
pub fn extract_keywords(text: &str) -> Vec<String> {
    let mut found = Vec::new();

    for candidate in KEYWORD_CANDIDATES.iter() {
        if candidate.chars().count() > MIN_KEYWORD_CHARS && text.contains(candidate) {
            push_unique(&mut found, candidate);
        }
    }

    found.truncate(MAX_KEYWORDS);
    found
}

//! Weighted keyword scoring over the category table.

use super::dictionary::CATEGORIES;

/// Category reported when no trigger keyword matches.
pub const GENERAL_CATEGORY: &str = "general";

/// Raw score at which confidence saturates to 1.0.
///
/// Calibration constant: any category reaching this many weighted points is
/// reported with full confidence no matter how far above it the score goes.
pub const CONFIDENCE_SATURATION: f64 = 10.0;

/// Keywords longer than this many characters score double.
const LONG_KEYWORD_CHARS: usize = 5;

/// Outcome of category scoring.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryMatch {
    /// Display name of the winning category, or [`GENERAL_CATEGORY`].
    pub name: &'static str,
    pub score: u32,
    pub confidence: f64,
}

fn keyword_weight(keyword: &str) -> u32 {
    if keyword.chars().count() > LONG_KEYWORD_CHARS {
        2
    } else {
        1
    }
}

/// Score every category against case-folded `text` and pick the best one.
///
/// Ties keep the category listed first.
pub fn classify_category(text: &str) -> CategoryMatch {
    let mut best: Option<(&'static str, u32)> = None;

    for category in CATEGORIES {
        let score: u32 = category
            .keywords
            .iter()
            .filter(|kw| text.contains(*kw))
            .map(|kw| keyword_weight(kw))
            .sum();

        let beats_best = match best {
            Some((_, best_score)) => score > best_score,
            None => score > 0,
        };
        if beats_best {
            best = Some((category.name, score));
        }
    }

    match best {
        Some((name, score)) => CategoryMatch {
            name,
            score,
            confidence: (f64::from(score) / CONFIDENCE_SATURATION).min(1.0),
        },
        None => CategoryMatch {
            name: GENERAL_CATEGORY,
            score: 0,
            confidence: 0.0,
        },
    }
}

//! Dominant-language detection for classified documents.

use serde::{Deserialize, Serialize};

/// Languages the classifier distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Sw,
    Ko,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Sw => "sw",
            Language::Ko => "ko",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Common Swahili function words (conjunctions, prepositions, connectives).
const SWAHILI_FUNCTION_WORDS: &[&str] = &[
    "na", "ya", "wa", "kwa", "ni", "au", "la", "za", "cha", "vya", "mwa",
];

/// Share of tokens that must be Swahili function words for `sw`.
const SWAHILI_RATIO_THRESHOLD: f64 = 0.10;

/// Detect the dominant language of `text`.
///
/// Any Hangul character makes the document Korean. Otherwise the text is
/// Swahili when more than 10% of its whitespace-separated tokens are
/// Swahili function words, and English in every other case (including
/// empty text).
pub fn detect_language(text: &str) -> Language {
    if text.chars().any(is_hangul) {
        return Language::Ko;
    }

    let mut total = 0usize;
    let mut swahili = 0usize;
    for token in text.split_whitespace() {
        total += 1;
        if SWAHILI_FUNCTION_WORDS.contains(&token.to_lowercase().as_str()) {
            swahili += 1;
        }
    }

    if total == 0 {
        return Language::En;
    }

    if swahili as f64 / total as f64 > SWAHILI_RATIO_THRESHOLD {
        Language::Sw
    } else {
        Language::En
    }
}

fn is_hangul(c: char) -> bool {
    matches!(
        c,
        '\u{AC00}'..='\u{D7AF}' | '\u{1100}'..='\u{11FF}' | '\u{3130}'..='\u{318F}'
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_is_english() {
        assert_eq!(detect_language(""), Language::En);
        assert_eq!(detect_language("   \n\t "), Language::En);
    }

    #[test]
    fn test_hangul_wins_over_everything() {
        assert_eq!(detect_language("옥수수"), Language::Ko);
        assert_eq!(
            detect_language("Kilimo cha mahindi na maharage kwa wakulima 재배"),
            Language::Ko
        );
        // Compatibility jamo on its own still counts.
        assert_eq!(detect_language("maize ㄱ"), Language::Ko);
    }

    #[test]
    fn test_swahili_function_words() {
        // 3 of 8 tokens are function words.
        let text = "Kilimo cha mahindi na maharage kwa wakulima wadogo";
        assert_eq!(detect_language(text), Language::Sw);
    }

    #[test]
    fn test_function_words_are_case_insensitive() {
        assert_eq!(detect_language("NA YA KWA mahindi"), Language::Sw);
    }

    #[test]
    fn test_exactly_ten_percent_is_english() {
        // 1 function word in 10 tokens is not strictly above the threshold.
        let text = "na one two three four five six seven eight nine";
        assert_eq!(detect_language(text), Language::En);
    }

    #[test]
    fn test_substrings_do_not_count() {
        // "nation" and "yak" contain function words but are not tokens of them.
        assert_eq!(detect_language("nation yak kwanza"), Language::En);
    }

    #[test]
    fn test_serializes_as_code() {
        assert_eq!(serde_json::to_string(&Language::Sw).unwrap(), "\"sw\"");
        assert_eq!(Language::Ko.to_string(), "ko");
    }
}

//! Rule-based agricultural document classifier.
//!
//! Infers a document's category, crops, seasons, farming activities, regions,
//! keywords and language from its title and body using the static tables in
//! [`dictionary`]. Classification is a pure function of its inputs and the
//! injected [`Clock`]: no I/O, no retained state, safe to call concurrently.
//!
//! # Pipeline
//!
//! ```text
//! title + " " + content
//!         │
//!         ├── detect_language      (Hangul → ko, function-word ratio → sw, else en)
//!         ├── lowercase
//!         │     ├── extract_crops       ├── extract_activities
//!         │     ├── extract_seasons ◀── Clock::current_month
//!         │     ├── extract_regions     ├── extract_keywords (≤ 10)
//!         │     └── classify_category   (weighted keyword score → confidence)
//!         ▼
//!   ClassificationResult
//! ```

pub mod category;
pub mod clock;
pub mod dictionary;
pub mod extract;
pub mod language;

use serde::{Deserialize, Serialize};

pub use category::{CONFIDENCE_SATURATION, GENERAL_CATEGORY};
pub use clock::{Clock, FixedClock, SystemClock};
pub use extract::MAX_KEYWORDS;
pub use language::{detect_language, Language};

/// Structured classification of one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Category display name, or `"general"`.
    pub category: String,
    /// `{first crop}_{category name in snake case}`, only when a crop was found.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    pub crops: Vec<String>,
    pub seasons: Vec<String>,
    pub activities: Vec<String>,
    pub regions: Vec<String>,
    /// Heuristic category strength in `[0, 1]`; not a probability.
    pub confidence: f64,
    pub keywords: Vec<String>,
    pub language: Language,
}

/// Classify a document.
///
/// Never fails: empty or non-agricultural input yields the `general`
/// category with zero confidence and empty entity lists (the calendar
/// season for the clock's month is still reported).
pub fn classify_document(title: &str, content: &str, clock: &dyn Clock) -> ClassificationResult {
    let full_text = format!("{} {}", title, content);
    let language = detect_language(&full_text);
    let text = full_text.to_lowercase();

    let crops = extract::extract_crops(&text);
    let seasons = extract::extract_seasons(&text, clock.current_month());
    let activities = extract::extract_activities(&text);
    let regions = extract::extract_regions(&text);
    let category = category::classify_category(&text);
    let keywords = extract::extract_keywords(&text);

    let subcategory = crops
        .first()
        .map(|crop| format!("{}_{}", crop, subcategory_suffix(category.name)));

    ClassificationResult {
        category: category.name.to_string(),
        subcategory,
        crops,
        seasons,
        activities,
        regions,
        confidence: category.confidence,
        keywords,
        language,
    }
}

fn subcategory_suffix(category_name: &str) -> String {
    category_name.replace(' ', "_").to_lowercase()
}

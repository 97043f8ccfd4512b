//! Static agricultural reference tables.
//!
//! Every table is a plain slice so iteration order is the literal order below.
//! Extraction results, tie-breaking in category scoring, and the keyword
//! candidate list all depend on that order, so entries must only be appended
//! or reordered deliberately.
//!
//! Place names and surface forms are stored lowercase; matching is done
//! against case-folded text.

use once_cell::sync::Lazy;

/// An agricultural season with its calendar span and trigger keywords.
#[derive(Debug, Clone, Copy)]
pub struct Season {
    pub key: &'static str,
    /// Display name written into classification results.
    pub name: &'static str,
    /// Calendar months (1–12) the season spans.
    pub months: &'static [u32],
    /// Trigger keywords in English, Swahili and Korean.
    pub keywords: &'static [&'static str],
}

/// A document category with its trigger keywords.
#[derive(Debug, Clone, Copy)]
pub struct Category {
    pub key: &'static str,
    pub name: &'static str,
    pub keywords: &'static [&'static str],
}

/// Canonical crop key → English surface forms.
pub static CROPS: &[(&str, &[&str])] = &[
    ("maize", &["maize", "corn"]),
    ("rice", &["rice", "paddy"]),
    ("beans", &["beans", "common bean"]),
    ("cassava", &["cassava"]),
    ("sorghum", &["sorghum"]),
    ("millet", &["millet"]),
    ("sweet_potato", &["sweet potato", "sweet potatoes"]),
    ("potato", &["irish potato", "potato"]),
    ("banana", &["banana", "plantain"]),
    ("coffee", &["coffee"]),
    ("tea", &["tea bush", "tea leaf", "tea leaves", "tea estate"]),
    ("cashew", &["cashew"]),
    ("cotton", &["cotton"]),
    ("sunflower", &["sunflower"]),
    ("sesame", &["sesame", "simsim"]),
    ("groundnut", &["groundnut", "peanut"]),
    ("tomato", &["tomato"]),
    ("onion", &["onion"]),
    ("sugarcane", &["sugarcane", "sugar cane"]),
    ("tobacco", &["tobacco"]),
    ("pigeon_pea", &["pigeon pea"]),
    ("avocado", &["avocado"]),
];

/// Swahili crop surface form → canonical crop key.
pub static SWAHILI_CROPS: &[(&str, &str)] = &[
    ("mahindi", "maize"),
    ("mpunga", "rice"),
    ("mchele", "rice"),
    ("maharage", "beans"),
    ("maharagwe", "beans"),
    ("muhogo", "cassava"),
    ("mihogo", "cassava"),
    ("mtama", "sorghum"),
    ("uwele", "millet"),
    ("ulezi", "millet"),
    ("viazi vitamu", "sweet_potato"),
    ("viazi mviringo", "potato"),
    ("ndizi", "banana"),
    ("kahawa", "coffee"),
    ("chai", "tea"),
    ("korosho", "cashew"),
    ("pamba", "cotton"),
    ("alizeti", "sunflower"),
    ("ufuta", "sesame"),
    ("karanga", "groundnut"),
    ("nyanya", "tomato"),
    ("vitunguu", "onion"),
    ("miwa", "sugarcane"),
    ("tumbaku", "tobacco"),
    ("mbaazi", "pigeon_pea"),
    ("parachichi", "avocado"),
];

/// Tanzanian agricultural seasons. Together they cover all twelve months.
pub static SEASONS: &[Season] = &[
    Season {
        key: "masika",
        name: "Masika (Long Rains)",
        months: &[3, 4, 5],
        keywords: &[
            "masika",
            "long rains",
            "long rainy season",
            "mvua za masika",
            "장마",
            "긴 우기",
        ],
    },
    Season {
        key: "kiangazi",
        name: "Kiangazi (Dry Season)",
        months: &[6, 7, 8, 9],
        keywords: &["kiangazi", "dry season", "dry spell", "건기"],
    },
    Season {
        key: "vuli",
        name: "Vuli (Short Rains)",
        months: &[10, 11, 12],
        keywords: &[
            "vuli",
            "short rains",
            "short rainy season",
            "mvua za vuli",
            "짧은 우기",
        ],
    },
    Season {
        key: "kaskazi",
        name: "Kaskazi (Hot Season)",
        months: &[1, 2],
        keywords: &["kaskazi", "hot season", "hot dry season", "더운 계절"],
    },
];

/// Canonical activity key → English surface forms.
pub static ACTIVITIES: &[(&str, &[&str])] = &[
    (
        "land_preparation",
        &["land preparation", "ploughing", "plowing", "tillage", "clearing"],
    ),
    ("planting", &["planting", "sowing", "seeding"]),
    ("weeding", &["weeding", "weed control"]),
    (
        "fertilizing",
        &["fertilizer", "fertiliser", "manure", "top dressing", "top-dressing"],
    ),
    ("irrigation", &["irrigation", "irrigating", "watering"]),
    (
        "pest_control",
        &["pest control", "spraying", "pesticide", "insecticide"],
    ),
    ("harvesting", &["harvesting", "harvest"]),
    ("post_harvest", &["post-harvest", "drying", "threshing", "storage"]),
    ("marketing", &["marketing", "selling"]),
];

/// Swahili activity surface form → canonical activity key.
pub static SWAHILI_ACTIVITIES: &[(&str, &str)] = &[
    ("kulima", "land_preparation"),
    ("kupanda", "planting"),
    ("kupalilia", "weeding"),
    ("palizi", "weeding"),
    ("mbolea", "fertilizing"),
    ("kumwagilia", "irrigation"),
    ("umwagiliaji", "irrigation"),
    ("kunyunyizia", "pest_control"),
    ("kuvuna", "harvesting"),
    ("mavuno", "harvesting"),
    ("kukausha", "post_harvest"),
    ("kuhifadhi", "post_harvest"),
    ("kuuza", "marketing"),
];

/// Document categories in scoring order; ties go to the earlier entry.
pub static CATEGORIES: &[Category] = &[
    Category {
        key: "crop_production",
        name: "Crop Production Guide",
        keywords: &[
            "planting",
            "spacing",
            "seed rate",
            "seedlings",
            "variety",
            "varieties",
            "yield",
            "crop management",
            "agronomy",
            "kupanda",
            "mbegu",
            "kilimo bora",
            "재배",
            "파종",
        ],
    },
    Category {
        key: "pest_disease",
        name: "Pest and Disease Management",
        keywords: &[
            "pest",
            "disease",
            "armyworm",
            "pesticide",
            "fungicide",
            "insecticide",
            "blight",
            "infestation",
            "wadudu",
            "magonjwa",
            "viuatilifu",
            "병해충",
        ],
    },
    Category {
        key: "soil_water",
        name: "Soil and Water Management",
        keywords: &[
            "soil",
            "irrigation",
            "erosion",
            "moisture",
            "drainage",
            "mulch",
            "udongo",
            "umwagiliaji",
            "토양",
            "관개",
        ],
    },
    Category {
        key: "livestock",
        name: "Livestock Management",
        keywords: &[
            "livestock",
            "cattle",
            "goats",
            "poultry",
            "dairy",
            "veterinary",
            "mifugo",
            "ng'ombe",
            "kuku",
            "가축",
        ],
    },
    Category {
        key: "market",
        name: "Market Information",
        keywords: &[
            "market",
            "price",
            "buyers",
            "export",
            "value chain",
            "soko",
            "bei ya",
            "시장",
            "가격",
        ],
    },
    Category {
        key: "weather",
        name: "Weather and Climate Advisory",
        keywords: &[
            "weather",
            "rainfall",
            "forecast",
            "climate",
            "drought",
            "mvua",
            "hali ya hewa",
            "날씨",
            "기후",
        ],
    },
    Category {
        key: "post_harvest",
        name: "Post-Harvest Handling",
        keywords: &[
            "post-harvest",
            "storage",
            "drying",
            "aflatoxin",
            "warehouse",
            "kuhifadhi",
            "ghala",
            "저장",
        ],
    },
    Category {
        key: "policy",
        name: "Agricultural Policy",
        keywords: &[
            "policy",
            "regulation",
            "subsidy",
            "subsidies",
            "government",
            "ministry",
            "sera ya",
            "정책",
        ],
    },
    Category {
        key: "research",
        name: "Research Report",
        keywords: &[
            "research",
            "study",
            "trial",
            "findings",
            "experiment",
            "utafiti",
            "연구",
        ],
    },
];

/// Agro-ecological zone key → place names. Some places sit in two zones.
pub static REGIONS: &[(&str, &[&str])] = &[
    (
        "northern",
        &["arusha", "kilimanjaro", "manyara", "tanga", "moshi", "karatu"],
    ),
    (
        "lake",
        &["mwanza", "kagera", "mara", "geita", "shinyanga", "simiyu"],
    ),
    ("central", &["dodoma", "singida", "tabora"]),
    ("coastal", &["dar es salaam", "pwani", "morogoro", "lindi"]),
    ("southern", &["mtwara", "lindi", "ruvuma"]),
    (
        "southern_highlands",
        &["iringa", "mbeya", "njombe", "rukwa", "songwe", "ruvuma", "katavi"],
    ),
    ("western", &["kigoma", "katavi"]),
    ("zanzibar", &["zanzibar", "unguja", "pemba"]),
];

/// Flattened keyword candidates, in extraction order: English crop forms,
/// Swahili crop forms, season triggers, English activity forms, Swahili
/// activity forms, place names.
pub static KEYWORD_CANDIDATES: Lazy<Vec<&'static str>> = Lazy::new(|| {
    let mut candidates = Vec::new();
    candidates.extend(CROPS.iter().flat_map(|(_, forms)| forms.iter().copied()));
    candidates.extend(SWAHILI_CROPS.iter().map(|(form, _)| *form));
    candidates.extend(SEASONS.iter().flat_map(|s| s.keywords.iter().copied()));
    candidates.extend(ACTIVITIES.iter().flat_map(|(_, forms)| forms.iter().copied()));
    candidates.extend(SWAHILI_ACTIVITIES.iter().map(|(form, _)| *form));
    candidates.extend(REGIONS.iter().flat_map(|(_, places)| places.iter().copied()));
    candidates
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seasons_cover_every_month() {
        for month in 1..=12 {
            assert!(
                SEASONS.iter().any(|s| s.months.contains(&month)),
                "month {} has no season",
                month
            );
        }
    }

    #[test]
    fn test_surface_forms_are_lowercase() {
        let all = CROPS
            .iter()
            .flat_map(|(_, f)| f.iter())
            .chain(ACTIVITIES.iter().flat_map(|(_, f)| f.iter()))
            .chain(REGIONS.iter().flat_map(|(_, p)| p.iter()))
            .chain(SWAHILI_CROPS.iter().map(|(f, _)| f))
            .chain(SWAHILI_ACTIVITIES.iter().map(|(f, _)| f));
        for form in all {
            assert_eq!(*form, form.to_lowercase());
        }
    }

    #[test]
    fn test_swahili_maps_point_at_known_keys() {
        for (form, key) in SWAHILI_CROPS {
            assert!(CROPS.iter().any(|(k, _)| k == key), "{} -> {}", form, key);
        }
        for (form, key) in SWAHILI_ACTIVITIES {
            assert!(
                ACTIVITIES.iter().any(|(k, _)| k == key),
                "{} -> {}",
                form,
                key
            );
        }
    }

    #[test]
    fn test_keyword_candidates_start_with_crops() {
        assert_eq!(KEYWORD_CANDIDATES[0], "maize");
        assert_eq!(KEYWORD_CANDIDATES.last().copied(), Some("pemba"));
    }
}

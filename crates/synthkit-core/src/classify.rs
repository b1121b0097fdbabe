//! Keyword classifier mapping a free-text business description to a
//! registry key.
//!
//! Rules are evaluated in order and the first rule with at least one keyword
//! hit wins, so more specific business types come before broad ones.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::registry::DEFAULT_BUSINESS_TYPE;

/// Result of classifying a description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub business_type: String,
    /// Keywords of the winning rule found in the text.
    pub matched_keywords: Vec<String>,
    /// Heuristic score in `[0, 1]`; zero when nothing matched.
    pub confidence: f64,
}

struct Rule {
    business_type: &'static str,
    keywords: &'static [&'static str],
}

const RULES: &[Rule] = &[
    Rule {
        business_type: "food-delivery-platform",
        keywords: &[
            "food delivery",
            "restaurant",
            "restaurants",
            "meal",
            "meals",
            "takeout",
            "courier",
            "grocery delivery",
        ],
    },
    Rule {
        business_type: "nonprofit-donations",
        keywords: &[
            "nonprofit",
            "non-profit",
            "charity",
            "donation",
            "donations",
            "fundraising",
            "donor",
            "donors",
        ],
    },
    Rule {
        business_type: "creator-platform",
        keywords: &[
            "creator",
            "creators",
            "newsletter",
            "fans",
            "podcast",
            "influencer",
            "tips",
            "membership community",
        ],
    },
    Rule {
        business_type: "usage-based-api",
        keywords: &[
            "api",
            "usage-based",
            "usage based",
            "metered",
            "pay as you go",
            "per request",
            "developer platform",
        ],
    },
    Rule {
        business_type: "marketplace-platform",
        keywords: &[
            "marketplace",
            "sellers",
            "buyers",
            "two-sided",
            "vendors",
            "platform fee",
            "rentals",
        ],
    },
    Rule {
        business_type: "b2b-saas-subscriptions",
        keywords: &[
            "saas",
            "b2b",
            "software",
            "seats",
            "crm",
            "workspace",
            "teams",
            "dashboard",
        ],
    },
    Rule {
        business_type: "b2c-subscription-app",
        keywords: &[
            "app",
            "mobile",
            "streaming",
            "fitness",
            "meditation",
            "subscription box",
            "language learning",
        ],
    },
    Rule {
        business_type: "checkout-ecommerce",
        keywords: &[
            "ecommerce",
            "e-commerce",
            "online store",
            "shop",
            "checkout",
            "cart",
            "retail",
            "products",
        ],
    },
];

struct CompiledRule {
    business_type: &'static str,
    patterns: Vec<(&'static str, Regex)>,
}

fn compiled_rules() -> &'static [CompiledRule] {
    static RULES_CELL: OnceLock<Vec<CompiledRule>> = OnceLock::new();
    RULES_CELL.get_or_init(|| {
        RULES
            .iter()
            .map(|rule| CompiledRule {
                business_type: rule.business_type,
                patterns: rule
                    .keywords
                    .iter()
                    .filter_map(|keyword| {
                        Regex::new(&format!(r"(?i)\b{}\b", regex::escape(keyword)))
                            .ok()
                            .map(|regex| (*keyword, regex))
                    })
                    .collect(),
            })
            .collect()
    })
}

/// Classify a free-text description into a business type key.
///
/// Unmatched text maps to the fallback profile key with zero confidence.
pub fn classify_description(text: &str) -> Classification {
    for rule in compiled_rules() {
        let matched: Vec<String> = rule
            .patterns
            .iter()
            .filter(|(_, regex)| regex.is_match(text))
            .map(|(keyword, _)| keyword.to_string())
            .collect();

        if !matched.is_empty() {
            let confidence = (0.6 + 0.1 * (matched.len() as f64 - 1.0)).min(0.95);
            return Classification {
                business_type: rule.business_type.to_string(),
                matched_keywords: matched,
                confidence,
            };
        }
    }

    Classification {
        business_type: DEFAULT_BUSINESS_TYPE.to_string(),
        matched_keywords: Vec::new(),
        confidence: 0.0,
    }
}

//! Query intent classification

use serde::{Deserialize, Serialize};

use crate::model::{IntentCategory, JourneyStage, SiteModel};
use crate::query::current_page;

/// Confidence reported when no intent keyword matches
pub const DEFAULT_CONFIDENCE: f64 = 0.5;

/// Maximum pages suggested for the detected intent
pub const MAX_SUGGESTED_PAGES: usize = 3;

/// Keyword hits needed for full confidence
const FULL_CONFIDENCE_HITS: f64 = 5.0;

const DECISION_KEYWORDS: &[&str] = &[
    "buy", "purchase", "price", "cost", "demo", "trial", "contact", "quote",
];
const CONSIDERATION_KEYWORDS: &[&str] =
    &["compare", "features", "benefits", "vs", "difference", "options"];

/// Intent analysis of a single visitor query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentResult {
    pub intent_type: IntentCategory,
    /// In `[0, 1]`
    pub confidence: f64,
    /// Up to three URLs tagged with `intent_type`
    pub suggested_pages: Vec<String>,
    /// In `[0, 1]`
    pub conversion_probability: f64,
    pub recommended_actions: Vec<String>,
    /// Funnel position of the query itself
    pub journey_stage: JourneyStage,
}

/// Classifies a visitor query against a site model
///
/// The category with the most keyword hits wins, ties going to the category
/// declared first. A query with no hits is treated as a request for
/// information.
///
/// # Arguments
///
/// * `query` - Free-text visitor query
/// * `current_url` - Page the visitor is on; need not be in the model
/// * `model` - The site model to answer from
///
/// # Example
///
/// ```
/// use chrono::Utc;
/// use site_intel::{analyze_intent, build_site_model, IntentCategory};
///
/// let model = build_site_model("example.com", Vec::new(), 3, Utc::now());
/// let result = analyze_intent("How do I fix this error?", "https://example.com/", &model);
/// assert_eq!(result.intent_type, IntentCategory::Support);
/// ```
pub fn analyze_intent(query: &str, current_url: &str, model: &SiteModel) -> IntentResult {
    let lowered = query.to_lowercase();

    let mut best: Option<(IntentCategory, usize)> = None;
    for intent in IntentCategory::ALL {
        let hits = intent.keyword_hits(&lowered);
        if hits > 0 && best.map_or(true, |(_, top)| hits > top) {
            best = Some((intent, hits));
        }
    }

    let (intent_type, confidence) = match best {
        Some((intent, hits)) => (intent, (hits as f64 / FULL_CONFIDENCE_HITS).min(1.0)),
        None => (IntentCategory::Information, DEFAULT_CONFIDENCE),
    };

    let suggested_pages = model
        .intent_map
        .get(&intent_type)
        .map(|urls| urls.iter().take(MAX_SUGGESTED_PAGES).cloned().collect())
        .unwrap_or_default();

    IntentResult {
        intent_type,
        confidence,
        suggested_pages,
        conversion_probability: conversion_probability(intent_type, current_url, model),
        recommended_actions: recommended_actions(intent_type)
            .iter()
            .map(|action| action.to_string())
            .collect(),
        journey_stage: query_journey_stage(intent_type, &lowered),
    }
}

/// Starting conversion probability for an intent
pub fn base_conversion_probability(intent: IntentCategory) -> f64 {
    match intent {
        IntentCategory::ProductInquiry => 0.7,
        IntentCategory::Conversion => 0.9,
        IntentCategory::Contact => 0.8,
        IntentCategory::Support => 0.3,
        IntentCategory::Navigation => 0.4,
        IntentCategory::Information => 0.2,
    }
}

/// Estimates how likely the visitor is to convert
///
/// Being on a decision page multiplies the base by 1.5 (consideration by
/// 1.2), and a page with calls to action multiplies by a further 1.3. The
/// result is clamped to 1.
pub fn conversion_probability(intent: IntentCategory, current_url: &str, model: &SiteModel) -> f64 {
    let mut probability = base_conversion_probability(intent);

    if let Some(page) = current_page(model, current_url) {
        match page.journey_stage {
            JourneyStage::Decision => probability *= 1.5,
            JourneyStage::Consideration => probability *= 1.2,
            JourneyStage::Awareness => {}
        }

        if !page.conversion_elements.is_empty() {
            probability *= 1.3;
        }
    }

    probability.min(1.0)
}

/// Fixed follow-up actions for an intent
pub fn recommended_actions(intent: IntentCategory) -> &'static [&'static str] {
    match intent {
        IntentCategory::ProductInquiry => &[
            "Show product details and specifications",
            "Offer product comparison",
            "Provide pricing information",
            "Schedule a demo or consultation",
        ],
        IntentCategory::Support => &[
            "Direct to FAQ or help documentation",
            "Offer to connect with support team",
            "Provide troubleshooting steps",
            "Search knowledge base",
        ],
        IntentCategory::Navigation => &[
            "Help find the requested page or section",
            "Provide site map or navigation guide",
            "Offer search functionality",
            "Suggest related pages",
        ],
        IntentCategory::Contact => &[
            "Provide contact information",
            "Show office locations and hours",
            "Offer to schedule a call",
            "Direct to contact form",
        ],
        IntentCategory::Conversion => &[
            "Guide through sign-up process",
            "Highlight free trial or demo",
            "Explain benefits and value proposition",
            "Address common objections",
        ],
        IntentCategory::Information => &[
            "Provide relevant information",
            "Suggest related pages",
            "Offer additional assistance",
            "Ask clarifying questions",
        ],
    }
}

/// Places a query in the funnel from its wording and detected intent
///
/// `lowered` must already be lowercased.
pub fn query_journey_stage(intent: IntentCategory, lowered: &str) -> JourneyStage {
    let has_any = |keywords: &[&str]| keywords.iter().any(|kw| lowered.contains(kw));

    if matches!(intent, IntentCategory::Conversion | IntentCategory::Contact)
        || has_any(DECISION_KEYWORDS)
    {
        JourneyStage::Decision
    } else if intent == IntentCategory::ProductInquiry || has_any(CONSIDERATION_KEYWORDS) {
        JourneyStage::Consideration
    } else {
        JourneyStage::Awareness
    }
}

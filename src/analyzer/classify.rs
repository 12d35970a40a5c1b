//! Page type, intent and journey stage classification

use std::collections::BTreeSet;
use url::Url;

use crate::model::{IntentCategory, JourneyStage, PageType};

/// Minimum keyword hits for a page to carry an intent category
pub const INTENT_THRESHOLD: usize = 2;

/// URL path patterns, checked in order; the first match decides the type
const PAGE_TYPE_PATTERNS: &[(&[&str], PageType)] = &[
    (&["/product", "/shop", "/buy"], PageType::Product),
    (&["/about", "/company"], PageType::About),
    (&["/contact", "/support"], PageType::Contact),
    (&["/blog", "/news", "/article"], PageType::Content),
    (&["/service", "/solution"], PageType::Service),
];

const AWARENESS_CUES: &[&str] = &["learn", "discover", "what is", "introduction", "overview"];
const CONSIDERATION_CUES: &[&str] = &["compare", "vs", "features", "benefits", "pros and cons"];
const DECISION_CUES: &[&str] = &["buy", "purchase", "price", "contact", "demo", "trial"];

/// Classifies a page from its URL path
///
/// # Examples
///
/// ```
/// use url::Url;
/// use site_intel::analyzer::classify_page_type;
/// use site_intel::PageType;
///
/// let url = Url::parse("https://example.com/products/widget").unwrap();
/// assert_eq!(classify_page_type(&url), PageType::Product);
/// ```
pub fn classify_page_type(url: &Url) -> PageType {
    let path = url.path().to_lowercase();

    for (patterns, page_type) in PAGE_TYPE_PATTERNS {
        if patterns.iter().any(|pattern| path.contains(pattern)) {
            return *page_type;
        }
    }

    let last_segment = path.rsplit('/').find(|s| !s.is_empty());
    match last_segment {
        None => PageType::Homepage,
        Some(segment) if is_index_segment(segment) => PageType::Homepage,
        Some(_) => PageType::General,
    }
}

/// `index` or `index.<ext>`
fn is_index_segment(segment: &str) -> bool {
    match segment.strip_prefix("index") {
        Some(rest) => rest.is_empty() || (rest.starts_with('.') && rest.len() > 1),
        None => false,
    }
}

/// Returns every intent category with at least [`INTENT_THRESHOLD`] keyword hits
///
/// `lowered` must already be lowercased.
pub fn classify_intents(lowered: &str) -> BTreeSet<IntentCategory> {
    IntentCategory::ALL
        .into_iter()
        .filter(|intent| intent.keyword_hits(lowered) >= INTENT_THRESHOLD)
        .collect()
}

/// Places a page in the awareness / consideration / decision funnel
///
/// Cues are checked in stage order and the first match wins; pages with no
/// cue default to awareness. `lowered` must already be lowercased.
pub fn determine_journey_stage(page_type: PageType, lowered: &str) -> JourneyStage {
    let has_cue = |cues: &[&str]| cues.iter().any(|cue| lowered.contains(cue));

    if has_cue(AWARENESS_CUES) || matches!(page_type, PageType::Content | PageType::About) {
        JourneyStage::Awareness
    } else if has_cue(CONSIDERATION_CUES) || page_type == PageType::Service {
        JourneyStage::Consideration
    } else if has_cue(DECISION_CUES) || matches!(page_type, PageType::Product | PageType::Contact)
    {
        JourneyStage::Decision
    } else {
        JourneyStage::Awareness
    }
}

//! Intent/query engine
//!
//! Read-only functions over a finished [`SiteModel`](crate::model::SiteModel):
//! intent classification of a visitor query and ranked navigation
//! suggestions. Nothing here mutates the model, so queries may run
//! concurrently against a shared model.

mod intent;
mod navigation;

pub use intent::{
    analyze_intent, base_conversion_probability, conversion_probability, query_journey_stage,
    recommended_actions, IntentResult, DEFAULT_CONFIDENCE, MAX_SUGGESTED_PAGES,
};
pub use navigation::{get_navigation_suggestions, query_tokens, NavigationSuggestion, MAX_SUGGESTIONS};

use crate::model::{PageRecord, SiteModel};
use crate::url::normalize_url;

/// Finds the page a visitor is currently on
///
/// The URL is normalized first so it matches how pages are keyed; input that
/// does not parse is looked up verbatim.
pub(crate) fn current_page<'a>(model: &'a SiteModel, current_url: &str) -> Option<&'a PageRecord> {
    match normalize_url(current_url) {
        Ok(url) => model.page(url.as_str()),
        Err(_) => model.page(current_url),
    }
}

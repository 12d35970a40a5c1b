//! Ranked navigation suggestions

use serde::{Deserialize, Serialize};

use crate::model::{JourneyStage, PageRecord, PageType, SiteModel};

/// Maximum suggestions returned per query
pub const MAX_SUGGESTIONS: usize = 5;

const TITLE_WEIGHT: u32 = 3;
const CONTENT_WEIGHT: u32 = 1;
const KEYWORD_WEIGHT: u32 = 2;

/// A page suggested in answer to a query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationSuggestion {
    pub url: String,
    pub title: String,
    pub description: String,
    pub relevance_score: u32,
    pub page_type: PageType,
    pub journey_stage: JourneyStage,
}

/// Splits a query into lowercase tokens
///
/// Tokens are whitespace-separated with surrounding punctuation removed, so
/// `"pricing?"` matches a title word `"pricing"`.
pub fn query_tokens(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(|token| token.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Ranks model pages against a query
///
/// Each query token scores 3 when it is a word of the page title, 1 when it
/// occurs anywhere in the page content and 2 when it equals one of the
/// page's keywords. Pages scoring zero are dropped. The rest are sorted by
/// descending score; equal scores keep discovery order. At most
/// [`MAX_SUGGESTIONS`] are returned.
///
/// The current URL is accepted for parity with [`analyze_intent`](crate::analyze_intent)
/// and does not influence the ranking.
pub fn get_navigation_suggestions(
    query: &str,
    _current_url: &str,
    model: &SiteModel,
) -> Vec<NavigationSuggestion> {
    let tokens = query_tokens(query);
    if tokens.is_empty() {
        return Vec::new();
    }

    let mut scored: Vec<(u32, &PageRecord)> = model
        .pages
        .iter()
        .map(|page| (relevance_score(&tokens, page), page))
        .filter(|(score, _)| *score > 0)
        .collect();

    // stable: ties stay in discovery order
    scored.sort_by(|a, b| b.0.cmp(&a.0));

    scored
        .into_iter()
        .take(MAX_SUGGESTIONS)
        .map(|(relevance_score, page)| NavigationSuggestion {
            url: page.url.clone(),
            title: page.title.clone(),
            description: page.description.clone(),
            relevance_score,
            page_type: page.page_type,
            journey_stage: page.journey_stage,
        })
        .collect()
}

fn relevance_score(tokens: &[String], page: &PageRecord) -> u32 {
    let title_words = query_tokens(&page.title);
    let content = page.raw_content.to_lowercase();
    let keywords: Vec<String> = page.keywords.iter().map(|kw| kw.to_lowercase()).collect();

    tokens
        .iter()
        .map(|token| {
            let mut score = 0;
            if title_words.contains(token) {
                score += TITLE_WEIGHT;
            }
            if content.contains(token.as_str()) {
                score += CONTENT_WEIGHT;
            }
            if keywords.contains(token) {
                score += KEYWORD_WEIGHT;
            }
            score
        })
        .sum()
}

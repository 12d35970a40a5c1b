//! Site model construction from a finished page collection
//!
//! Every function here is pure: the same page collection (and timestamp)
//! always produces the same model, and nothing here can fail.

use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashSet};
use url::Url;

use crate::model::roi::calculate_roi_metrics;
use crate::model::types::{IntentCategory, JourneyStage, PageRecord, PageType, SiteModel};
use crate::url::parent_path;

/// Maximum number of conversion funnels kept in a model
pub const MAX_FUNNELS: usize = 5;

/// Journey flow bucket names
pub const FLOW_PRODUCT_DISCOVERY: &str = "product_discovery";
pub const FLOW_SUPPORT: &str = "support_flow";
pub const FLOW_AWARENESS_TO_CONSIDERATION: &str = "awareness_to_consideration";
pub const FLOW_CONSIDERATION_TO_DECISION: &str = "consideration_to_decision";

/// Builds a site model from a crawl's page records
///
/// Pages are kept in the order given (discovery order). Should the same URL
/// appear twice, the first record wins.
///
/// # Arguments
///
/// * `domain` - The crawled domain
/// * `pages` - Page records produced by the crawl
/// * `crawl_depth` - The depth limit the crawl ran with
/// * `crawled_at` - Timestamp recorded as the model's last full crawl
pub fn build_site_model(
    domain: &str,
    pages: Vec<PageRecord>,
    crawl_depth: u32,
    crawled_at: DateTime<Utc>,
) -> SiteModel {
    let pages = dedup_pages(pages);

    SiteModel {
        domain: domain.to_string(),
        total_pages: pages.len(),
        page_hierarchy: build_page_hierarchy(&pages),
        navigation_paths: build_navigation_paths(&pages),
        conversion_funnels: identify_conversion_funnels(&pages),
        content_categories: categorize_content(&pages),
        intent_map: build_intent_map(&pages),
        journey_flows: build_journey_flows(&pages),
        crawl_depth,
        last_full_crawl: crawled_at,
        roi_metrics: calculate_roi_metrics(&pages),
        pages,
    }
}

fn dedup_pages(pages: Vec<PageRecord>) -> Vec<PageRecord> {
    let mut seen = HashSet::new();
    pages
        .into_iter()
        .filter(|page| seen.insert(page.url.clone()))
        .collect()
}

/// Groups page URLs under their parent path
pub fn build_page_hierarchy(pages: &[PageRecord]) -> BTreeMap<String, Vec<String>> {
    let mut hierarchy: BTreeMap<String, Vec<String>> = BTreeMap::new();

    for page in pages {
        let parent = Url::parse(&page.url).ok().and_then(|url| parent_path(&url));
        if let Some(parent) = parent {
            hierarchy.entry(parent).or_default().push(page.url.clone());
        }
    }

    hierarchy
}

/// Maps each page to the internal links that point at other model pages
///
/// Links to pages outside the model are dropped, as are repeats of a link
/// already listed for the same page.
pub fn build_navigation_paths(pages: &[PageRecord]) -> BTreeMap<String, Vec<String>> {
    let known: HashSet<&str> = pages.iter().map(|p| p.url.as_str()).collect();

    pages
        .iter()
        .map(|page| {
            let mut seen = HashSet::new();
            let targets = page
                .internal_links
                .iter()
                .filter(|link| known.contains(link.as_str()))
                .filter(|link| seen.insert(link.as_str()))
                .cloned()
                .collect();
            (page.url.clone(), targets)
        })
        .collect()
}

/// Forms awareness -> consideration -> decision funnels
///
/// Uses the first three awareness pages and the first two consideration and
/// decision pages, combined in nested order and capped at [`MAX_FUNNELS`].
pub fn identify_conversion_funnels(pages: &[PageRecord]) -> Vec<[String; 3]> {
    let stage_urls = |stage: JourneyStage, limit: usize| -> Vec<&str> {
        pages
            .iter()
            .filter(|p| p.journey_stage == stage)
            .map(|p| p.url.as_str())
            .take(limit)
            .collect()
    };

    let awareness = stage_urls(JourneyStage::Awareness, 3);
    let consideration = stage_urls(JourneyStage::Consideration, 2);
    let decision = stage_urls(JourneyStage::Decision, 2);

    let mut funnels = Vec::new();
    for a in &awareness {
        for c in &consideration {
            for d in &decision {
                funnels.push([a.to_string(), c.to_string(), d.to_string()]);
            }
        }
    }

    funnels.truncate(MAX_FUNNELS);
    funnels
}

/// Indexes pages by page type, `intent_<category>` and `journey_<stage>`
pub fn categorize_content(pages: &[PageRecord]) -> BTreeMap<String, Vec<String>> {
    let mut categories: BTreeMap<String, Vec<String>> = BTreeMap::new();

    for page in pages {
        categories
            .entry(page.page_type.to_string())
            .or_default()
            .push(page.url.clone());

        for intent in &page.intent_categories {
            categories
                .entry(format!("intent_{}", intent))
                .or_default()
                .push(page.url.clone());
        }

        categories
            .entry(format!("journey_{}", page.journey_stage))
            .or_default()
            .push(page.url.clone());
    }

    categories
}

/// Inverts page intent categories into intent -> URLs
pub fn build_intent_map(pages: &[PageRecord]) -> BTreeMap<IntentCategory, Vec<String>> {
    let mut intent_map: BTreeMap<IntentCategory, Vec<String>> = BTreeMap::new();

    for page in pages {
        for intent in &page.intent_categories {
            intent_map.entry(*intent).or_default().push(page.url.clone());
        }
    }

    intent_map
}

/// Sorts pages into the four named journey flows
///
/// Rules are applied in order and the first match wins; pages matching no
/// rule (consideration-stage pages without a product or support intent)
/// are left out.
pub fn build_journey_flows(pages: &[PageRecord]) -> BTreeMap<String, Vec<String>> {
    let mut flows: BTreeMap<String, Vec<String>> = [
        FLOW_PRODUCT_DISCOVERY,
        FLOW_SUPPORT,
        FLOW_AWARENESS_TO_CONSIDERATION,
        FLOW_CONSIDERATION_TO_DECISION,
    ]
    .into_iter()
    .map(|name| (name.to_string(), Vec::new()))
    .collect();

    for page in pages {
        let flow = if page.page_type == PageType::Homepage
            || page.intent_categories.contains(&IntentCategory::ProductInquiry)
        {
            FLOW_PRODUCT_DISCOVERY
        } else if page.intent_categories.contains(&IntentCategory::Support) {
            FLOW_SUPPORT
        } else if page.journey_stage == JourneyStage::Awareness {
            FLOW_AWARENESS_TO_CONSIDERATION
        } else if page.journey_stage == JourneyStage::Decision {
            FLOW_CONSIDERATION_TO_DECISION
        } else {
            continue;
        };

        if let Some(urls) = flows.get_mut(flow) {
            urls.push(page.url.clone());
        }
    }

    flows
}

//! Site model module
//!
//! This module holds the record types produced by the analyzer and the pure
//! aggregation that turns a finished crawl into a [`SiteModel`]:
//! - Page hierarchy, navigation paths and content categories
//! - Conversion funnels, intent map and journey flows
//! - ROI metrics

mod builder;
mod roi;
mod types;

pub use builder::{
    build_intent_map, build_journey_flows, build_navigation_paths, build_page_hierarchy,
    build_site_model, categorize_content, identify_conversion_funnels, FLOW_AWARENESS_TO_CONSIDERATION,
    FLOW_CONSIDERATION_TO_DECISION, FLOW_PRODUCT_DISCOVERY, FLOW_SUPPORT, MAX_FUNNELS,
};
pub use roi::{calculate_roi_metrics, navigation_efficiency, page_experience_score, RoiMetrics};
pub use types::{
    ContactInfo, ConversionElement, FormInfo, FormInput, ImageInfo, IntentCategory, JourneyStage,
    PageRecord, PageType, SiteModel,
};

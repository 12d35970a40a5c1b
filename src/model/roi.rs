//! ROI metrics aggregation over a finished page collection

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::model::types::PageRecord;

/// Flat numeric summary of a site model
///
/// Every `*_score` field and `navigation_efficiency` lies in `[0, 100]`;
/// count fields are non-negative integers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoiMetrics {
    pub total_pages_analyzed: u64,
    pub avg_seo_score: f64,
    pub avg_accessibility_score: f64,
    pub total_conversion_elements: u64,
    /// Total number of forms across all pages
    pub lead_generation_potential: u64,
    /// Average word count
    pub avg_content_length: f64,
    pub avg_reading_level: f64,
    /// Number of distinct intent categories present anywhere on the site
    pub intent_coverage_score: u64,
    pub navigation_efficiency: f64,
    pub content_optimization_score: f64,
    pub user_experience_score: f64,
}

impl RoiMetrics {
    /// Returns the metrics as a name -> value map
    pub fn as_map(&self) -> BTreeMap<&'static str, f64> {
        BTreeMap::from([
            ("total_pages_analyzed", self.total_pages_analyzed as f64),
            ("avg_seo_score", self.avg_seo_score),
            ("avg_accessibility_score", self.avg_accessibility_score),
            ("total_conversion_elements", self.total_conversion_elements as f64),
            ("lead_generation_potential", self.lead_generation_potential as f64),
            ("avg_content_length", self.avg_content_length),
            ("avg_reading_level", self.avg_reading_level),
            ("intent_coverage_score", self.intent_coverage_score as f64),
            ("navigation_efficiency", self.navigation_efficiency),
            ("content_optimization_score", self.content_optimization_score),
            ("user_experience_score", self.user_experience_score),
        ])
    }
}

/// Computes ROI metrics for a page collection
///
/// An empty collection yields all-zero metrics. Non-finite page values are
/// treated as zero so the aggregate is always finite.
pub fn calculate_roi_metrics(pages: &[PageRecord]) -> RoiMetrics {
    if pages.is_empty() {
        return RoiMetrics::default();
    }

    let avg_seo_score = mean(pages.iter().map(|p| p.seo_score));
    let avg_accessibility_score = mean(pages.iter().map(|p| p.accessibility_score));

    let intents: BTreeSet<_> = pages
        .iter()
        .flat_map(|p| p.intent_categories.iter().copied())
        .collect();

    RoiMetrics {
        total_pages_analyzed: pages.len() as u64,
        avg_seo_score,
        avg_accessibility_score,
        total_conversion_elements: pages
            .iter()
            .map(|p| p.conversion_elements.len() as u64)
            .sum(),
        lead_generation_potential: pages.iter().map(|p| p.forms.len() as u64).sum(),
        avg_content_length: mean(pages.iter().map(|p| p.word_count as f64)),
        avg_reading_level: mean(pages.iter().map(|p| p.reading_level)),
        intent_coverage_score: intents.len() as u64,
        navigation_efficiency: navigation_efficiency(pages),
        content_optimization_score: ((avg_seo_score + avg_accessibility_score) / 2.0)
            .clamp(0.0, 100.0),
        user_experience_score: mean(pages.iter().map(page_experience_score)).clamp(0.0, 100.0),
    }
}

/// Scores the average number of internal links per page
///
/// Three to five links per page is ideal; the score falls off in bands
/// around that range.
pub fn navigation_efficiency(pages: &[PageRecord]) -> f64 {
    if pages.is_empty() {
        return 0.0;
    }

    let total_links: usize = pages.iter().map(|p| p.internal_links.len()).sum();
    let avg = total_links as f64 / pages.len() as f64;

    if (3.0..=5.0).contains(&avg) {
        100.0
    } else if (2.0..=6.0).contains(&avg) {
        80.0
    } else if (1.0..=7.0).contains(&avg) {
        60.0
    } else {
        40.0
    }
}

/// Per-page 100-point user experience rubric
///
/// | Aspect | Points |
/// |--------|--------|
/// | ≥300 words (≥100) | 20 (10) |
/// | reading ease in 30..=60 (20..=70) | 20 (10) |
/// | navigation labels present | 15 |
/// | ≥3 internal links (≥1) | 15 (10) |
/// | conversion elements present | 15 |
/// | forms present | 10 |
/// | contact info present | 5 |
pub fn page_experience_score(page: &PageRecord) -> f64 {
    let mut score = 0.0;

    if page.word_count >= 300 {
        score += 20.0;
    } else if page.word_count >= 100 {
        score += 10.0;
    }

    if (30.0..=60.0).contains(&page.reading_level) {
        score += 20.0;
    } else if (20.0..=70.0).contains(&page.reading_level) {
        score += 10.0;
    }

    if !page.navigation_labels.is_empty() {
        score += 15.0;
    }

    match page.internal_links.len() {
        n if n >= 3 => score += 15.0,
        n if n >= 1 => score += 10.0,
        _ => {}
    }

    if !page.conversion_elements.is_empty() {
        score += 15.0;
    }

    if !page.forms.is_empty() {
        score += 10.0;
    }

    if !page.contact_info.is_empty() {
        score += 5.0;
    }

    score
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), value| {
        let value = if value.is_finite() { value } else { 0.0 };
        (sum + value, count + 1)
    });

    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

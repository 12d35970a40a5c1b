//! Markdown ROI report generation

use crate::model::{IntentCategory, PageRecord, SiteModel};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Number of pages listed in the best and worst SEO tables
pub const TOP_PAGES: usize = 10;

const CONVERSION_COUNT_NOTE: &str = "_Conversion elements count each page element once, \
even when it matches several call-to-action selectors (e.g. `<button class=\"btn\">`)._\n\n";

/// Writes the markdown report for a site model
///
/// # Arguments
///
/// * `model` - The site model to report on
/// * `output_path` - Path where the markdown file should be written
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote the report
/// * `Err(io::Error)` - Failed to write the report
pub fn write_markdown_report(model: &SiteModel, output_path: &Path) -> std::io::Result<()> {
    let markdown = format_markdown_report(model);

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats a site model as a markdown report
pub fn format_markdown_report(model: &SiteModel) -> String {
    let mut md = String::new();

    md.push_str(&format!("# Site Intelligence Report: {}\n\n", model.domain));

    md.push_str("## Crawl\n\n");
    md.push_str(&format!("- **Pages Analyzed**: {}\n", model.total_pages));
    md.push_str(&format!("- **Depth Limit**: {}\n", model.crawl_depth));
    md.push_str(&format!(
        "- **Last Full Crawl**: {}\n\n",
        model.last_full_crawl.to_rfc3339()
    ));

    if model.is_empty() {
        md.push_str("No pages could be analyzed.\n");
        return md;
    }

    let roi = &model.roi_metrics;
    md.push_str("## ROI Metrics\n\n");
    md.push_str("| Metric | Value |\n");
    md.push_str("|--------|-------|\n");
    md.push_str(&format!("| Average SEO Score | {:.1} |\n", roi.avg_seo_score));
    md.push_str(&format!(
        "| Average Accessibility Score | {:.1} |\n",
        roi.avg_accessibility_score
    ));
    md.push_str(&format!(
        "| Content Optimization | {:.1} |\n",
        roi.content_optimization_score
    ));
    md.push_str(&format!("| User Experience | {:.1} |\n", roi.user_experience_score));
    md.push_str(&format!(
        "| Navigation Efficiency | {:.0} |\n",
        roi.navigation_efficiency
    ));
    md.push_str(&format!(
        "| Average Content Length (words) | {:.0} |\n",
        roi.avg_content_length
    ));
    md.push_str(&format!("| Average Reading Ease | {:.1} |\n", roi.avg_reading_level));
    md.push_str(&format!(
        "| Conversion Elements | {} |\n",
        roi.total_conversion_elements
    ));
    md.push_str(&format!(
        "| Lead Generation Forms | {} |\n",
        roi.lead_generation_potential
    ));
    md.push_str(&format!(
        "| Intent Coverage | {} / {} |\n\n",
        roi.intent_coverage_score,
        IntentCategory::ALL.len()
    ));
    md.push_str(CONVERSION_COUNT_NOTE);

    md.push_str("## Intent Coverage\n\n");
    md.push_str("| Intent | Pages |\n");
    md.push_str("|--------|-------|\n");
    for intent in IntentCategory::ALL {
        let count = model.intent_map.get(&intent).map_or(0, Vec::len);
        md.push_str(&format!("| {} | {} |\n", intent, count));
    }
    md.push('\n');

    md.push_str("## Journey Flows\n\n");
    for (flow, urls) in &model.journey_flows {
        md.push_str(&format!("- **{}**: {} pages\n", flow, urls.len()));
    }
    md.push('\n');

    md.push_str("## Conversion Funnels\n\n");
    if model.conversion_funnels.is_empty() {
        md.push_str("No complete awareness → consideration → decision funnel found.\n\n");
    } else {
        for (i, [awareness, consideration, decision]) in model.conversion_funnels.iter().enumerate() {
            md.push_str(&format!(
                "{}. {} → {} → {}\n",
                i + 1,
                awareness,
                consideration,
                decision
            ));
        }
        md.push('\n');
    }

    let mut ranked: Vec<&PageRecord> = model.pages.iter().collect();
    ranked.sort_by(|a, b| b.seo_score.total_cmp(&a.seo_score));

    md.push_str(&format!("## Top {} Pages by SEO Score\n\n", TOP_PAGES));
    push_page_table(&mut md, ranked.iter().take(TOP_PAGES).copied());

    if ranked.len() > TOP_PAGES {
        md.push_str("## Pages Needing Attention\n\n");
        push_page_table(&mut md, ranked.iter().rev().take(TOP_PAGES).copied());
    }

    md
}

fn push_page_table<'a>(md: &mut String, pages: impl Iterator<Item = &'a PageRecord>) {
    md.push_str("| URL | Type | Stage | SEO | Accessibility |\n");
    md.push_str("|-----|------|-------|-----|---------------|\n");
    for page in pages {
        md.push_str(&format!(
            "| {} | {} | {} | {:.0} | {:.0} |\n",
            page.url, page.page_type, page.journey_stage, page.seo_score, page.accessibility_score
        ));
    }
    md.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::build_site_model;
    use crate::model::testing::{fixed_time, page};
    use crate::model::JourneyStage;

    fn sample_model() -> SiteModel {
        let mut home = page("https://example.com/");
        home.seo_score = 90.0;
        home.intent_categories.insert(IntentCategory::Information);

        let mut features = page("https://example.com/features");
        features.seo_score = 40.0;
        features.journey_stage = JourneyStage::Consideration;

        let mut buy = page("https://example.com/buy");
        buy.seo_score = 65.0;
        buy.journey_stage = JourneyStage::Decision;

        build_site_model("example.com", vec![home, features, buy], 3, fixed_time())
    }

    #[test]
    fn test_report_sections() {
        let md = format_markdown_report(&sample_model());

        assert!(md.starts_with("# Site Intelligence Report: example.com"));
        assert!(md.contains("- **Pages Analyzed**: 3"));
        assert!(md.contains("## ROI Metrics"));
        assert!(md.contains("| Intent Coverage | 1 / 6 |"));
        assert!(md.contains("count each page element once"));
        assert!(md.contains("| information | 1 |"));
        assert!(md.contains("| support | 0 |"));
        assert!(md.contains(
            "1. https://example.com/ → https://example.com/features → https://example.com/buy"
        ));
        assert!(!md.contains("## Pages Needing Attention"));
    }

    #[test]
    fn test_pages_ranked_by_seo() {
        let md = format_markdown_report(&sample_model());
        let home = md.find("| https://example.com/ |").unwrap();
        let buy = md.find("| https://example.com/buy |").unwrap();
        let features = md.find("| https://example.com/features |").unwrap();
        assert!(home < buy && buy < features);
    }

    #[test]
    fn test_empty_model_report() {
        let model = build_site_model("example.com", Vec::new(), 3, fixed_time());
        let md = format_markdown_report(&model);
        assert!(md.contains("- **Pages Analyzed**: 0"));
        assert!(md.contains("No pages could be analyzed."));
        assert!(!md.contains("## ROI Metrics"));
    }

    #[test]
    fn test_write_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.md");

        write_markdown_report(&sample_model(), &path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, format_markdown_report(&sample_model()));
    }
}

//! Page analyzer
//!
//! Turns one HTML document into an immutable [`PageRecord`]. The analyzer is
//! a pure function of the HTML, the page URL and the crawl time: it performs
//! no I/O and holds no state between pages.

mod classify;
mod extract;
mod score;
mod text;

use chrono::{DateTime, Utc};
use scraper::Html;
use sha2::{Digest, Sha256};
use thiserror::Error;
use url::Url;

use crate::model::PageRecord;

pub use classify::{classify_intents, classify_page_type, determine_journey_stage, INTENT_THRESHOLD};
pub use extract::{
    collapse_whitespace, extract_contact_info, extract_conversion_elements, extract_description,
    extract_forms, extract_images, extract_links, extract_main_content, extract_navigation,
    extract_title, resolve_link, PageLinks,
};
pub use score::{accessibility_score, seo_score};
pub use text::{
    count_syllables, extract_keywords, is_stop_word, keyword_tokens, reading_ease,
    sentiment_score, MAX_KEYWORDS,
};

/// Reasons a fetched body yields no page record
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnalyzeError {
    #[error("document has no content")]
    EmptyDocument,
}

/// Analyzes a page whose links resolve against its own URL
///
/// See [`analyze_page_with_base`].
pub fn analyze_page(
    html: &str,
    url: &Url,
    depth: u32,
    crawled_at: DateTime<Utc>,
) -> Result<PageRecord, AnalyzeError> {
    analyze_page_with_base(html, url, url, depth, crawled_at)
}

/// Analyzes an HTML document into a page record
///
/// # Arguments
///
/// * `html` - The response body
/// * `url` - The normalized URL the page is keyed by
/// * `base_url` - The URL relative links resolve against (the final URL
///   after redirects); links are internal only when on `url`'s host
/// * `depth` - Link depth at which the page was discovered
/// * `crawled_at` - Timestamp recorded on the page
///
/// # Returns
///
/// * `Ok(PageRecord)` - The analyzed page
/// * `Err(AnalyzeError::EmptyDocument)` - The body is blank
pub fn analyze_page_with_base(
    html: &str,
    url: &Url,
    base_url: &Url,
    depth: u32,
    crawled_at: DateTime<Utc>,
) -> Result<PageRecord, AnalyzeError> {
    if html.trim().is_empty() {
        return Err(AnalyzeError::EmptyDocument);
    }

    let document = Html::parse_document(html);

    let title = extract_title(&document);
    let description = extract_description(&document);
    let content = extract_main_content(&document);
    let word_count = content.split_whitespace().count();
    let lowered = content.to_lowercase();

    let links = extract_links(&document, base_url, url);
    let page_type = classify_page_type(url);

    let seo = seo_score(&document, word_count, links.internal.len());
    let accessibility = accessibility_score(&document);

    Ok(PageRecord {
        url: url.to_string(),
        title,
        description,
        word_count,
        reading_level: reading_ease(&content),
        sentiment_score: sentiment_score(&content),
        keywords: extract_keywords(&content, MAX_KEYWORDS),
        internal_links: links.internal,
        external_links: links.external,
        images: extract_images(&document, base_url),
        forms: extract_forms(&document),
        contact_info: extract_contact_info(&content),
        navigation_labels: extract_navigation(&document),
        conversion_elements: extract_conversion_elements(&document),
        page_type,
        intent_categories: classify_intents(&lowered),
        journey_stage: determine_journey_stage(page_type, &lowered),
        seo_score: seo,
        accessibility_score: accessibility,
        content_hash: content_hash(&content),
        depth,
        last_crawled: crawled_at,
        raw_content: content,
    })
}

/// SHA-256 hex digest of normalized content
pub fn content_hash(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::testing::fixed_time;
    use crate::model::{IntentCategory, JourneyStage, PageType};

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    fn words(n: usize) -> String {
        vec!["widget"; n].join(" ")
    }

    #[test]
    fn test_empty_body_is_rejected() {
        let u = url("https://example.com/");
        assert_eq!(
            analyze_page("  \n ", &u, 0, fixed_time()),
            Err(AnalyzeError::EmptyDocument)
        );
    }

    #[test]
    fn test_seo_scenario_without_images() {
        let html = format!(
            r#"<html><head>
                <title>Widgets</title>
                <meta name="description" content="Widgets for everyone">
                <meta name="viewport" content="width=device-width">
            </head><body>
                <h1>Widgets</h1>
                <main>{}</main>
                <a href="/a">A</a><a href="/b">B</a><a href="/c">C</a>
                <a href="/d">D</a><a href="/e">E</a>
            </body></html>"#,
            words(350)
        );

        let page = analyze_page(&html, &url("https://example.com/widgets"), 1, fixed_time()).unwrap();
        assert_eq!(page.word_count, 350);
        assert_eq!(page.internal_links.len(), 5);
        assert!(page.images.is_empty());
        assert_eq!(page.seo_score, 90.0);
    }

    #[test]
    fn test_record_fields_populated() {
        let html = r#"<html><head><title>Pricing</title>
            <meta name="description" content="Plans and prices"></head>
            <body>
              <nav><a href="/">Home</a><a href="/contact">Contact</a></nav>
              <main>
                <h1>Pricing</h1>
                <p>Compare our product features and price. Email sales@example.com.</p>
                <button>Buy now</button>
              </main>
              <a href="https://partner.org/">Partner</a>
            </body></html>"#;
        let u = url("https://example.com/products/pricing");
        let page = analyze_page(html, &u, 2, fixed_time()).unwrap();

        assert_eq!(page.url, "https://example.com/products/pricing");
        assert_eq!(page.title, "Pricing");
        assert_eq!(page.description, "Plans and prices");
        assert!(page.raw_content.starts_with("Pricing Compare our product"));
        assert_eq!(page.page_type, PageType::Product);
        assert!(page.intent_categories.contains(&IntentCategory::ProductInquiry));
        assert_eq!(page.journey_stage, JourneyStage::Consideration);
        assert_eq!(page.internal_links, vec!["https://example.com/", "https://example.com/contact"]);
        assert_eq!(page.external_links, vec!["https://partner.org/"]);
        assert_eq!(page.navigation_labels, vec!["Home", "Contact"]);
        assert_eq!(page.conversion_elements.len(), 1);
        assert_eq!(page.contact_info.emails, vec!["sales@example.com"]);
        assert_eq!(page.depth, 2);
        assert_eq!(page.last_crawled, fixed_time());
        assert_eq!(page.content_hash, content_hash(&page.raw_content));
        assert_eq!(page.content_hash.len(), 64);
    }

    #[test]
    fn test_links_resolve_against_base_url() {
        let html = r#"<body><a href="next">Next</a></body>"#;
        let requested = url("https://example.com/start");
        let final_url = url("https://example.com/guide/");

        let page = analyze_page_with_base(html, &requested, &final_url, 0, fixed_time()).unwrap();
        assert_eq!(page.url, "https://example.com/start");
        assert_eq!(page.internal_links, vec!["https://example.com/guide/next"]);
    }

    #[test]
    fn test_offsite_redirect_links_are_external() {
        let html = r#"<body><a href="/secret">Secret</a></body>"#;
        let requested = url("https://example.com/out");
        let final_url = url("https://elsewhere.org/landing");

        let page = analyze_page_with_base(html, &requested, &final_url, 1, fixed_time()).unwrap();
        assert!(page.internal_links.is_empty());
        assert_eq!(page.external_links, vec!["https://elsewhere.org/secret"]);
    }

    #[test]
    fn test_analysis_is_deterministic() {
        let html = "<body><main>Learn about our team and mission. Great quality.</main></body>";
        let u = url("https://example.com/about");
        let a = analyze_page(html, &u, 0, fixed_time()).unwrap();
        let b = analyze_page(html, &u, 0, fixed_time()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_content_hash_known_value() {
        assert_eq!(
            content_hash(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}

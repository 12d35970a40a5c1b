//! Integration tests for the query engine
//!
//! Site models are built from analyzed HTML the same way a crawl builds
//! them, then queried through the public API.

use chrono::{TimeZone, Utc};
use site_intel::storage::{SiteModelStore, SqliteStore};
use site_intel::{
    analyze_intent, analyze_page, build_site_model, get_navigation_suggestions, normalize_url,
    IntentCategory, JourneyStage, SiteModel,
};

const HOME: &str = r#"<html><head><title>Acme Widgets</title></head><body>
    <nav><a href="/pricing">Pricing</a> <a href="/help">Help</a></nav>
    <main><h1>Acme Widgets</h1><p>Welcome to Acme, the widget company.</p></main>
</body></html>"#;

const PRICING: &str = r#"<html><head><title>Pricing</title></head><body>
    <main>
        <h1>Pricing</h1>
        <p>Compare every product plan. The price covers hosting and the cost of updates.</p>
        <button>Start now</button>
    </main>
</body></html>"#;

const HELP: &str = r#"<html><head><title>Help Center</title></head><body>
    <main>
        <h1>Help Center</h1>
        <p>Read the FAQ or a tutorial to fix a problem with your widget.</p>
    </main>
</body></html>"#;

fn build_model() -> SiteModel {
    let crawled_at = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
    let pages = [
        ("https://acme.test/", HOME, 0),
        ("https://acme.test/pricing", PRICING, 1),
        ("https://acme.test/help", HELP, 1),
    ]
    .into_iter()
    .map(|(url, html, depth)| {
        let url = normalize_url(url).expect("valid url");
        analyze_page(html, &url, depth, crawled_at).expect("analysis failed")
    })
    .collect();

    build_site_model("acme.test", pages, 2, crawled_at)
}

#[test]
fn test_prices_query_suggests_pricing_page() {
    let model = build_model();
    assert!(model.intent_map[&IntentCategory::ProductInquiry]
        .contains(&"https://acme.test/pricing".to_string()));

    let result = analyze_intent("What are your prices?", "", &model);
    assert_eq!(result.intent_type, IntentCategory::ProductInquiry);
    assert!(result
        .suggested_pages
        .contains(&"https://acme.test/pricing".to_string()));
    assert_eq!(result.journey_stage, JourneyStage::Decision);
}

#[test]
fn test_support_query() {
    let model = build_model();

    let result = analyze_intent("I need help to fix an error", "https://acme.test/", &model);
    assert_eq!(result.intent_type, IntentCategory::Support);
    assert_eq!(result.suggested_pages, vec!["https://acme.test/help"]);
    assert_eq!(
        result.recommended_actions[0],
        "Direct to FAQ or help documentation"
    );
}

#[test]
fn test_conversion_probability_uses_current_page() {
    let model = build_model();
    let pricing = model.page("https://acme.test/pricing").expect("pricing page");
    assert_eq!(pricing.journey_stage, JourneyStage::Consideration);
    assert!(!pricing.conversion_elements.is_empty());

    // 0.7 * 1.2 * 1.3 clamps to 1
    let on_pricing = analyze_intent("how much does the product cost", "https://acme.test/pricing/", &model);
    assert_eq!(on_pricing.conversion_probability, 1.0);

    let elsewhere = analyze_intent("how much does the product cost", "https://acme.test/unknown", &model);
    assert!((elsewhere.conversion_probability - 0.7).abs() < 1e-9);
}

#[test]
fn test_navigation_suggestions_rank_title_matches_first() {
    let model = build_model();

    let suggestions = get_navigation_suggestions("pricing", "", &model);
    assert_eq!(suggestions[0].url, "https://acme.test/pricing");
    assert_eq!(suggestions[0].title, "Pricing");
    assert!(suggestions
        .windows(2)
        .all(|w| w[0].relevance_score >= w[1].relevance_score));

    assert!(get_navigation_suggestions("zeppelin", "", &model).is_empty());
}

#[test]
fn test_query_against_stored_model() {
    let model = build_model();
    let mut store = SqliteStore::new_in_memory().expect("Failed to open store");
    store.store("acme", &model).expect("Failed to store model");

    let loaded = store.load("acme").expect("Failed to load").expect("missing");
    let result = analyze_intent("What are your prices?", "", &loaded);
    assert_eq!(result.intent_type, IntentCategory::ProductInquiry);
    assert!(result
        .suggested_pages
        .contains(&"https://acme.test/pricing".to_string()));
}

#[test]
fn test_intent_result_serializes_snake_case() {
    let model = build_model();
    let result = analyze_intent("What are your prices?", "", &model);

    let json = serde_json::to_value(&result).expect("serialize");
    assert_eq!(json["intent_type"], "product_inquiry");
    assert_eq!(json["journey_stage"], "decision");
}

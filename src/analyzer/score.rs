//! SEO and accessibility rubrics
//!
//! Both scores are sums of fixed point awards over the parsed document,
//! capped at 100.

use scraper::{Html, Selector};
use std::collections::HashSet;

const MAX_SCORE: f64 = 100.0;

/// Landmark elements counted by the accessibility rubric
const SEMANTIC_TAGS: [&str; 7] = ["header", "nav", "main", "article", "section", "aside", "footer"];

fn count(document: &Html, css: &str) -> usize {
    Selector::parse(css)
        .map(|sel| document.select(&sel).count())
        .unwrap_or(0)
}

fn exists(document: &Html, css: &str) -> bool {
    count(document, css) > 0
}

/// Fraction of `<img>` elements with non-empty alt text, None without images
fn alt_text_ratio(document: &Html) -> Option<f64> {
    let Ok(img) = Selector::parse("img") else {
        return None;
    };

    let (total, with_alt) = document.select(&img).fold((0usize, 0usize), |(total, alt), el| {
        let has_alt = el
            .value()
            .attr("alt")
            .is_some_and(|alt| !alt.trim().is_empty());
        (total + 1, alt + usize::from(has_alt))
    });

    (total > 0).then(|| with_alt as f64 / total as f64)
}

/// Fraction of `<input>` elements referenced by some `<label for>`,
/// None without inputs
fn labeled_input_ratio(document: &Html) -> Option<f64> {
    let (Ok(input), Ok(label)) = (Selector::parse("input"), Selector::parse("label[for]")) else {
        return None;
    };

    let labeled_ids: HashSet<&str> = document
        .select(&label)
        .filter_map(|el| el.value().attr("for"))
        .collect();

    let (total, labeled) = document.select(&input).fold((0usize, 0usize), |(total, n), el| {
        let is_labeled = el
            .value()
            .attr("id")
            .is_some_and(|id| labeled_ids.contains(id));
        (total + 1, n + usize::from(is_labeled))
    });

    (total > 0).then(|| labeled as f64 / total as f64)
}

fn has_nonempty_text(document: &Html, css: &str) -> bool {
    Selector::parse(css).is_ok_and(|sel| {
        document
            .select(&sel)
            .next()
            .is_some_and(|el| el.text().any(|t| !t.trim().is_empty()))
    })
}

/// Scores on-page SEO basics
///
/// | Check | Points |
/// |-------|--------|
/// | non-empty `<title>` | 20 |
/// | non-empty meta description | 15 |
/// | first `<h1>` has text | 15 |
/// | ≥300 words (≥100) | 20 (10) |
/// | ≥80% of images have alt text (only with images) | 10 |
/// | ≥3 internal links | 10 |
/// | viewport meta tag | 10 |
///
/// # Arguments
///
/// * `document` - The parsed page
/// * `word_count` - Words in the extracted main content
/// * `internal_links` - Number of same-site links on the page
pub fn seo_score(document: &Html, word_count: usize, internal_links: usize) -> f64 {
    let mut score: f64 = 0.0;

    if has_nonempty_text(document, "title") {
        score += 20.0;
    }

    let has_description = Selector::parse("meta[name=\"description\"]").is_ok_and(|sel| {
        document.select(&sel).any(|el| {
            el.value()
                .attr("content")
                .is_some_and(|c| !c.trim().is_empty())
        })
    });
    if has_description {
        score += 15.0;
    }

    if has_nonempty_text(document, "h1") {
        score += 15.0;
    }

    if word_count >= 300 {
        score += 20.0;
    } else if word_count >= 100 {
        score += 10.0;
    }

    if alt_text_ratio(document).is_some_and(|ratio| ratio >= 0.8) {
        score += 10.0;
    }

    if internal_links >= 3 {
        score += 10.0;
    }

    if exists(document, "meta[name=\"viewport\"]") {
        score += 10.0;
    }

    score.min(MAX_SCORE)
}

/// Scores basic accessibility signals
///
/// Images and inputs are scored by ratio (30 and 25 points), earning full
/// marks when absent. Landmark coverage earns up to 20, a single `<h1>` 15
/// (10 for several) and any focusable element 10.
pub fn accessibility_score(document: &Html) -> f64 {
    let mut score: f64 = 0.0;

    score += alt_text_ratio(document).unwrap_or(1.0) * 30.0;
    score += labeled_input_ratio(document).unwrap_or(1.0) * 25.0;

    let landmarks = SEMANTIC_TAGS
        .iter()
        .filter(|tag| exists(document, tag))
        .count();
    score += landmarks as f64 / SEMANTIC_TAGS.len() as f64 * 20.0;

    match count(document, "h1") {
        0 => {}
        1 => score += 15.0,
        _ => score += 10.0,
    }

    if exists(document, "a, button, input, select, textarea") {
        score += 10.0;
    }

    score.min(MAX_SCORE)
}

//! DOM extraction: content text, links, images, forms and calls to action

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::collections::{BTreeSet, HashSet};
use std::sync::OnceLock;
use url::Url;

use crate::model::{ContactInfo, ConversionElement, FormInfo, FormInput, ImageInfo};
use crate::url::{normalize_url, same_site};

/// Main-content containers, in priority order
const CONTENT_SELECTORS: &[&str] = &[
    "main",
    "article",
    "[role=\"main\"]",
    ".content",
    ".main-content",
    ".post-content",
    "#content",
    "#main",
    "#main-content",
];

const NAVIGATION_SELECTORS: &[&str] = &["nav", ".nav", ".navbar", ".navigation", ".menu", "#menu"];

const CONVERSION_SELECTORS: &[&str] = &[
    "button",
    ".btn",
    ".button",
    ".cta",
    "input[type=\"submit\"]",
    ".call-to-action",
];

/// Elements whose text never counts as page content
const HIDDEN_TAGS: &[&str] = &["script", "style", "noscript", "template"];

/// Links extracted from a page, split by host
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PageLinks {
    pub internal: Vec<String>,
    pub external: Vec<String>,
}

fn selector(css: &str) -> Option<Selector> {
    Selector::parse(css).ok()
}

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b")
            .expect("email regex is valid")
    })
}

fn phone_regex() -> &'static Regex {
    static PHONE: OnceLock<Regex> = OnceLock::new();
    PHONE.get_or_init(|| {
        Regex::new(r"(?:\+\d{1,3}[-.\s]?)?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}")
            .expect("phone regex is valid")
    })
}

/// Collapses runs of whitespace into single spaces and trims the ends
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Visible text under an element, skipping script-like containers
fn visible_text(root: ElementRef<'_>) -> String {
    let mut text = String::new();

    for node in root.descendants() {
        let Some(fragment) = node.value().as_text() else {
            continue;
        };

        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|element| HIDDEN_TAGS.contains(&element.name()))
        });

        if !hidden {
            text.push_str(fragment);
        }
    }

    collapse_whitespace(&text)
}

/// Extracts the main content text of a page
///
/// The first element matched by the content selectors wins. When none
/// matches, or the match holds no text, the whole document is used.
pub fn extract_main_content(document: &Html) -> String {
    let first_match = CONTENT_SELECTORS
        .iter()
        .filter_map(|css| selector(css))
        .find_map(|sel| document.select(&sel).next());

    if let Some(element) = first_match {
        let text = visible_text(element);
        if !text.is_empty() {
            return text;
        }
    }

    visible_text(document.root_element())
}

/// Returns the trimmed `<title>` text, or an empty string
pub fn extract_title(document: &Html) -> String {
    selector("title")
        .and_then(|sel| document.select(&sel).next())
        .map(|element| collapse_whitespace(&element.text().collect::<String>()))
        .unwrap_or_default()
}

/// Returns the meta description content, or an empty string
pub fn extract_description(document: &Html) -> String {
    selector("meta[name=\"description\"]")
        .and_then(|sel| {
            document
                .select(&sel)
                .find_map(|element| element.value().attr("content"))
                .map(|content| content.trim().to_string())
        })
        .unwrap_or_default()
}

/// Extracts anchor links and splits them into internal and external
///
/// Every href is resolved against `base_url` and normalized. Links on the
/// same host and port as `site_url` are internal; for a redirected page
/// `site_url` is the URL that was requested, not where it landed.
/// Duplicates are kept so link counts reflect the page as written.
pub fn extract_links(document: &Html, base_url: &Url, site_url: &Url) -> PageLinks {
    let mut links = PageLinks::default();

    let Some(anchor) = selector("a[href]") else {
        return links;
    };

    for element in document.select(&anchor) {
        if element.value().attr("download").is_some() {
            continue;
        }

        let Some(href) = element.value().attr("href") else {
            continue;
        };
        let Some(resolved) = resolve_link(href, base_url) else {
            continue;
        };
        let Ok(normalized) = normalize_url(resolved.as_str()) else {
            continue;
        };

        if same_site(&normalized, site_url) {
            links.internal.push(normalized.to_string());
        } else {
            links.external.push(normalized.to_string());
        }
    }

    links
}

/// Resolves an href to an absolute http(s) URL
///
/// Returns None for empty hrefs, same-page anchors, `javascript:`,
/// `mailto:`, `tel:` and `data:` links, and anything that does not resolve
/// to http or https.
pub fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let lowered = href.to_ascii_lowercase();
    if ["javascript:", "mailto:", "tel:", "data:"]
        .iter()
        .any(|scheme| lowered.starts_with(scheme))
    {
        return None;
    }

    let absolute = base_url.join(href).ok()?;
    match absolute.scheme() {
        "http" | "https" => Some(absolute),
        _ => None,
    }
}

/// Collects every `<img>` with a resolvable `src`
pub fn extract_images(document: &Html, base_url: &Url) -> Vec<ImageInfo> {
    let Some(img) = selector("img") else {
        return Vec::new();
    };

    document
        .select(&img)
        .filter_map(|element| {
            let attrs = element.value();
            let src = attrs.attr("src").map(str::trim).filter(|s| !s.is_empty())?;
            let src = base_url.join(src).ok()?;

            Some(ImageInfo {
                src: src.to_string(),
                alt: attrs.attr("alt").unwrap_or_default().to_string(),
                title: attrs.attr("title").unwrap_or_default().to_string(),
            })
        })
        .collect()
}

/// Describes every `<form>` and its input, textarea and select fields
pub fn extract_forms(document: &Html) -> Vec<FormInfo> {
    let (Some(form), Some(field)) = (selector("form"), selector("input, textarea, select")) else {
        return Vec::new();
    };

    document
        .select(&form)
        .map(|element| {
            let attrs = element.value();
            let inputs = element
                .select(&field)
                .map(|input| {
                    let input_attrs = input.value();
                    let default_type = match input_attrs.name() {
                        "textarea" => "textarea",
                        "select" => "select",
                        _ => "text",
                    };

                    FormInput {
                        input_type: input_attrs.attr("type").unwrap_or(default_type).to_string(),
                        name: input_attrs.attr("name").unwrap_or_default().to_string(),
                        placeholder: input_attrs
                            .attr("placeholder")
                            .unwrap_or_default()
                            .to_string(),
                        required: input_attrs.attr("required").is_some(),
                    }
                })
                .collect();

            FormInfo {
                action: attrs.attr("action").unwrap_or_default().to_string(),
                method: attrs.attr("method").unwrap_or("get").to_lowercase(),
                inputs,
            }
        })
        .collect()
}

/// Matches e-mail addresses and phone numbers in text
///
/// Both lists are deduplicated and sorted.
pub fn extract_contact_info(text: &str) -> ContactInfo {
    let emails: BTreeSet<String> = email_regex()
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect();

    let phones: BTreeSet<String> = phone_regex()
        .find_iter(text)
        .map(|m| m.as_str().trim().to_string())
        .collect();

    ContactInfo {
        emails: emails.into_iter().collect(),
        phones: phones.into_iter().collect(),
    }
}

/// Collects anchor labels inside navigation containers
///
/// Labels are deduplicated and kept in first-seen order.
pub fn extract_navigation(document: &Html) -> Vec<String> {
    let Some(anchor) = selector("a") else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let mut labels = Vec::new();

    for sel in NAVIGATION_SELECTORS.iter().filter_map(|css| selector(css)) {
        for container in document.select(&sel) {
            for link in container.select(&anchor) {
                let label = collapse_whitespace(&link.text().collect::<String>());
                if !label.is_empty() && seen.insert(label.clone()) {
                    labels.push(label);
                }
            }
        }
    }

    labels
}

/// Collects call-to-action elements
///
/// An element matched by several selectors is reported once. Submit inputs
/// are labeled by their `value`.
pub fn extract_conversion_elements(document: &Html) -> Vec<ConversionElement> {
    let mut seen = HashSet::new();
    let mut elements = Vec::new();

    for sel in CONVERSION_SELECTORS.iter().filter_map(|css| selector(css)) {
        for element in document.select(&sel) {
            if !seen.insert(element.id()) {
                continue;
            }

            let tag = element.value().name();
            let text = if tag == "input" {
                element.value().attr("value").unwrap_or_default().trim().to_string()
            } else {
                collapse_whitespace(&element.text().collect::<String>())
            };

            if text.is_empty() {
                continue;
            }

            elements.push(ConversionElement {
                kind: "button".to_string(),
                text,
                element: tag.to_string(),
            });
        }
    }

    elements
}

//! Record and model types shared by the analyzer, builder and query engine

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::model::roi::RoiMetrics;

/// Coarse classification of a page from its URL path
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageType {
    Product,
    About,
    Contact,
    Content,
    Service,
    Homepage,
    General,
}

impl PageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Product => "product",
            Self::About => "about",
            Self::Contact => "contact",
            Self::Content => "content",
            Self::Service => "service",
            Self::Homepage => "homepage",
            Self::General => "general",
        }
    }
}

impl fmt::Display for PageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the six fixed intent buckets
///
/// Declaration order is significant: it is the tie-break order when two
/// categories score the same for a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentCategory {
    ProductInquiry,
    Support,
    Navigation,
    Contact,
    Information,
    Conversion,
}

impl IntentCategory {
    /// All categories in declaration order
    pub const ALL: [IntentCategory; 6] = [
        Self::ProductInquiry,
        Self::Support,
        Self::Navigation,
        Self::Contact,
        Self::Information,
        Self::Conversion,
    ];

    /// Keyword list backing this category
    ///
    /// Keywords are matched as substrings of lowercased text, so multi-word
    /// phrases such as "how to" are allowed.
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            Self::ProductInquiry => &[
                "product",
                "service",
                "buy",
                "purchase",
                "price",
                "cost",
                "features",
                "specs",
                "specifications",
                "compare",
                "review",
                "demo",
            ],
            Self::Support => &[
                "help",
                "support",
                "problem",
                "issue",
                "error",
                "trouble",
                "fix",
                "how to",
                "tutorial",
                "guide",
                "faq",
                "documentation",
            ],
            Self::Navigation => &[
                "find",
                "where",
                "locate",
                "navigate",
                "search",
                "looking for",
                "page",
                "section",
                "menu",
                "link",
            ],
            Self::Contact => &[
                "contact",
                "phone",
                "email",
                "address",
                "location",
                "office",
                "support",
                "sales",
                "team",
                "representative",
            ],
            Self::Information => &[
                "about",
                "company",
                "history",
                "team",
                "mission",
                "vision",
                "values",
                "news",
                "blog",
                "resources",
            ],
            Self::Conversion => &[
                "sign up",
                "register",
                "subscribe",
                "download",
                "free trial",
                "get started",
                "book",
                "schedule",
                "appointment",
                "quote",
            ],
        }
    }

    /// Counts how many of this category's keywords occur in lowercased text
    pub fn keyword_hits(&self, lowered: &str) -> usize {
        self.keywords()
            .iter()
            .filter(|keyword| lowered.contains(*keyword))
            .count()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ProductInquiry => "product_inquiry",
            Self::Support => "support",
            Self::Navigation => "navigation",
            Self::Contact => "contact",
            Self::Information => "information",
            Self::Conversion => "conversion",
        }
    }
}

impl fmt::Display for IntentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Funnel position of a page or a query
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JourneyStage {
    Awareness,
    Consideration,
    Decision,
}

impl JourneyStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Awareness => "awareness",
            Self::Consideration => "consideration",
            Self::Decision => "decision",
        }
    }
}

impl fmt::Display for JourneyStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An image referenced by a page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageInfo {
    /// Absolute image URL
    pub src: String,
    pub alt: String,
    pub title: String,
}

/// One input, textarea or select inside a form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormInput {
    pub input_type: String,
    pub name: String,
    pub placeholder: String,
    pub required: bool,
}

/// A form found on a page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormInfo {
    pub action: String,
    /// Lowercased method, `get` when absent
    pub method: String,
    pub inputs: Vec<FormInput>,
}

/// Contact details matched in page text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub emails: Vec<String>,
    pub phones: Vec<String>,
}

impl ContactInfo {
    pub fn is_empty(&self) -> bool {
        self.emails.is_empty() && self.phones.is_empty()
    }
}

/// A call-to-action element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionElement {
    /// Element kind, currently always `button`
    pub kind: String,
    pub text: String,
    /// HTML tag name the element was found on
    pub element: String,
}

/// Structured analysis result for one crawled page
///
/// Produced once per URL during a crawl and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRecord {
    /// Normalized URL, unique within one crawl
    pub url: String,
    pub title: String,
    pub description: String,
    /// Whitespace-normalized main content text
    pub raw_content: String,
    pub word_count: usize,
    /// Flesch reading ease
    pub reading_level: f64,
    pub sentiment_score: f64,
    /// Highest-weight first
    pub keywords: Vec<String>,
    pub internal_links: Vec<String>,
    pub external_links: Vec<String>,
    pub images: Vec<ImageInfo>,
    pub forms: Vec<FormInfo>,
    pub contact_info: ContactInfo,
    pub navigation_labels: Vec<String>,
    pub conversion_elements: Vec<ConversionElement>,
    pub page_type: PageType,
    pub intent_categories: BTreeSet<IntentCategory>,
    pub journey_stage: JourneyStage,
    pub seo_score: f64,
    pub accessibility_score: f64,
    pub content_hash: String,
    /// Link depth from the site root at which the page was discovered
    pub depth: u32,
    pub last_crawled: DateTime<Utc>,
}

/// Aggregate output of one crawl
///
/// Every URL referenced by a map or funnel is the `url` of an entry in
/// `pages`. A new crawl produces a new model that replaces the old one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteModel {
    pub domain: String,
    pub total_pages: usize,
    /// Parent path -> child URLs
    pub page_hierarchy: BTreeMap<String, Vec<String>>,
    /// URL -> linked URLs that are themselves in the model
    pub navigation_paths: BTreeMap<String, Vec<String>>,
    /// awareness -> consideration -> decision URL triples
    pub conversion_funnels: Vec<[String; 3]>,
    pub content_categories: BTreeMap<String, Vec<String>>,
    pub intent_map: BTreeMap<IntentCategory, Vec<String>>,
    pub journey_flows: BTreeMap<String, Vec<String>>,
    pub crawl_depth: u32,
    pub last_full_crawl: DateTime<Utc>,
    pub roi_metrics: RoiMetrics,
    /// Page records in discovery order
    pub pages: Vec<PageRecord>,
}

impl SiteModel {
    /// Looks up a page by its normalized URL
    pub fn page(&self, url: &str) -> Option<&PageRecord> {
        self.pages.iter().find(|page| page.url == url)
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

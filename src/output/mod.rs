//! Output module for site model reports
//!
//! Renders a stored [`SiteModel`](crate::model::SiteModel) as a markdown ROI
//! report: headline metrics, intent coverage, journey flows, conversion
//! funnels and the strongest and weakest pages.

mod markdown;

pub use markdown::{format_markdown_report, write_markdown_report, TOP_PAGES};

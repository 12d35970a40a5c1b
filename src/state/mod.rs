//! State module for tracking crawl progress
//!
//! A crawl session moves through a small, forward-only state machine. The
//! coordinator owns the current state and rejects illegal transitions.

mod crawl_state;

pub use crawl_state::CrawlState;

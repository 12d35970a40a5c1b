/// Crawl session state definitions
///
/// A session starts idle, runs exactly once and then stays completed.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{IntelError, Result};

/// Lifecycle of a single crawl session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrawlState {
    /// Created, frontier not yet seeded
    Idle,

    /// Frontier seeded, pages being fetched
    Running,

    /// Frontier exhausted, page cap reached or cancelled
    Completed,
}

impl CrawlState {
    /// Returns true if no further transitions are possible
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed)
    }

    /// Returns true if `next` is a legal successor of this state
    pub fn can_transition_to(&self, next: CrawlState) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::Running) | (Self::Running, Self::Completed)
        )
    }

    /// Moves to `next`, rejecting anything but `Idle -> Running -> Completed`
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlState)` - The new state
    /// * `Err(IntelError::InvalidTransition)` - The transition is not allowed
    pub fn transition_to(&mut self, next: CrawlState) -> Result<CrawlState> {
        if !self.can_transition_to(next) {
            return Err(IntelError::InvalidTransition {
                from: *self,
                to: next,
            });
        }

        *self = next;
        Ok(next)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Completed => "completed",
        }
    }
}

impl Default for CrawlState {
    fn default() -> Self {
        Self::Idle
    }
}

impl fmt::Display for CrawlState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

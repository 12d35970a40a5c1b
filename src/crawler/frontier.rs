//! Crawl frontier
//!
//! A FIFO queue of `(url, depth)` pairs plus the visited and queued sets. It
//! is owned by the coordinator alone, so none of it needs synchronization.

use std::collections::{HashSet, VecDeque};
use url::Url;

/// A URL waiting to be fetched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueuedUrl {
    /// Normalized URL
    pub url: Url,

    /// Link distance from the seed
    pub depth: u32,
}

/// Breadth-first frontier with dedup before fetch
#[derive(Debug)]
pub struct Frontier {
    queue: VecDeque<QueuedUrl>,
    queued: HashSet<String>,
    visited: HashSet<String>,
    max_depth: u32,
}

impl Frontier {
    /// Creates a frontier seeded with `seed` at depth 0
    pub fn new(seed: Url, max_depth: u32) -> Self {
        let mut frontier = Self {
            queue: VecDeque::new(),
            queued: HashSet::new(),
            visited: HashSet::new(),
            max_depth,
        };
        frontier.push(seed, 0);
        frontier
    }

    /// Enqueues a URL unless it was already visited or queued
    ///
    /// # Returns
    ///
    /// `true` if the URL was added
    pub fn push(&mut self, url: Url, depth: u32) -> bool {
        let key = url.as_str();
        if self.visited.contains(key) || self.queued.contains(key) {
            return false;
        }

        self.queued.insert(key.to_string());
        self.queue.push_back(QueuedUrl { url, depth });
        true
    }

    /// Pops the next fetchable URL in FIFO order and marks it visited
    ///
    /// Entries that were visited meanwhile, or lie beyond the depth limit,
    /// are dropped.
    pub fn pop(&mut self) -> Option<QueuedUrl> {
        while let Some(next) = self.queue.pop_front() {
            let key = next.url.as_str();
            self.queued.remove(key);

            if next.depth > self.max_depth {
                tracing::trace!("Skipping {} beyond max depth {}", key, self.max_depth);
                continue;
            }

            if !self.visited.insert(key.to_string()) {
                continue;
            }

            return Some(next);
        }

        None
    }

    /// Returns true if `depth` still allows following links
    pub fn can_expand(&self, depth: u32) -> bool {
        depth < self.max_depth
    }

    pub fn is_visited(&self, url: &Url) -> bool {
        self.visited.contains(url.as_str())
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(path: &str) -> Url {
        Url::parse(&format!("https://example.com{}", path)).unwrap()
    }

    #[test]
    fn test_seeded_with_root() {
        let mut frontier = Frontier::new(url("/"), 2);
        assert_eq!(frontier.len(), 1);

        let first = frontier.pop().unwrap();
        assert_eq!(first.url, url("/"));
        assert_eq!(first.depth, 0);
        assert!(frontier.is_empty());
        assert!(frontier.is_visited(&url("/")));
    }

    #[test]
    fn test_fifo_order() {
        let mut frontier = Frontier::new(url("/"), 3);
        frontier.pop();
        frontier.push(url("/a"), 1);
        frontier.push(url("/b"), 1);
        frontier.push(url("/c"), 2);

        let order: Vec<_> = std::iter::from_fn(|| frontier.pop())
            .map(|q| q.url.path().to_string())
            .collect();
        assert_eq!(order, vec!["/a", "/b", "/c"]);
    }

    #[test]
    fn test_dedup_queued_and_visited() {
        let mut frontier = Frontier::new(url("/"), 3);
        assert!(!frontier.push(url("/"), 1));

        frontier.pop();
        assert!(!frontier.push(url("/"), 1));

        assert!(frontier.push(url("/a"), 1));
        assert!(!frontier.push(url("/a"), 2));
        assert_eq!(frontier.len(), 1);
    }

    #[test]
    fn test_depth_limit() {
        let mut frontier = Frontier::new(url("/"), 1);
        frontier.pop();
        frontier.push(url("/deep"), 2);
        frontier.push(url("/ok"), 1);

        let next = frontier.pop().unwrap();
        assert_eq!(next.url, url("/ok"));
        assert!(frontier.pop().is_none());
        assert!(!frontier.is_visited(&url("/deep")));
    }

    #[test]
    fn test_can_expand() {
        let frontier = Frontier::new(url("/"), 2);
        assert!(frontier.can_expand(0));
        assert!(frontier.can_expand(1));
        assert!(!frontier.can_expand(2));
    }

    #[test]
    fn test_visited_count() {
        let mut frontier = Frontier::new(url("/"), 2);
        frontier.push(url("/a"), 1);
        frontier.pop();
        frontier.pop();
        assert_eq!(frontier.visited_count(), 2);
    }
}

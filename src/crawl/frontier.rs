// src/crawl/frontier.rs
// =============================================================================
// The frontier: URLs discovered but not visited yet.
//
// The crawl loop only needs enqueue / dequeue / len, so that is the whole
// Frontier trait. Other orderings (priority, dedup, on-disk) can be swapped
// in without touching the loop.
//
// FifoFrontier is the default: a VecDeque where insertion order is visiting
// order. It does NOT deduplicate; the same URL may sit in the queue several
// times and is filtered later by the index check.
// =============================================================================

use crate::error::FrontierError;
use std::collections::VecDeque;
use url::Url;

pub trait Frontier: Send {
    /// Appends `url` to the tail. Never rejects.
    fn enqueue(&mut self, url: Url);

    /// Removes and returns the head.
    fn dequeue(&mut self) -> Result<Url, FrontierError>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Default)]
pub struct FifoFrontier {
    queue: VecDeque<Url>,
}

impl FifoFrontier {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Frontier for FifoFrontier {
    fn enqueue(&mut self, url: Url) {
        self.queue.push_back(url);
    }

    fn dequeue(&mut self) -> Result<Url, FrontierError> {
        self.queue.pop_front().ok_or(FrontierError::Empty)
    }

    fn len(&self) -> usize {
        self.queue.len()
    }
}

//! Ordering of overlapping fetches.

use std::sync::atomic::{AtomicU64, Ordering};

/// Sequence number handed out for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

/// Stamps requests with a monotonic sequence number so that only the
/// completion of the most recently issued request is applied.
///
/// A response whose ticket is no longer current is stale: a newer request
/// was issued after it and will overwrite the view when it lands.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    latest: AtomicU64,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a ticket newer than every ticket issued before.
    pub fn issue(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::AcqRel) + 1)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.load(Ordering::Acquire) == ticket.0
    }
}

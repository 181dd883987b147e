//! Stale-response gate.
//!
//! List views tag every fetch with a monotonic sequence number and apply a
//! response only while its tag is still the latest issued. Without this,
//! rapid filter changes could let an older in-flight response overwrite a
//! newer one; requests are never cancelled, their results are just dropped.

use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct RequestSeq {
    issued: AtomicU64,
}

impl RequestSeq {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tags a new request, superseding every earlier one.
    pub fn issue(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Whether a response carrying `tag` may still be applied.
    pub fn is_current(&self, tag: u64) -> bool {
        self.issued.load(Ordering::Relaxed) == tag
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_issued_tag_wins() {
        let seq = RequestSeq::new();
        let first = seq.issue();
        let second = seq.issue();

        // The older response resolves late and must be discarded.
        assert!(!seq.is_current(first));
        assert!(seq.is_current(second));
    }

    #[test]
    fn a_single_outstanding_request_is_current() {
        let seq = RequestSeq::new();
        let tag = seq.issue();
        assert!(seq.is_current(tag));
    }

    #[test]
    fn tags_are_strictly_increasing() {
        let seq = RequestSeq::new();
        let a = seq.issue();
        let b = seq.issue();
        let c = seq.issue();
        assert!(a < b && b < c);
    }
}

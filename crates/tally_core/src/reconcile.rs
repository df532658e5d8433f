/// Outcome of comparing a proposed count against the stored one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileDecision {
    /// Store the proposed count. Equal counts are accepted as well, so a
    /// repeated submission is an idempotent overwrite.
    Store,
    /// The proposed count is lower than what is already stored.
    Reject { previous: u64 },
}

/// The non-decreasing write rule.
///
/// Counts arrive from many independent browser sessions, asynchronously and
/// out of order. Accepting only values that are not smaller than the stored
/// one keeps the stored count monotonic without any locking: a stale,
/// smaller reading is simply a no-op.
pub fn reconcile(previous: Option<u64>, proposed: u64) -> ReconcileDecision {
    match previous {
        Some(stored) if proposed < stored => ReconcileDecision::Reject { previous: stored },
        _ => ReconcileDecision::Store,
    }
}

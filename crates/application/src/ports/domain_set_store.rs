use ferrous_split_domain::DomainSet;
use std::sync::Arc;

/// Holder of the currently installed [`DomainSet`] snapshot.
///
/// Readers never observe a partially built set: `install` publishes a fully
/// constructed snapshot in one step.
pub trait DomainSetStore: Send + Sync {
    /// Membership test against the snapshot installed at call time.
    fn lookup(&self, name: &str) -> bool;

    /// Replaces the active snapshot.
    fn install(&self, set: DomainSet);

    /// The active snapshot itself, for callers that need several reads
    /// against one consistent view.
    fn snapshot(&self) -> Arc<DomainSet>;

    fn len(&self) -> usize {
        self.snapshot().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

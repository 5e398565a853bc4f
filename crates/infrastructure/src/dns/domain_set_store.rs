use arc_swap::ArcSwap;
use ferrous_split_application::ports::DomainSetStore;
use ferrous_split_domain::DomainSet;
use std::sync::Arc;

/// Lock-free snapshot holder.
///
/// Readers load the current `Arc<DomainSet>` and test membership against it;
/// `install` swaps the pointer. The previous snapshot is freed once the last
/// in-flight reader drops its guard.
pub struct SnapshotDomainSetStore {
    current: ArcSwap<DomainSet>,
}

impl SnapshotDomainSetStore {
    pub fn new() -> Self {
        Self::with_set(DomainSet::new())
    }

    pub fn with_set(set: DomainSet) -> Self {
        Self {
            current: ArcSwap::from_pointee(set),
        }
    }
}

impl Default for SnapshotDomainSetStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DomainSetStore for SnapshotDomainSetStore {
    #[inline]
    fn lookup(&self, name: &str) -> bool {
        self.current.load().contains(name)
    }

    fn install(&self, set: DomainSet) {
        self.current.store(Arc::new(set));
    }

    fn snapshot(&self) -> Arc<DomainSet> {
        self.current.load_full()
    }

    fn len(&self) -> usize {
        self.current.load().len()
    }
}

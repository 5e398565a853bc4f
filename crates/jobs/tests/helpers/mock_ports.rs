use async_trait::async_trait;
use ferrous_split_application::ports::{DomainListSource, DomainSetStore};
use ferrous_split_application::use_cases::ReloadDomainsUseCase;
use ferrous_split_domain::{DomainError, DomainSet};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};

pub struct MockDomainListSource {
    contents: Mutex<String>,
    should_fail: AtomicBool,
    reads: AtomicU64,
}

impl MockDomainListSource {
    pub fn new(contents: &str) -> Self {
        Self {
            contents: Mutex::new(contents.to_string()),
            should_fail: AtomicBool::new(false),
            reads: AtomicU64::new(0),
        }
    }

    pub fn set_contents(&self, contents: &str) {
        *self.contents.lock().unwrap() = contents.to_string();
    }

    pub fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::SeqCst);
    }

    pub fn read_count(&self) -> u64 {
        self.reads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DomainListSource for MockDomainListSource {
    async fn read_all(&self) -> Result<String, DomainError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::DomainListUnavailable(
                "mock source unavailable".to_string(),
            ));
        }
        Ok(self.contents.lock().unwrap().clone())
    }

    fn describe(&self) -> &str {
        "mock"
    }
}

#[derive(Default)]
pub struct InMemoryDomainSetStore {
    current: RwLock<Arc<DomainSet>>,
    installs: AtomicU64,
}

impl InMemoryDomainSetStore {
    pub fn install_count(&self) -> u64 {
        self.installs.load(Ordering::SeqCst)
    }
}

impl DomainSetStore for InMemoryDomainSetStore {
    fn lookup(&self, name: &str) -> bool {
        self.current.read().unwrap().contains(name)
    }

    fn install(&self, set: DomainSet) {
        self.installs.fetch_add(1, Ordering::SeqCst);
        *self.current.write().unwrap() = Arc::new(set);
    }

    fn snapshot(&self) -> Arc<DomainSet> {
        Arc::clone(&self.current.read().unwrap())
    }
}

pub fn make_reload(
    source: Arc<MockDomainListSource>,
    store: Arc<InMemoryDomainSetStore>,
) -> Arc<ReloadDomainsUseCase> {
    Arc::new(ReloadDomainsUseCase::new(source, store))
}

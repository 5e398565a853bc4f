#![allow(dead_code)]

use async_trait::async_trait;
use ferrous_split_application::ports::{
    DomainListSource, DomainSetStore, ResponseWriter, UpstreamTransport,
};
use ferrous_split_domain::{DomainError, DomainSet, UpstreamAddress};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};

// ============================================================================
// Mock DomainSetStore
// ============================================================================

pub struct MockDomainSetStore {
    current: RwLock<Arc<DomainSet>>,
    installs: AtomicU64,
    lookups: AtomicU64,
}

impl MockDomainSetStore {
    pub fn new() -> Self {
        Self::with_domains(&[])
    }

    pub fn with_domains(domains: &[&str]) -> Self {
        Self {
            current: RwLock::new(Arc::new(domains.iter().collect())),
            installs: AtomicU64::new(0),
            lookups: AtomicU64::new(0),
        }
    }

    pub fn install_count(&self) -> u64 {
        self.installs.load(Ordering::Relaxed)
    }

    pub fn lookup_count(&self) -> u64 {
        self.lookups.load(Ordering::Relaxed)
    }
}

impl DomainSetStore for MockDomainSetStore {
    fn lookup(&self, name: &str) -> bool {
        self.lookups.fetch_add(1, Ordering::Relaxed);
        self.current.read().unwrap().contains(name)
    }

    fn install(&self, set: DomainSet) {
        self.installs.fetch_add(1, Ordering::Relaxed);
        *self.current.write().unwrap() = Arc::new(set);
    }

    fn snapshot(&self) -> Arc<DomainSet> {
        Arc::clone(&self.current.read().unwrap())
    }
}

// ============================================================================
// Mock DomainListSource
// ============================================================================

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

    pub fn failing() -> Self {
        let source = Self::new("");
        source.set_should_fail(true);
        source
    }

    pub fn set_contents(&self, contents: &str) {
        *self.contents.lock().unwrap() = contents.to_string();
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::Relaxed);
    }

    pub fn read_count(&self) -> u64 {
        self.reads.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl DomainListSource for MockDomainListSource {
    async fn read_all(&self) -> Result<String, DomainError> {
        self.reads.fetch_add(1, Ordering::Relaxed);
        if self.should_fail.load(Ordering::Relaxed) {
            return Err(DomainError::DomainListUnavailable(
                "mock source unavailable".to_string(),
            ));
        }
        Ok(self.contents.lock().unwrap().clone())
    }

    fn describe(&self) -> &str {
        "mock://domains"
    }
}

// ============================================================================
// Mock UpstreamTransport
// ============================================================================

pub struct MockUpstreamTransport {
    replies: Mutex<HashMap<UpstreamAddress, Result<Vec<u8>, DomainError>>>,
    calls: Mutex<Vec<(UpstreamAddress, Vec<u8>)>>,
}

impl MockUpstreamTransport {
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn set_reply(&self, upstream: &str, reply: &[u8]) {
        self.replies
            .lock()
            .unwrap()
            .insert(upstream.parse().unwrap(), Ok(reply.to_vec()));
    }

    pub fn set_error(&self, upstream: &str, error: DomainError) {
        self.replies
            .lock()
            .unwrap()
            .insert(upstream.parse().unwrap(), Err(error));
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn called_upstreams(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(addr, _)| addr.to_string())
            .collect()
    }

    pub fn sent_messages(&self) -> Vec<Vec<u8>> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(_, msg)| msg.clone())
            .collect()
    }
}

#[async_trait]
impl UpstreamTransport for MockUpstreamTransport {
    async fn exchange(
        &self,
        message: &[u8],
        upstream: UpstreamAddress,
    ) -> Result<Vec<u8>, DomainError> {
        self.calls.lock().unwrap().push((upstream, message.to_vec()));
        match self.replies.lock().unwrap().get(&upstream) {
            Some(reply) => reply.clone(),
            None => Err(DomainError::UpstreamUnreachable(upstream.to_string())),
        }
    }

    fn protocol_name(&self) -> &'static str {
        "MOCK"
    }
}

// ============================================================================
// Recording ResponseWriter
// ============================================================================

#[derive(Default)]
pub struct RecordingWriter {
    pub replies: Vec<Vec<u8>>,
    pub attempts: usize,
}

impl RecordingWriter {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ResponseWriter for RecordingWriter {
    async fn write_reply(&mut self, reply: &[u8]) -> Result<(), DomainError> {
        self.attempts += 1;
        if !self.replies.is_empty() {
            return Err(DomainError::ReplyAlreadyWritten);
        }
        self.replies.push(reply.to_vec());
        Ok(())
    }

    fn has_written(&self) -> bool {
        !self.replies.is_empty()
    }
}

// ============================================================================
// Builders
// ============================================================================

pub const PRIMARY: &str = "202.58.203.196";
pub const SECONDARY: &str = "1.1.1.1";
pub const TERTIARY: &str = "8.8.8.8";

pub fn forwarder_config() -> ferrous_split_domain::ForwarderConfig {
    ferrous_split_domain::ForwarderConfig::parse(PRIMARY, &[SECONDARY, TERTIARY]).unwrap()
}

/// Minimal query bytes: 12-byte header with the given RCODE plus a marker.
pub fn raw_query(id: u16, rcode: u8) -> Vec<u8> {
    let mut msg = vec![0u8; 12];
    msg[0..2].copy_from_slice(&id.to_be_bytes());
    msg[2] = 0x01;
    msg[3] = rcode & 0x0f;
    msg[5] = 0x01;
    msg.extend_from_slice(b"\x07example\x03com\x00\x00\x01\x00\x01");
    msg
}

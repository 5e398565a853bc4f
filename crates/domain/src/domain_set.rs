use crate::fqdn::{is_normalized, normalize_fqdn};
use rustc_hash::FxHashSet;
use std::sync::Arc;

/// One immutable snapshot of the routed domain names.
///
/// Built completely before it is published; never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainSet {
    domains: FxHashSet<Arc<str>>,
}

impl DomainSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a newline-delimited domain list.
    ///
    /// Blank lines and `#` comment lines are skipped; every other line is
    /// normalized to FQDN form and deduplicated.
    pub fn parse(text: &str) -> Self {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .collect()
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        if is_normalized(name) {
            self.domains.contains(name)
        } else {
            self.domains.contains(normalize_fqdn(name).as_str())
        }
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for DomainSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let domains = iter
            .into_iter()
            .map(|name| Arc::from(normalize_fqdn(name.as_ref())))
            .collect();
        Self { domains }
    }
}

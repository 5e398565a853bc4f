//! Fully-qualified domain name normalization.
//!
//! Every key stored in a [`DomainSet`](crate::DomainSet) and every name looked
//! up against it goes through [`normalize_fqdn`], so membership is plain byte
//! equality on the normalized form.

/// Lowercases ASCII letters, trims surrounding whitespace and guarantees a
/// single trailing dot.
///
/// The empty string (or a string of only dots) normalizes to the root `"."`.
/// A trailing `\.` is part of the last label and is kept.
pub fn normalize_fqdn(name: &str) -> String {
    let name = name.trim();
    let mut end = name.trim_end_matches('.').len();
    if end < name.len() && ends_with_escape(&name[..end]) {
        end += 1;
    }
    let trimmed = &name[..end];
    let mut fqdn = String::with_capacity(trimmed.len() + 1);
    fqdn.push_str(trimmed);
    fqdn.make_ascii_lowercase();
    fqdn.push('.');
    fqdn
}

fn ends_with_escape(s: &str) -> bool {
    s.bytes().rev().take_while(|&b| b == b'\\').count() % 2 == 1
}

/// Cheap check used on the query hot path to skip re-normalizing names that
/// already arrive in canonical form.
#[inline]
pub fn is_normalized(name: &str) -> bool {
    name.ends_with('.')
        && !name.ends_with("..")
        && !name.chars().any(|c| c.is_ascii_uppercase() || c.is_whitespace())
}

//! Ferrous Split Infrastructure Layer
pub mod dns;
pub mod sources;

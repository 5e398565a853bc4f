//! Configuration module for Ferrous Split
//!
//! - `root`: main configuration and CLI overrides
//! - `server`: listener ports and binding
//! - `upstream`: primary/secondary resolvers and query timeout
//! - `reload`: domain list source and refresh interval
//! - `logging`: logging settings
//! - `errors`: configuration errors

pub mod errors;
pub mod logging;
pub mod reload;
pub mod root;
pub mod server;
pub mod upstream;

pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use reload::ReloadConfig;
pub use root::{CliOverrides, Config};
pub use server::ServerConfig;
pub use upstream::UpstreamConfig;

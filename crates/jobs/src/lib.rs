pub mod domain_reload;
pub mod runner;

pub use domain_reload::DomainReloadJob;
pub use runner::{join_jobs, JobRunner};

pub mod file;

pub use file::FileDomainListSource;

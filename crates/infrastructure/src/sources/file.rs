use async_trait::async_trait;
use ferrous_split_application::ports::DomainListSource;
use ferrous_split_domain::DomainError;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Domain list read from a local text file, one name per line.
pub struct FileDomainListSource {
    path: PathBuf,
    display: String,
}

impl FileDomainListSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let display = path.display().to_string();
        Self { path, display }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl DomainListSource for FileDomainListSource {
    async fn read_all(&self) -> Result<String, DomainError> {
        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| DomainError::DomainListUnavailable(format!("{}: {}", self.display, e)))?;

        debug!(path = %self.display, bytes = contents.len(), "Domain list read");
        Ok(contents)
    }

    fn describe(&self) -> &str {
        &self.display
    }
}

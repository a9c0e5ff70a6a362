use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;

use crate::{errors::IngestError, sources::FeedSource};

/// A feed stored on local disk.
pub struct FileFeed {
    path: PathBuf,
}

impl FileFeed {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl FeedSource for FileFeed {
    async fn fetch(&self) -> Result<String, IngestError> {
        debug!(path = %self.path.display(), "reading feed file");
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| IngestError::Io {
                path: self.path.clone(),
                source,
            })
    }

    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }
}

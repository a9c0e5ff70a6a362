use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::info;

use crate::{errors::IngestError, sources::FeedSource};

const TIMEOUT: Duration = Duration::from_secs(30);

/// A feed served over HTTP(S). The body is returned as-is.
pub struct HttpFeed {
    client: Client,
    url: String,
}

impl HttpFeed {
    pub fn new(url: impl Into<String>) -> Result<Self, IngestError> {
        let client = Client::builder().timeout(TIMEOUT).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl FeedSource for HttpFeed {
    async fn fetch(&self) -> Result<String, IngestError> {
        info!(url = %self.url, "fetching feed");
        let response = self.client.get(&self.url).send().await?;

        if !response.status().is_success() {
            return Err(IngestError::Status {
                url: self.url.clone(),
                status: response.status().as_u16(),
            });
        }
        Ok(response.text().await?)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

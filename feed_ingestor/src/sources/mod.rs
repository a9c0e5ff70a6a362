//! Feed source abstraction.
//!
//! A [`FeedSource`] yields the raw text of one CSV feed. Implementations cover
//! remote feeds over HTTP ([`HttpFeed`]) and local copies ([`FileFeed`]);
//! [`source_for`] picks one from a location string at runtime.
//!
//! # Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use feed_ingestor::{errors::IngestError, sources::FeedSource};
//!
//! struct Fixed;
//!
//! #[async_trait]
//! impl FeedSource for Fixed {
//!     async fn fetch(&self) -> Result<String, IngestError> {
//!         Ok("data,amostras\n".to_string())
//!     }
//!
//!     fn describe(&self) -> String {
//!         "fixed".into()
//!     }
//! }
//! ```

pub mod file;
pub mod http;

use async_trait::async_trait;

pub use file::FileFeed;
pub use http::HttpFeed;

use crate::errors::IngestError;

/// Daily case feed of the national data repository.
pub const CASES_URL: &str = "https://raw.githubusercontent.com/dssg-pt/covid19pt-data/master/data.csv";

/// Tested samples feed of the national data repository.
pub const SAMPLES_URL: &str = "https://raw.githubusercontent.com/dssg-pt/covid19pt-data/master/amostras.csv";

#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Fetch the complete feed body.
    async fn fetch(&self) -> Result<String, IngestError>;

    /// Human-readable location, for logs.
    fn describe(&self) -> String;
}

/// `http://` and `https://` locations become an [`HttpFeed`], anything else a
/// [`FileFeed`].
pub fn source_for(location: &str) -> Result<Box<dyn FeedSource>, IngestError> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Ok(Box::new(HttpFeed::new(location)?))
    } else {
        Ok(Box::new(FileFeed::new(location)))
    }
}

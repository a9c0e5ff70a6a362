pub mod cases;
pub mod samples;

pub use cases::{CaseFeedOptions, parse_case_feed, parse_case_feed_with};
pub use samples::parse_samples_feed;

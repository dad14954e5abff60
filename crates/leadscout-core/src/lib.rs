//! Lead discovery for manual sales outreach.
//!
//! Searches Reddit and Twitter/X for posts matching configured keyword
//! lists, normalizes every hit into a flat lead record, deduplicates by
//! canonical URL, ranks by engagement, and reports the results to the
//! console or a CSV file.

pub mod config;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod sources;
pub mod types;

pub use config::{ConfigError, RedditCredentials, TwitterCredentials};
pub use error::LeadError;
pub use sources::reddit::RedditClient;
pub use sources::twitter::TwitterClient;
pub use types::{Lead, RedditLead, RedditPlan, TwitterLead, TwitterPlan};

//! Lead records, ranking policy, and the production query plans.

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

/// Weight applied to likes in a tweet's engagement score.
pub const TWITTER_LIKE_WEIGHT: i64 = 1;

/// Weight applied to retweets in a tweet's engagement score.
pub const TWITTER_RETWEET_WEIGHT: i64 = 2;

/// Behavior shared by both lead record types: the deduplication key and the
/// ranking score.
pub trait Lead {
    /// Permanent link to the post. Two leads with the same canonical URL are
    /// the same lead.
    fn canonical_url(&self) -> &str;

    /// Engagement score used to rank leads, highest first.
    fn engagement(&self) -> i64;
}

/// One Reddit post worth a manual follow-up.
///
/// Field order is the CSV column order.
#[derive(Debug, Clone, Serialize)]
pub struct RedditLead {
    pub subreddit: String,
    pub title: String,
    pub author: String,
    pub url: String,
    pub score: i64,
    pub comments: i64,
    #[serde(serialize_with = "serialize_minute")]
    pub created: DateTime<Utc>,
    pub keyword: String,
}

impl Lead for RedditLead {
    fn canonical_url(&self) -> &str {
        &self.url
    }

    fn engagement(&self) -> i64 {
        self.score
    }
}

/// One tweet worth a manual follow-up.
///
/// Field order is the CSV column order.
#[derive(Debug, Clone, Serialize)]
pub struct TwitterLead {
    pub username: String,
    pub text: String,
    pub url: String,
    pub likes: i64,
    pub retweets: i64,
    pub replies: i64,
    #[serde(serialize_with = "serialize_minute_opt")]
    pub created: Option<DateTime<Utc>>,
    pub query: String,
}

impl Lead for TwitterLead {
    fn canonical_url(&self) -> &str {
        &self.url
    }

    fn engagement(&self) -> i64 {
        self.likes * TWITTER_LIKE_WEIGHT + self.retweets * TWITTER_RETWEET_WEIGHT
    }
}

/// Serialize a timestamp as `YYYY-MM-DD HH:MM` in UTC.
fn serialize_minute<S>(created: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&created.format("%Y-%m-%d %H:%M").to_string())
}

/// Serialize an optional timestamp as `YYYY-MM-DD HH:MM`, or an empty string
/// when absent.
fn serialize_minute_opt<S>(
    created: &Option<DateTime<Utc>>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match created {
        Some(timestamp) => serialize_minute(timestamp, serializer),
        None => serializer.serialize_str(""),
    }
}

/// Which subreddits and keywords to search, and how far back to look.
#[derive(Debug, Clone)]
pub struct RedditPlan {
    pub subreddits: Vec<String>,
    pub keywords: Vec<String>,
    /// Posts older than this many days are dropped.
    pub lookback_days: i64,
    /// Results requested per search call.
    pub page_limit: u32,
}

impl Default for RedditPlan {
    /// The production outreach plan: beginner-fitness subreddits crossed with
    /// app-intent keywords.
    fn default() -> Self {
        Self {
            subreddits: DEFAULT_SUBREDDITS.iter().map(ToString::to_string).collect(),
            keywords: DEFAULT_KEYWORDS.iter().map(ToString::to_string).collect(),
            lookback_days: 7,
            page_limit: 25,
        }
    }
}

/// Which free-text queries to run against recent tweet search.
#[derive(Debug, Clone)]
pub struct TwitterPlan {
    pub queries: Vec<String>,
    /// Results requested per search call.
    pub page_size: u32,
}

impl Default for TwitterPlan {
    fn default() -> Self {
        Self {
            queries: DEFAULT_QUERIES.iter().map(ToString::to_string).collect(),
            page_size: 15,
        }
    }
}

const DEFAULT_SUBREDDITS: &[&str] = &[
    "beginnerfitness",
    "fitness",
    "GYM",
    "homegym",
    "workout",
    "gainit",
    "loseit",
    "bodyweightfitness",
    "StartingStrength",
    "Stronglifts5x5",
];

const DEFAULT_KEYWORDS: &[&str] = &[
    "workout app",
    "fitness app",
    "gym app",
    "training app",
    "program app",
    "app recommendation",
    "app suggestions",
    "looking for app",
    "need an app",
    "best app",
    "free app",
    "beginner program",
    "workout program",
    "where to start",
    "just starting",
    "new to gym",
    "new to fitness",
    "getting started",
    "help me start",
    "workout plan",
    "training plan",
    "custom program",
    "personalized workout",
];

const DEFAULT_QUERIES: &[&str] = &[
    "looking for workout app",
    "need workout app",
    "best workout app",
    "gym app recommendation",
    "fitness app recommendation",
    "workout program help",
    "beginner gym help",
    "starting gym need help",
    "workout plan app",
    "free fitness app",
    "\"workout app\" -filter:links",
    "\"gym app\" beginner",
    "\"fitness app\" free",
    "need help workout routine",
    "custom workout program",
];

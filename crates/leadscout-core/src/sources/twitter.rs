//! Twitter API v2 recent-search client and the no-API search URL builder.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::Deserialize;

use crate::config::TwitterCredentials;
use crate::error::LeadError;
use crate::types::TwitterLead;

const DEFAULT_API_BASE: &str = "https://api.twitter.com";
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Hard cap the recent-search endpoint places on `max_results`.
const MAX_PAGE_SIZE: u32 = 100;

/// Appended to every query: original tweets only, English only.
const QUERY_SUFFIX: &str = "-is:retweet lang:en";

/// Characters of tweet text kept on a lead.
const TEXT_LIMIT: usize = 200;

/// Substitute username when the author expansion is missing an entry.
const UNKNOWN_AUTHOR: &str = "unknown";

/// Recent-search response envelope. `data` is absent entirely when nothing
/// matched.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub data: Vec<Tweet>,
    #[serde(default)]
    pub includes: Includes,
}

/// Expansion objects attached to a search response.
#[derive(Debug, Default, Deserialize)]
pub struct Includes {
    #[serde(default)]
    pub users: Vec<User>,
}

/// Raw tweet fields. Metrics and timestamps are optional; the normalizer
/// substitutes defaults.
#[derive(Debug, Deserialize)]
pub struct Tweet {
    pub id: String,
    #[serde(default)]
    pub text: String,
    pub author_id: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub public_metrics: Option<PublicMetrics>,
}

/// Engagement counters reported per tweet.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PublicMetrics {
    #[serde(default)]
    pub like_count: i64,
    #[serde(default)]
    pub retweet_count: i64,
    #[serde(default)]
    pub reply_count: i64,
}

/// An expanded author record.
#[derive(Debug, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
}

/// Twitter API client with bearer-token auth.
pub struct TwitterClient {
    client: reqwest::Client,
    bearer_token: String,
    api_base: String,
}

impl TwitterClient {
    /// Create a client against the production Twitter API.
    ///
    /// # Errors
    ///
    /// Returns [`LeadError::Twitter`] if the HTTP client cannot be built.
    pub fn new(credentials: &TwitterCredentials) -> Result<Self, LeadError> {
        Self::with_base_url(credentials, DEFAULT_API_BASE)
    }

    /// Create a client against a custom API base URL.
    ///
    /// # Errors
    ///
    /// Returns [`LeadError::Twitter`] if the HTTP client cannot be built.
    pub fn with_base_url(
        credentials: &TwitterCredentials,
        api_base: &str,
    ) -> Result<Self, LeadError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| LeadError::Twitter(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            bearer_token: credentials.bearer_token.clone(),
            api_base: api_base.trim_end_matches('/').to_string(),
        })
    }

    /// Search tweets from the last seven days matching `query`.
    ///
    /// The query is suffixed with filters that drop retweets and non-English
    /// tweets. Author records are expanded so usernames can be resolved, and
    /// `max_results` is capped at the endpoint limit of 100.
    ///
    /// # Errors
    ///
    /// Returns [`LeadError::Twitter`] on a non-2xx response and
    /// [`LeadError::Http`] on network failure. An unreadable body becomes
    /// [`LeadError::Deserialize`].
    pub async fn search_recent(
        &self,
        query: &str,
        max_results: u32,
    ) -> Result<SearchResponse, LeadError> {
        let endpoint = format!("{}/2/tweets/search/recent", self.api_base);
        let params: Vec<(&str, String)> = vec![
            ("query", format!("{query} {QUERY_SUFFIX}")),
            ("max_results", max_results.min(MAX_PAGE_SIZE).to_string()),
            (
                "tweet.fields",
                "created_at,public_metrics,author_id".to_string(),
            ),
            ("expansions", "author_id".to_string()),
            ("user.fields", "username".to_string()),
        ];

        let response = self
            .client
            .get(endpoint)
            .header("Authorization", format!("Bearer {}", self.bearer_token))
            .query(&params)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(LeadError::Twitter(format!(
                "recent search failed with status {}",
                response.status()
            )));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| LeadError::Deserialize {
            context: format!("recent search response for '{query}'"),
            source: e,
        })
    }
}

/// Build the web search URL for running a query manually in a browser,
/// newest results first.
pub fn search_url(query: &str) -> String {
    let encoded = utf8_percent_encode(query, NON_ALPHANUMERIC);
    format!("https://twitter.com/search?q={encoded}&src=typed_query&f=live")
}

/// Convert a search response into leads.
///
/// Authors are resolved through the user expansion; tweets whose author is
/// not in it get the username `"unknown"`. Text is cut to 200 characters
/// with newlines flattened to spaces, and missing metrics count as zero.
pub(crate) fn to_leads(response: &SearchResponse, query: &str) -> Vec<TwitterLead> {
    let users: HashMap<&str, &str> = response
        .includes
        .users
        .iter()
        .map(|user| (user.id.as_str(), user.username.as_str()))
        .collect();

    response
        .data
        .iter()
        .map(|tweet| {
            let username = tweet
                .author_id
                .as_deref()
                .and_then(|id| users.get(id).copied())
                .unwrap_or(UNKNOWN_AUTHOR);
            let metrics = tweet.public_metrics.unwrap_or_default();
            let text = tweet
                .text
                .chars()
                .take(TEXT_LIMIT)
                .collect::<String>()
                .replace('\n', " ");

            TwitterLead {
                username: username.to_string(),
                text,
                url: format!("https://twitter.com/{username}/status/{}", tweet.id),
                likes: metrics.like_count,
                retweets: metrics.retweet_count,
                replies: metrics.reply_count,
                created: tweet.created_at,
                query: query.to_string(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TwitterPlan;

    fn response_from_json(json: &str) -> SearchResponse {
        serde_json::from_str(json).expect("expected search response JSON to deserialize")
    }

    #[test]
    fn tweets_resolve_authors_through_the_expansion() {
        let response = response_from_json(
            r#"{
                "data": [
                    {
                        "id": "111",
                        "text": "anyone know a good workout app?",
                        "author_id": "u1",
                        "created_at": "2025-08-14T09:30:00.000Z",
                        "public_metrics": {
                            "like_count": 4,
                            "retweet_count": 1,
                            "reply_count": 2
                        }
                    },
                    {
                        "id": "222",
                        "text": "starting the gym next week",
                        "author_id": "u9",
                        "public_metrics": {
                            "like_count": 0,
                            "retweet_count": 0,
                            "reply_count": 0
                        }
                    }
                ],
                "includes": {
                    "users": [
                        {"id": "u1", "username": "gymcurious"}
                    ]
                }
            }"#,
        );

        let leads = to_leads(&response, "need workout app");

        assert_eq!(leads.len(), 2);
        assert_eq!(leads[0].username, "gymcurious");
        assert_eq!(leads[0].url, "https://twitter.com/gymcurious/status/111");
        assert_eq!(leads[0].likes, 4);
        assert_eq!(leads[0].retweets, 1);
        assert_eq!(leads[0].replies, 2);
        assert_eq!(leads[0].query, "need workout app");
        assert!(leads[0].created.is_some());

        assert_eq!(leads[1].username, "unknown");
        assert_eq!(leads[1].url, "https://twitter.com/unknown/status/222");
        assert!(leads[1].created.is_none());
    }

    #[test]
    fn absent_data_field_yields_no_leads() {
        let response = response_from_json(r#"{"meta": {"result_count": 0}}"#);

        assert!(to_leads(&response, "free fitness app").is_empty());
    }

    #[test]
    fn missing_metrics_count_as_zero() {
        let response = response_from_json(
            r#"{"data": [{"id": "333", "text": "gym help please", "author_id": "u2"}]}"#,
        );

        let leads = to_leads(&response, "beginner gym help");

        assert_eq!(leads[0].likes, 0);
        assert_eq!(leads[0].retweets, 0);
        assert_eq!(leads[0].replies, 0);
    }

    #[test]
    fn long_text_is_cut_at_a_character_boundary() {
        let text = "é".repeat(250);
        let response = response_from_json(&format!(
            r#"{{"data": [{{"id": "444", "text": "{text}", "author_id": "u3"}}]}}"#
        ));

        let leads = to_leads(&response, "workout program help");

        assert_eq!(leads[0].text.chars().count(), 200);
    }

    #[test]
    fn newlines_in_text_are_flattened() {
        let response = response_from_json(
            r#"{"data": [{"id": "555", "text": "line one\nline two", "author_id": "u4"}]}"#,
        );

        let leads = to_leads(&response, "workout plan app");

        assert_eq!(leads[0].text, "line one line two");
    }

    #[test]
    fn search_url_percent_encodes_the_query() {
        assert_eq!(
            search_url("looking for workout app"),
            "https://twitter.com/search?q=looking%20for%20workout%20app&src=typed_query&f=live"
        );
    }

    #[test]
    fn every_planned_query_gets_its_own_search_url() {
        let plan = TwitterPlan::default();
        let urls: std::collections::HashSet<String> =
            plan.queries.iter().map(|query| search_url(query)).collect();

        assert_eq!(urls.len(), plan.queries.len());
    }
}

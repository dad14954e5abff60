//! Reddit search client using the client-credentials OAuth flow.

use chrono::DateTime;
use serde::Deserialize;

use crate::config::RedditCredentials;
use crate::error::LeadError;
use crate::types::RedditLead;

const DEFAULT_AUTH_BASE: &str = "https://www.reddit.com";
const DEFAULT_API_BASE: &str = "https://oauth.reddit.com";
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Substitute author for posts whose account was deleted.
const DELETED_AUTHOR: &str = "[deleted]";

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    children: Vec<Post>,
}

/// One search result in a listing.
#[derive(Debug, Deserialize)]
pub struct Post {
    pub data: PostData,
}

/// Raw post fields as returned by the search endpoint. Every field is
/// optional; the normalizer substitutes defaults.
#[derive(Debug, Deserialize)]
pub struct PostData {
    pub title: Option<String>,
    pub author: Option<String>,
    pub permalink: Option<String>,
    pub score: Option<i64>,
    pub num_comments: Option<i64>,
    pub created_utc: Option<f64>,
}

/// Reddit API client holding a valid access token.
#[derive(Debug)]
pub struct RedditClient {
    client: reqwest::Client,
    token: String,
    user_agent: String,
    api_base: String,
}

impl RedditClient {
    /// Create a client against the production Reddit API, exchanging the
    /// credentials for an access token.
    ///
    /// # Errors
    ///
    /// Returns [`LeadError::Reddit`] if the HTTP client cannot be built or
    /// the token exchange is refused, and [`LeadError::Http`] on network
    /// failure. An unreadable token response becomes
    /// [`LeadError::Deserialize`].
    pub async fn new(credentials: &RedditCredentials) -> Result<Self, LeadError> {
        Self::with_base_urls(credentials, DEFAULT_AUTH_BASE, DEFAULT_API_BASE).await
    }

    /// Create a client against custom auth and API base URLs.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`RedditClient::new`].
    pub async fn with_base_urls(
        credentials: &RedditCredentials,
        auth_base: &str,
        api_base: &str,
    ) -> Result<Self, LeadError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| LeadError::Reddit(format!("failed to build HTTP client: {e}")))?;

        let token = Self::fetch_token(&client, credentials, auth_base).await?;

        Ok(Self {
            client,
            token,
            user_agent: credentials.user_agent.clone(),
            api_base: api_base.trim_end_matches('/').to_string(),
        })
    }

    async fn fetch_token(
        client: &reqwest::Client,
        credentials: &RedditCredentials,
        auth_base: &str,
    ) -> Result<String, LeadError> {
        let endpoint = format!("{}/api/v1/access_token", auth_base.trim_end_matches('/'));

        let response = client
            .post(endpoint)
            .header("User-Agent", &credentials.user_agent)
            .basic_auth(&credentials.client_id, Some(&credentials.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(LeadError::Reddit(format!(
                "token exchange failed with status {}",
                response.status()
            )));
        }

        let body = response.text().await?;
        let token: TokenResponse =
            serde_json::from_str(&body).map_err(|e| LeadError::Deserialize {
                context: "access token response".to_string(),
                source: e,
            })?;

        Ok(token.access_token)
    }

    /// Fetch one page of posts matching `keyword` in `subreddit`, newest
    /// first, restricted to roughly the last month. Callers apply the precise
    /// lookback cutoff.
    ///
    /// # Errors
    ///
    /// Returns [`LeadError::Reddit`] on a non-2xx response and
    /// [`LeadError::Http`] on network failure. An unreadable listing becomes
    /// [`LeadError::Deserialize`].
    pub async fn search_posts(
        &self,
        subreddit: &str,
        keyword: &str,
        limit: u32,
    ) -> Result<Vec<Post>, LeadError> {
        let endpoint = format!("{}/r/{subreddit}/search", self.api_base);
        let params: Vec<(&str, String)> = vec![
            ("q", keyword.to_string()),
            ("restrict_sr", "true".to_string()),
            ("sort", "new".to_string()),
            ("t", "month".to_string()),
            ("limit", limit.to_string()),
        ];

        let response = self
            .client
            .get(endpoint)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("User-Agent", &self.user_agent)
            .query(&params)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(LeadError::Reddit(format!(
                "search in r/{subreddit} failed with status {}",
                response.status()
            )));
        }

        let body = response.text().await?;
        let listing: Listing = serde_json::from_str(&body).map_err(|e| LeadError::Deserialize {
            context: format!("search listing for r/{subreddit}"),
            source: e,
        })?;

        Ok(listing.data.children)
    }
}

/// Convert one raw search result into a lead.
///
/// Returns `None` when the post has no permalink, since a lead without a
/// canonical URL cannot be deduplicated. Other missing fields get defaults:
/// `"[deleted]"` author, empty title, zero counters, epoch timestamp.
/// Newlines in titles are flattened to spaces so console and CSV rows stay
/// single-line.
pub(crate) fn to_lead(post: &Post, subreddit: &str, keyword: &str) -> Option<RedditLead> {
    let permalink = post.data.permalink.as_ref()?;

    let title = post
        .data
        .title
        .as_deref()
        .unwrap_or_default()
        .replace('\n', " ");

    #[allow(clippy::cast_possible_truncation)]
    let created_secs = post.data.created_utc.unwrap_or(0.0) as i64;
    let created = DateTime::from_timestamp(created_secs, 0).unwrap_or(DateTime::UNIX_EPOCH);

    Some(RedditLead {
        subreddit: subreddit.to_string(),
        title,
        author: post
            .data
            .author
            .clone()
            .unwrap_or_else(|| DELETED_AUTHOR.to_string()),
        url: format!("https://reddit.com{permalink}"),
        score: post.data.score.unwrap_or(0),
        comments: post.data.num_comments.unwrap_or(0),
        created,
        keyword: keyword.to_string(),
    })
}

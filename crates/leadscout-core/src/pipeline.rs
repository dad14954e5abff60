//! Sequential search execution, deduplication, and ranking.

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::sources::reddit::{to_lead, RedditClient};
use crate::sources::twitter::{to_leads, TwitterClient};
use crate::types::{Lead, RedditLead, TwitterLead};

/// Search one subreddit for every keyword and collect the matching leads.
///
/// Keywords are searched one at a time. A failed search is logged as a
/// warning and skipped so the remaining keywords still run. Posts created
/// before `cutoff` are dropped, and leads sharing a URL (the same post
/// matched by several keywords) collapse to the first occurrence.
pub async fn search_subreddit(
    client: &RedditClient,
    subreddit: &str,
    keywords: &[String],
    cutoff: DateTime<Utc>,
    page_limit: u32,
) -> Vec<RedditLead> {
    let mut leads = Vec::new();

    for keyword in keywords {
        match client.search_posts(subreddit, keyword, page_limit).await {
            Ok(posts) => {
                tracing::debug!(
                    subreddit,
                    keyword = keyword.as_str(),
                    count = posts.len(),
                    "collected posts"
                );
                leads.extend(
                    posts
                        .iter()
                        .filter_map(|post| to_lead(post, subreddit, keyword))
                        .filter(|lead| lead.created >= cutoff),
                );
            }
            Err(e) => {
                tracing::warn!(
                    subreddit,
                    keyword = keyword.as_str(),
                    error = %e,
                    "search failed, skipping keyword"
                );
            }
        }
    }

    dedupe_by_url(leads)
}

/// Run one recent-tweet search and normalize the results.
///
/// A failed search is logged as a warning and contributes no leads, leaving
/// the caller's other queries unaffected.
pub async fn search_recent_query(
    client: &TwitterClient,
    query: &str,
    page_size: u32,
) -> Vec<TwitterLead> {
    match client.search_recent(query, page_size).await {
        Ok(response) => {
            tracing::debug!(query, count = response.data.len(), "collected tweets");
            to_leads(&response, query)
        }
        Err(e) => {
            tracing::warn!(query, error = %e, "search failed, skipping query");
            Vec::new()
        }
    }
}

/// Drop leads whose canonical URL was already seen, keeping the first
/// occurrence of each and the relative order of survivors.
pub fn dedupe_by_url<L: Lead>(mut leads: Vec<L>) -> Vec<L> {
    let mut seen_urls: HashSet<String> = HashSet::new();
    leads.retain(|lead| seen_urls.insert(lead.canonical_url().to_string()));
    leads
}

/// Sort leads by engagement, highest first. The sort is stable, so leads
/// with equal scores keep their input order.
pub fn rank_by_engagement<L: Lead>(mut leads: Vec<L>) -> Vec<L> {
    leads.sort_by(|a, b| b.engagement().cmp(&a.engagement()));
    leads
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reddit_lead(url: &str, score: i64, keyword: &str) -> RedditLead {
        RedditLead {
            subreddit: "fitness".to_string(),
            title: "Looking for an app".to_string(),
            author: "poster".to_string(),
            url: url.to_string(),
            score,
            comments: 0,
            created: DateTime::UNIX_EPOCH,
            keyword: keyword.to_string(),
        }
    }

    #[test]
    fn dedupe_keeps_the_first_occurrence() {
        let leads = vec![
            reddit_lead("https://reddit.com/r/fitness/comments/a/", 5, "workout app"),
            reddit_lead("https://reddit.com/r/fitness/comments/b/", 9, "fitness app"),
            reddit_lead("https://reddit.com/r/fitness/comments/a/", 7, "gym app"),
        ];

        let deduped = dedupe_by_url(leads);

        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].keyword, "workout app");
        assert_eq!(deduped[1].keyword, "fitness app");
    }

    #[test]
    fn dedupe_preserves_the_order_of_survivors() {
        let leads = vec![
            reddit_lead("https://reddit.com/r/fitness/comments/a/", 1, "workout app"),
            reddit_lead("https://reddit.com/r/fitness/comments/b/", 2, "workout app"),
            reddit_lead("https://reddit.com/r/fitness/comments/c/", 3, "workout app"),
        ];

        let deduped = dedupe_by_url(leads);

        let urls: Vec<&str> = deduped.iter().map(Lead::canonical_url).collect();
        assert_eq!(
            urls,
            vec![
                "https://reddit.com/r/fitness/comments/a/",
                "https://reddit.com/r/fitness/comments/b/",
                "https://reddit.com/r/fitness/comments/c/",
            ]
        );
    }

    #[test]
    fn rank_orders_by_engagement_descending() {
        let leads = vec![
            reddit_lead("https://reddit.com/r/fitness/comments/a/", 3, "workout app"),
            reddit_lead("https://reddit.com/r/fitness/comments/b/", 40, "workout app"),
            reddit_lead("https://reddit.com/r/fitness/comments/c/", 12, "workout app"),
        ];

        let ranked = rank_by_engagement(leads);

        let scores: Vec<i64> = ranked.iter().map(Lead::engagement).collect();
        assert_eq!(scores, vec![40, 12, 3]);
    }

    #[test]
    fn rank_keeps_input_order_on_ties() {
        let leads = vec![
            reddit_lead("https://reddit.com/r/fitness/comments/a/", 7, "workout app"),
            reddit_lead("https://reddit.com/r/fitness/comments/b/", 7, "fitness app"),
            reddit_lead("https://reddit.com/r/fitness/comments/c/", 7, "gym app"),
        ];

        let ranked = rank_by_engagement(leads);

        let keywords: Vec<&str> = ranked.iter().map(|lead| lead.keyword.as_str()).collect();
        assert_eq!(keywords, vec!["workout app", "fitness app", "gym app"]);
    }
}

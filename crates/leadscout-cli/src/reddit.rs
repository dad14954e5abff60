//! The `reddit` subcommand: search fitness subreddits for outreach leads.

use std::path::PathBuf;

use chrono::{Duration, Utc};
use leadscout_core::pipeline::{dedupe_by_url, rank_by_engagement, search_subreddit};
use leadscout_core::report::{print_reddit_leads, write_reddit_csv_file};
use leadscout_core::{RedditClient, RedditCredentials, RedditPlan};

/// Search every planned subreddit for every planned keyword, then dedupe,
/// rank, and report.
///
/// Missing credentials print setup guidance before returning the error, so
/// the process still exits non-zero. Individual keyword failures are logged
/// and skipped inside the pipeline.
pub(crate) async fn run(days: i64, output: Option<PathBuf>) -> anyhow::Result<()> {
    let plan = RedditPlan {
        lookback_days: days,
        ..RedditPlan::default()
    };

    println!("Reddit Lead Finder");
    println!("{}", "=".repeat(40));
    println!("Looking back: {} days", plan.lookback_days);
    println!("Subreddits: {}", plan.subreddits.len());
    println!("Keywords: {}", plan.keywords.len());
    println!();

    let credentials = match RedditCredentials::from_env() {
        Ok(credentials) => credentials,
        Err(e) => {
            print_setup_help();
            return Err(e.into());
        }
    };
    let client = RedditClient::new(&credentials).await?;

    let cutoff = Utc::now() - Duration::days(plan.lookback_days);
    let mut all_leads = Vec::new();

    for subreddit in &plan.subreddits {
        println!("Searching r/{subreddit}...");
        let leads =
            search_subreddit(&client, subreddit, &plan.keywords, cutoff, plan.page_limit).await;
        println!("  Found {} posts", leads.len());
        all_leads.extend(leads);
    }

    let leads = rank_by_engagement(dedupe_by_url(all_leads));

    println!();
    println!("{}", "=".repeat(40));
    println!("Total leads found: {}", leads.len());
    println!();

    match output {
        Some(path) => {
            write_reddit_csv_file(&path, &leads)?;
            println!("Saved to: {}", path.display());
        }
        None => print_reddit_leads(&leads),
    }

    Ok(())
}

fn print_setup_help() {
    println!("Missing Reddit API credentials.");
    println!();
    println!("Set these environment variables:");
    println!("  export REDDIT_CLIENT_ID='your_client_id'");
    println!("  export REDDIT_CLIENT_SECRET='your_client_secret'");
    println!();
    println!("Get credentials at: https://www.reddit.com/prefs/apps");
    println!("  1. Click 'create another app'");
    println!("  2. Choose 'script' type");
    println!("  3. Set redirect URI to http://localhost:8080");
}

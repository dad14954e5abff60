//! The `twitter` subcommand: search recent tweets for outreach leads.

use std::path::PathBuf;

use leadscout_core::pipeline::{dedupe_by_url, rank_by_engagement, search_recent_query};
use leadscout_core::report::{print_twitter_leads, truncate_chars, write_twitter_csv_file};
use leadscout_core::sources::twitter::search_url;
use leadscout_core::{TwitterClient, TwitterCredentials, TwitterPlan};

/// Run every planned query against recent search, then dedupe, rank, and
/// report. With `--urls-only` or `--open` the API is bypassed entirely and
/// manual search URLs are printed (and opened) instead.
///
/// Missing credentials print setup guidance before returning the error, so
/// the process still exits non-zero. Individual query failures are logged
/// and skipped inside the pipeline.
pub(crate) async fn run(
    output: Option<PathBuf>,
    urls_only: bool,
    open_urls: bool,
) -> anyhow::Result<()> {
    let plan = TwitterPlan::default();

    println!("Twitter Lead Finder");
    println!("{}", "=".repeat(40));

    if urls_only || open_urls {
        print_search_urls(&plan.queries, open_urls);
        return Ok(());
    }

    println!("Queries: {}", plan.queries.len());
    println!();

    let credentials = match TwitterCredentials::from_env() {
        Ok(credentials) => credentials,
        Err(e) => {
            print_setup_help();
            return Err(e.into());
        }
    };
    let client = TwitterClient::new(&credentials)?;

    let mut all_leads = Vec::new();

    for query in &plan.queries {
        println!("Searching: {}...", truncate_chars(query, 40));
        let leads = search_recent_query(&client, query, plan.page_size).await;
        println!("  Found {} tweets", leads.len());
        all_leads.extend(leads);
    }

    let leads = rank_by_engagement(dedupe_by_url(all_leads));

    println!();
    println!("{}", "=".repeat(40));
    println!("Total unique leads: {}", leads.len());
    println!();

    match output {
        Some(path) => {
            write_twitter_csv_file(&path, &leads)?;
            println!("Saved to: {}", path.display());
        }
        None => print_twitter_leads(&leads),
    }

    Ok(())
}

/// Print one web search URL per planned query, optionally opening each in
/// the default browser.
fn print_search_urls(queries: &[String], open_urls: bool) {
    println!("Mode: URLs only (no API)");
    println!();

    for (i, query) in queries.iter().enumerate() {
        let url = search_url(query);
        println!("{}. {query}", i + 1);
        println!("   {url}");
        println!();

        if open_urls {
            if let Err(e) = open::that(&url) {
                tracing::warn!(url = url.as_str(), error = %e, "failed to open browser");
            }
        }
    }

    println!("Total: {} search URLs", queries.len());
    if !open_urls {
        println!();
        println!("Tip: Use --open to open all URLs in browser");
    }
}

fn print_setup_help() {
    println!("Missing Twitter API credentials.");
    println!();
    println!("Set this environment variable:");
    println!("  export TWITTER_BEARER_TOKEN='your_bearer_token'");
    println!();
    println!("Get credentials at: https://developer.twitter.com/en/portal/projects-and-apps");
    println!("  1. Create a project and app (free tier works)");
    println!("  2. Go to 'Keys and tokens' tab");
    println!("  3. Generate Bearer Token");
    println!();
    println!("Or use --urls-only mode to skip the API and just open search URLs");
}

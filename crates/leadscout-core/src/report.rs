//! Console and CSV reporters for ranked leads.

use std::fs::File;
use std::io;
use std::path::Path;

use crate::error::LeadError;
use crate::types::{RedditLead, TwitterLead};

/// Reddit leads shown on the console before the export trailer.
pub const REDDIT_CONSOLE_LIMIT: usize = 30;

/// Twitter leads shown on the console before the export trailer.
pub const TWITTER_CONSOLE_LIMIT: usize = 20;

const REDDIT_CSV_HEADER: [&str; 8] = [
    "subreddit",
    "title",
    "author",
    "url",
    "score",
    "comments",
    "created",
    "keyword",
];

const TWITTER_CSV_HEADER: [&str; 8] = [
    "username",
    "text",
    "url",
    "likes",
    "retweets",
    "replies",
    "created",
    "query",
];

/// Truncate a string to at most `max_chars` characters.
///
/// Counts characters rather than slicing bytes, so multibyte input never
/// splits a code point.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        text.chars().take(max_chars).collect()
    }
}

/// Print the top Reddit leads as a numbered console list, followed by an
/// export hint when more were found than fit on screen.
pub fn print_reddit_leads(leads: &[RedditLead]) {
    for (i, lead) in leads.iter().take(REDDIT_CONSOLE_LIMIT).enumerate() {
        println!(
            "{}. [{}] {}",
            i + 1,
            lead.subreddit,
            truncate_chars(&lead.title, 60)
        );
        println!(
            "   Score: {} | Comments: {} | Author: u/{}",
            lead.score, lead.comments, lead.author
        );
        println!("   {}", lead.url);
        println!();
    }

    if leads.len() > REDDIT_CONSOLE_LIMIT {
        println!(
            "... and {} more. Use --output leads.csv to export all.",
            leads.len() - REDDIT_CONSOLE_LIMIT
        );
    }
}

/// Print the top Twitter leads as a numbered console list, followed by an
/// export hint when more were found than fit on screen.
pub fn print_twitter_leads(leads: &[TwitterLead]) {
    for (i, lead) in leads.iter().take(TWITTER_CONSOLE_LIMIT).enumerate() {
        println!("{}. @{}", i + 1, lead.username);
        println!("   {}...", truncate_chars(&lead.text, 80));
        println!(
            "   Likes: {} | RTs: {} | {}",
            lead.likes, lead.retweets, lead.url
        );
        println!();
    }

    if leads.len() > TWITTER_CONSOLE_LIMIT {
        println!(
            "... and {} more. Use --output leads.csv to export all.",
            leads.len() - TWITTER_CONSOLE_LIMIT
        );
    }
}

/// Write every Reddit lead to `writer` as CSV, header row first.
///
/// # Errors
///
/// Returns [`LeadError::Csv`] on serialization failure and [`LeadError::Io`]
/// if the writer fails.
pub fn write_reddit_csv<W: io::Write>(writer: W, leads: &[RedditLead]) -> Result<(), LeadError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv_writer.write_record(REDDIT_CSV_HEADER)?;
    for lead in leads {
        csv_writer.serialize(lead)?;
    }
    csv_writer.flush()?;

    Ok(())
}

/// Write every Reddit lead to a new CSV file at `path`.
///
/// # Errors
///
/// Returns [`LeadError::Io`] if the file cannot be created, plus the failure
/// modes of [`write_reddit_csv`].
pub fn write_reddit_csv_file(path: &Path, leads: &[RedditLead]) -> Result<(), LeadError> {
    write_reddit_csv(File::create(path)?, leads)
}

/// Write every Twitter lead to `writer` as CSV, header row first.
///
/// # Errors
///
/// Returns [`LeadError::Csv`] on serialization failure and [`LeadError::Io`]
/// if the writer fails.
pub fn write_twitter_csv<W: io::Write>(writer: W, leads: &[TwitterLead]) -> Result<(), LeadError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv_writer.write_record(TWITTER_CSV_HEADER)?;
    for lead in leads {
        csv_writer.serialize(lead)?;
    }
    csv_writer.flush()?;

    Ok(())
}

/// Write every Twitter lead to a new CSV file at `path`.
///
/// # Errors
///
/// Returns [`LeadError::Io`] if the file cannot be created, plus the failure
/// modes of [`write_twitter_csv`].
pub fn write_twitter_csv_file(path: &Path, leads: &[TwitterLead]) -> Result<(), LeadError> {
    write_twitter_csv(File::create(path)?, leads)
}

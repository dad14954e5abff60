use thiserror::Error;

/// Errors returned by the search clients and reporters.
#[derive(Debug, Error)]
pub enum LeadError {
    /// Network-level failure from the underlying HTTP client.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The Reddit API rejected a request or refused to issue a token.
    #[error("Reddit API error: {0}")]
    Reddit(String),

    /// The Twitter API rejected a request.
    #[error("Twitter API error: {0}")]
    Twitter(String),

    /// A response body could not be decoded into the expected shape.
    #[error("failed to deserialize {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// CSV serialization failure during export.
    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    /// Filesystem failure while writing a report.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

//! Provider credentials loaded from the environment.

use thiserror::Error;

/// User-Agent sent with Reddit requests when `REDDIT_USER_AGENT` is unset.
pub const DEFAULT_REDDIT_USER_AGENT: &str = "leadscout/1.0";

/// Errors produced while loading credentials.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
}

/// Credentials for a Reddit script app, used in the client-credentials
/// OAuth flow.
#[derive(Debug, Clone)]
pub struct RedditCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub user_agent: String,
}

impl RedditCredentials {
    /// Load credentials from `REDDIT_CLIENT_ID`, `REDDIT_CLIENT_SECRET`, and
    /// the optional `REDDIT_USER_AGENT`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] if a required variable is unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key))
    }

    /// Build credentials using the provided environment lookup function,
    /// so tests can supply values without touching the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] if a required variable is unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Result<String, std::env::VarError>,
    {
        let require = |var: &str| -> Result<String, ConfigError> {
            lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
        };

        let client_id = require("REDDIT_CLIENT_ID")?;
        let client_secret = require("REDDIT_CLIENT_SECRET")?;
        let user_agent = lookup("REDDIT_USER_AGENT")
            .unwrap_or_else(|_| DEFAULT_REDDIT_USER_AGENT.to_string());

        Ok(Self {
            client_id,
            client_secret,
            user_agent,
        })
    }
}

/// Bearer token for the Twitter API v2.
#[derive(Debug, Clone)]
pub struct TwitterCredentials {
    pub bearer_token: String,
}

impl TwitterCredentials {
    /// Load the token from `TWITTER_BEARER_TOKEN`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] if the variable is unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key))
    }

    /// Build credentials using the provided environment lookup function.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] if the variable is unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Result<String, std::env::VarError>,
    {
        let bearer_token = lookup("TWITTER_BEARER_TOKEN")
            .map_err(|_| ConfigError::MissingEnvVar("TWITTER_BEARER_TOKEN".to_string()))?;

        Ok(Self { bearer_token })
    }
}

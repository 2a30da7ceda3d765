use thiserror::Error;

#[derive(Error, Debug)]
pub enum FreshetError {
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error("Cache error: {0}")]
    Cache(#[from] crate::cache::CacheError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Feed parsing error: {0}")]
    FeedParse(String),

    #[error("Malformed entry in {url}: missing {field}")]
    MalformedEntry { url: String, field: &'static str },

    #[error("Feed not found: {0}")]
    FeedNotFound(String),

    #[error("Invalid email address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("Email composition error: {0}")]
    Compose(#[from] lettre::error::Error),

    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

pub type Result<T> = std::result::Result<T, FreshetError>;

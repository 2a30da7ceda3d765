//! Typed run configuration.
//!
//! Loaded once per run from the YAML file named on the command line. The
//! schema is validated at load time: locators must parse as URLs, mail
//! addresses as mailboxes, and feed names must be unique, so lookups later
//! in the run cannot fail on malformed input.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use lettre::message::Mailbox;
use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use url::Url;

use crate::domain::FeedSource;

/// Top-level configuration document.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub smtp: MailConfig,
    #[serde(deserialize_with = "deserialize_feeds")]
    pub feeds: Vec<FeedSource>,
}

/// The `smtp:` section.
#[derive(Debug, Clone, Deserialize)]
pub struct MailConfig {
    pub host: String,
    pub port: u16,
    pub encryption: Encryption,
    pub username: String,
    pub password: String,
    pub from: String,
    pub to: String,
}

/// Encryption mode for the SMTP session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encryption {
    /// Plaintext for the whole session.
    None,
    /// Plaintext connect, then STARTTLS upgrade.
    Tls,
    /// Implicit TLS from the first byte.
    Ssl,
}

impl Config {
    /// Load and validate the configuration at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.smtp.validate()?;

        Ok(config)
    }
}

impl MailConfig {
    /// Both addresses must parse as RFC 5322 mailboxes; composition relies
    /// on this holding for every run that gets as far as building a message.
    fn validate(&self) -> Result<(), ConfigError> {
        self.from
            .parse::<Mailbox>()
            .map_err(|source| ConfigError::Address {
                field: "smtp.from",
                value: self.from.clone(),
                source,
            })?;
        self.to
            .parse::<Mailbox>()
            .map_err(|source| ConfigError::Address {
                field: "smtp.to",
                value: self.to.clone(),
                source,
            })?;
        Ok(())
    }
}

/// Per-feed section as written in the document.
#[derive(Debug, Deserialize)]
struct FeedSpec {
    title: String,
    urls: Vec<String>,
}

/// Deserialize the `feeds:` mapping into a `Vec` preserving document order,
/// rejecting duplicate names and unparsable locators.
fn deserialize_feeds<'de, D>(deserializer: D) -> Result<Vec<FeedSource>, D::Error>
where
    D: Deserializer<'de>,
{
    struct FeedsVisitor;

    impl<'de> Visitor<'de> for FeedsVisitor {
        type Value = Vec<FeedSource>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a mapping of feed name to {title, urls}")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut feeds: Vec<FeedSource> = Vec::new();

            while let Some((name, spec)) = map.next_entry::<String, FeedSpec>()? {
                if feeds.iter().any(|f| f.name == name) {
                    return Err(de::Error::custom(format!("duplicate feed name: {}", name)));
                }

                let mut urls = Vec::with_capacity(spec.urls.len());
                for raw in &spec.urls {
                    let url = Url::parse(raw).map_err(|e| {
                        de::Error::custom(format!(
                            "invalid url {:?} for feed {}: {}",
                            raw, name, e
                        ))
                    })?;
                    urls.push(url);
                }

                feeds.push(FeedSource {
                    name,
                    title: spec.title,
                    urls,
                });
            }

            Ok(feeds)
        }
    }

    deserializer.deserialize_map(FeedsVisitor)
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("Invalid {field} address {value:?}: {source}")]
    Address {
        field: &'static str,
        value: String,
        source: lettre::address::AddressError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
smtp:
  host: smtp.example.com
  port: 587
  encryption: tls
  username: bot@example.com
  password: hunter2
  from: Freshet <bot@example.com>
  to: team@example.com

feeds:
  issues:
    title: Issues
    urls:
      - https://gitlab.example.com/group/proj/-/issues.atom?feed_token=secret
  merge_requests:
    title: Merge requests
    urls:
      - https://gitlab.example.com/group/proj/-/merge_requests.atom
      - https://gitlab.example.com/group/other/-/merge_requests.atom
"#;

    fn parse(content: &str) -> Result<Config, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    #[test]
    fn test_parse_sample() {
        let config = parse(SAMPLE).unwrap();
        assert_eq!(config.smtp.host, "smtp.example.com");
        assert_eq!(config.smtp.port, 587);
        assert_eq!(config.smtp.encryption, Encryption::Tls);
        assert_eq!(config.feeds.len(), 2);
        assert_eq!(config.feeds[1].urls.len(), 2);
        config.smtp.validate().unwrap();
    }

    #[test]
    fn test_feeds_keep_document_order() {
        let config = parse(SAMPLE).unwrap();
        assert_eq!(config.feeds[0].name, "issues");
        assert_eq!(config.feeds[0].title, "Issues");
        assert_eq!(config.feeds[1].name, "merge_requests");
    }

    #[test]
    fn test_encryption_values() {
        for (raw, expected) in [
            ("none", Encryption::None),
            ("tls", Encryption::Tls),
            ("ssl", Encryption::Ssl),
        ] {
            let content = SAMPLE.replace("encryption: tls", &format!("encryption: {}", raw));
            assert_eq!(parse(&content).unwrap().smtp.encryption, expected);
        }
    }

    #[test]
    fn test_unknown_encryption_rejected() {
        let content = SAMPLE.replace("encryption: tls", "encryption: starttls");
        assert!(parse(&content).is_err());
    }

    #[test]
    fn test_invalid_url_rejected() {
        let content = SAMPLE.replace(
            "https://gitlab.example.com/group/proj/-/issues.atom?feed_token=secret",
            "not a url",
        );
        let err = parse(&content).unwrap_err().to_string();
        assert!(err.contains("invalid url"), "unexpected error: {}", err);
    }

    #[test]
    fn test_duplicate_feed_rejected() {
        // Either serde_yaml's own duplicate-key detection or the visitor's
        // check fires; both spell out "duplicate".
        let content = SAMPLE.replace("merge_requests:", "issues:");
        let err = parse(&content).unwrap_err().to_string();
        assert!(err.contains("duplicate"), "unexpected error: {}", err);
    }

    #[test]
    fn test_missing_smtp_section_rejected() {
        assert!(parse("feeds: {}").is_err());
    }

    #[test]
    fn test_invalid_address_rejected() {
        let content = SAMPLE.replace("to: team@example.com", "to: not an address");
        let config = parse(&content).unwrap();
        let err = config.smtp.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Address { field: "smtp.to", .. }));
    }

    #[test]
    fn test_empty_feeds_mapping_allowed() {
        let content = SAMPLE.split("feeds:").next().unwrap().to_string() + "feeds: {}";
        let config = parse(&content).unwrap();
        assert!(config.feeds.is_empty());
    }
}

use feed_rs::parser;
use html_escape::decode_html_entities;

use crate::app::{FreshetError, Result};
use crate::domain::FeedEntry;

/// Converts raw RSS/Atom bodies into [`FeedEntry`] values.
#[derive(Clone)]
pub struct Normalizer;

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Normalizer {
    pub fn new() -> Self {
        Self
    }

    /// Parse `body` and convert every entry, in document order.
    ///
    /// Each entry must carry a non-empty id, title, author, and link;
    /// anything less is a malformed feed and fails the run.
    pub fn normalize(&self, url: &str, body: &[u8]) -> Result<Vec<FeedEntry>> {
        let feed = parser::parse(body).map_err(|e| FreshetError::FeedParse(e.to_string()))?;

        feed.entries
            .into_iter()
            .map(|entry| {
                let id = require(url, "id", Some(entry.id).filter(|id| !id.is_empty()))?;
                let title = require(
                    url,
                    "title",
                    entry
                        .title
                        .map(|t| decode_html_entities(&t.content).to_string())
                        .filter(|title| !title.is_empty()),
                )?;
                // feed-rs substitutes "unknown" when an author has no usable name.
                let author = require(
                    url,
                    "author",
                    entry
                        .authors
                        .first()
                        .map(|a| a.name.clone())
                        .filter(|name| !name.is_empty() && name != "unknown"),
                )?;
                let link = require(
                    url,
                    "link",
                    entry
                        .links
                        .first()
                        .map(|l| l.href.clone())
                        .filter(|href| !href.is_empty()),
                )?;

                Ok(FeedEntry {
                    id,
                    title,
                    author,
                    url: link,
                })
            })
            .collect()
    }
}

fn require(url: &str, field: &'static str, value: Option<String>) -> Result<String> {
    value.ok_or_else(|| FreshetError::MalformedEntry {
        url: url.to_string(),
        field,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const ATOM_SAMPLE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>group / proj issues</title>
  <id>https://gitlab.example.com/group/proj/-/issues</id>
  <updated>2024-05-01T12:00:00Z</updated>
  <entry>
    <id>tag:gitlab.example.com,2024:Issue/101</id>
    <link href="https://gitlab.example.com/group/proj/-/issues/1"/>
    <title>Stabilize the frobnicator</title>
    <updated>2024-05-01T12:00:00Z</updated>
    <author>
      <name>Jane Doe</name>
    </author>
  </entry>
  <entry>
    <id>tag:gitlab.example.com,2024:Issue/102</id>
    <link href="https://gitlab.example.com/group/proj/-/issues/2"/>
    <title>Frobnicator panics on empty input</title>
    <updated>2024-05-02T08:30:00Z</updated>
    <author>
      <name>Sam Lee</name>
    </author>
  </entry>
</feed>"#;

    #[test]
    fn test_normalize_atom() {
        let entries = Normalizer::new()
            .normalize("https://gitlab.example.com/feed.atom", ATOM_SAMPLE.as_bytes())
            .unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].id, "tag:gitlab.example.com,2024:Issue/101");
        assert_eq!(entries[0].title, "Stabilize the frobnicator");
        assert_eq!(entries[0].author, "Jane Doe");
        assert_eq!(entries[0].url, "https://gitlab.example.com/group/proj/-/issues/1");
    }

    #[test]
    fn test_normalize_preserves_document_order() {
        let entries = Normalizer::new()
            .normalize("https://gitlab.example.com/feed.atom", ATOM_SAMPLE.as_bytes())
            .unwrap();

        let ids: Vec<_> = entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(
            ids,
            [
                "tag:gitlab.example.com,2024:Issue/101",
                "tag:gitlab.example.com,2024:Issue/102",
            ]
        );
    }

    #[test]
    fn test_double_encoded_title_is_decoded() {
        let body = ATOM_SAMPLE.replace(
            "<title>Stabilize the frobnicator</title>",
            "<title>Rock &amp;amp; Roll</title>",
        );
        let entries = Normalizer::new()
            .normalize("https://gitlab.example.com/feed.atom", body.as_bytes())
            .unwrap();

        assert_eq!(entries[0].title, "Rock & Roll");
    }

    #[test]
    fn test_missing_author_is_malformed() {
        let body = ATOM_SAMPLE.replace("<author>\n      <name>Jane Doe</name>\n    </author>", "");
        let err = Normalizer::new()
            .normalize("https://gitlab.example.com/feed.atom", body.as_bytes())
            .unwrap_err();

        assert!(matches!(
            err,
            FreshetError::MalformedEntry { field: "author", .. }
        ));
    }

    #[test]
    fn test_missing_title_is_malformed() {
        let body = ATOM_SAMPLE.replace("<title>Stabilize the frobnicator</title>", "");
        let err = Normalizer::new()
            .normalize("https://gitlab.example.com/feed.atom", body.as_bytes())
            .unwrap_err();

        assert!(matches!(
            err,
            FreshetError::MalformedEntry { field: "title", .. }
        ));
    }

    #[test]
    fn test_empty_title_is_malformed() {
        let body = ATOM_SAMPLE.replace(
            "<title>Stabilize the frobnicator</title>",
            "<title></title>",
        );
        let err = Normalizer::new()
            .normalize("https://gitlab.example.com/feed.atom", body.as_bytes())
            .unwrap_err();

        assert!(matches!(
            err,
            FreshetError::MalformedEntry { field: "title", .. }
        ));
    }

    #[test]
    fn test_blank_author_name_is_malformed() {
        // Parses as the "unknown" placeholder, which counts as missing.
        let body = ATOM_SAMPLE.replace("<name>Jane Doe</name>", "<name></name>");
        let err = Normalizer::new()
            .normalize("https://gitlab.example.com/feed.atom", body.as_bytes())
            .unwrap_err();

        assert!(matches!(
            err,
            FreshetError::MalformedEntry { field: "author", .. }
        ));
    }

    #[test]
    fn test_empty_link_href_is_malformed() {
        let body = ATOM_SAMPLE.replace(
            r#"<link href="https://gitlab.example.com/group/proj/-/issues/1"/>"#,
            r#"<link href=""/>"#,
        );
        let err = Normalizer::new()
            .normalize("https://gitlab.example.com/feed.atom", body.as_bytes())
            .unwrap_err();

        assert!(matches!(
            err,
            FreshetError::MalformedEntry { field: "link", .. }
        ));
    }

    #[test]
    fn test_unparsable_body_is_a_feed_parse_error() {
        let err = Normalizer::new()
            .normalize("https://gitlab.example.com/feed.atom", b"not a feed at all")
            .unwrap_err();

        assert!(matches!(err, FreshetError::FeedParse(_)));
    }
}

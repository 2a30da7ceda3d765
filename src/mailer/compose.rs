//! Builds the per-feed mail report.

use std::error::Error as StdError;
use std::fmt::Write;

use html_escape::{encode_double_quoted_attribute, encode_text};
use lettre::message::header::{ContentType, Header, HeaderName, HeaderValue};
use lettre::message::{Mailbox, MultiPart, SinglePart};
use lettre::Message;

use crate::app::Result;
use crate::config::MailConfig;
use crate::domain::FeedEntry;

/// `Auto-Submitted: auto-generated` (RFC 3834).
#[derive(Debug, Clone, Copy)]
struct AutoSubmitted;

impl Header for AutoSubmitted {
    fn name() -> HeaderName {
        HeaderName::new_from_ascii_str("Auto-Submitted")
    }

    fn parse(_s: &str) -> std::result::Result<Self, Box<dyn StdError + Send + Sync>> {
        Ok(Self)
    }

    fn display(&self) -> HeaderValue {
        HeaderValue::new(Self::name(), "auto-generated".to_string())
    }
}

/// `X-Auto-Response-Suppress: All`, the Exchange counterpart.
#[derive(Debug, Clone, Copy)]
struct XAutoResponseSuppress;

impl Header for XAutoResponseSuppress {
    fn name() -> HeaderName {
        HeaderName::new_from_ascii_str("X-Auto-Response-Suppress")
    }

    fn parse(_s: &str) -> std::result::Result<Self, Box<dyn StdError + Send + Sync>> {
        Ok(Self)
    }

    fn display(&self) -> HeaderValue {
        HeaderValue::new(Self::name(), "All".to_string())
    }
}

/// Builds the mail report for one feed.
///
/// The message is `multipart/alternative` with a plain list and an HTML list
/// of the entries, and is marked as automated so autoresponders stay quiet.
pub fn compose(feed_title: &str, config: &MailConfig, entries: &[FeedEntry]) -> Result<Message> {
    let from: Mailbox = config.from.parse()?;
    let to: Mailbox = config.to.parse()?;

    let message = Message::builder()
        .from(from.clone())
        .reply_to(from)
        .to(to)
        .subject(format!("[freshet] New entries for feed {}", feed_title))
        .header(AutoSubmitted)
        .header(XAutoResponseSuppress)
        .multipart(
            MultiPart::alternative()
                .singlepart(
                    SinglePart::builder()
                        .header(ContentType::TEXT_PLAIN)
                        .body(plain_report(feed_title, entries)),
                )
                .singlepart(
                    SinglePart::builder()
                        .header(ContentType::TEXT_HTML)
                        .body(html_report(feed_title, entries)),
                ),
        )?;

    Ok(message)
}

fn plain_report(feed_title: &str, entries: &[FeedEntry]) -> String {
    let mut text = format!("New entries for feed {}\n", feed_title);

    for entry in entries {
        let _ = writeln!(
            text,
            "- \"{}\" by {} ({})",
            entry.title, entry.author, entry.url
        );
    }

    text
}

fn html_report(feed_title: &str, entries: &[FeedEntry]) -> String {
    let mut html = String::from(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n\
         <meta content=\"text/html; charset=UTF-8\" http-equiv=\"Content-Type\" />\n\
         </head>\n<body>\n",
    );

    let _ = writeln!(
        html,
        "<p>New entries for feed {}</p>",
        encode_text(feed_title)
    );

    html.push_str("<ul>\n");
    for entry in entries {
        let _ = writeln!(
            html,
            "<li>\"<a href=\"{}\">{}</a>\" by {} ({})</li>",
            encode_double_quoted_attribute(&entry.url),
            encode_text(&entry.title),
            encode_text(&entry.author),
            encode_text(&entry.url)
        );
    }
    html.push_str("</ul>\n</body>\n</html>\n");

    html
}

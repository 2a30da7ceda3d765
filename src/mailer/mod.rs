//! Mail report composition and SMTP delivery.

pub mod compose;
pub mod smtp;

use async_trait::async_trait;
use lettre::Message;

use crate::app::Result;

pub use compose::compose;
pub use smtp::SmtpMailer;

/// Delivers a batch of composed mail reports.
#[async_trait]
pub trait Mailer {
    /// Send every message in order, aborting on the first failure.
    ///
    /// An empty batch returns without opening a connection.
    async fn send_all(&self, messages: Vec<Message>) -> Result<()>;
}

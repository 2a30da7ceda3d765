//! SMTP delivery via lettre.

use async_trait::async_trait;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use super::Mailer;
use crate::app::Result;
use crate::config::{Encryption, MailConfig};

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    host: String,
}

impl SmtpMailer {
    /// Builds the transport for the configured host, port and encryption.
    ///
    /// No connection is opened until the first send.
    pub fn new(config: &MailConfig) -> Result<Self> {
        let credentials = Credentials::new(config.username.clone(), config.password.clone());

        let builder = match config.encryption {
            Encryption::Ssl => AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)?,
            Encryption::Tls => {
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
            }
            Encryption::None => {
                AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
            }
        };

        let transport = builder.port(config.port).credentials(credentials).build();

        Ok(Self {
            transport,
            host: config.host.clone(),
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send_all(&self, messages: Vec<Message>) -> Result<()> {
        if messages.is_empty() {
            return Ok(());
        }

        let count = messages.len();
        for message in messages {
            self.transport.send(message).await?;
            tracing::debug!("Sent mail report via {}", self.host);
        }

        tracing::info!("Sent {} mail reports via {}", count, self.host);
        Ok(())
    }
}

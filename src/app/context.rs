use std::sync::Arc;

use crate::app::Result;
use crate::config::MailConfig;
use crate::fetcher::{Fetcher, HttpFetcher};
use crate::mailer::{Mailer, SmtpMailer};
use crate::normalizer::Normalizer;

/// Wires the I/O collaborators for a single run.
pub struct AppContext {
    pub fetcher: Arc<dyn Fetcher + Send + Sync>,
    pub mailer: Arc<dyn Mailer + Send + Sync>,
    pub normalizer: Normalizer,
}

impl AppContext {
    pub fn new(mail: &MailConfig) -> Result<Self> {
        let fetcher: Arc<dyn Fetcher + Send + Sync> = Arc::new(HttpFetcher::new());
        let mailer: Arc<dyn Mailer + Send + Sync> = Arc::new(SmtpMailer::new(mail)?);
        let normalizer = Normalizer::new();

        Ok(Self {
            fetcher,
            mailer,
            normalizer,
        })
    }
}

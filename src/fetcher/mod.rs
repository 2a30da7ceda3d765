pub mod http_fetcher;

use async_trait::async_trait;

use crate::app::Result;

pub use http_fetcher::HttpFetcher;

/// Retrieves the raw body of a single feed locator.
///
/// Every run fetches every locator in full; there is no conditional
/// request support and no retry. A failure aborts the whole run.
#[async_trait]
pub trait Fetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

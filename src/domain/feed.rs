use url::Url;

/// A configured feed: the unique cache key, a display title for mail
/// subjects, and the ordered locators polled each run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedSource {
    pub name: String,
    pub title: String,
    pub urls: Vec<Url>,
}

/// A single item from a feed, e.g. one issue or merge-request update.
///
/// `id` is the feed-supplied identifier and the sole identity used for
/// deduplication. Two fetches of the same logical entry with differing
/// titles still count as the same entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEntry {
    pub id: String,
    pub title: String,
    pub author: String,
    pub url: String,
}

pub mod entry;
pub mod feed;

pub use entry::FeedEntry;
pub use feed::FeedSource;

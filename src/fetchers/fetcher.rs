use crate::results::FetchedPage;
use std::future::Future;

/// Retrieves a page and reduces it to title, text and links
pub trait PageFetcher: Send + Sync {
    /// Fetch `url`.
    ///
    /// Never fails: a page that cannot be retrieved comes back as
    /// [`FetchedPage::failed`] after the failure has been logged.
    fn fetch(&self, url: &str) -> impl Future<Output = FetchedPage> + Send;
}

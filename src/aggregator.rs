use crate::config::BrochureConfig;
use crate::fetchers::PageFetcher;
use crate::filter::RelevanceFilter;
use crate::llm::ChatModel;
use crate::results::FetchedPage;
use crate::utils::truncate_chars;

/// Header of the landing-page section
pub const MAIN_PAGE_HEADER: &str = "--- MAIN LANDING PAGE CONTENT ---\n";

/// Labeled text gathered from the landing page and its relevant sub-pages
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    content: String,
    sources: Vec<String>,
}

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the landing page section
    pub fn push_main_page(&mut self, page: &FetchedPage) {
        self.content.push_str(MAIN_PAGE_HEADER);
        self.content.push_str(&page.clean_contents());
        self.sources.push(page.url.clone());
    }

    /// Add a sub-page section labeled with the upper-cased `kind`
    pub fn push_sub_page(&mut self, kind: &str, url: &str, page: &FetchedPage) {
        self.content.push_str(&format!(
            "\n\n--- {} CONTENT ({}) ---\n",
            kind.to_uppercase(),
            url
        ));
        self.content.push_str(&page.clean_contents());
        self.sources.push(url.to_string());
    }

    pub fn as_str(&self) -> &str {
        &self.content
    }

    /// URLs whose text made it into the corpus, in order
    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn char_count(&self) -> usize {
        self.content.chars().count()
    }

    /// The corpus cut to at most `max_chars` characters, keeping the head
    pub fn truncated(&self, max_chars: usize) -> &str {
        truncate_chars(&self.content, max_chars)
    }
}

/// Collects the landing page and every sub-page the relevance filter picks
pub struct ContentAggregator<'a, F, M> {
    fetcher: &'a F,
    filter: RelevanceFilter<'a, F, M>,
}

impl<'a, F: PageFetcher, M: ChatModel> ContentAggregator<'a, F, M> {
    pub fn new(fetcher: &'a F, model: &'a M, config: &BrochureConfig) -> Self {
        Self {
            fetcher,
            filter: RelevanceFilter::new(fetcher, model, config),
        }
    }

    /// Build the untruncated corpus for `main_url`
    ///
    /// Pages that fail or have no text are logged and skipped.
    pub async fn gather(&self, main_url: &str) -> Corpus {
        let mut corpus = Corpus::new();

        ::log::info!("Gathering content from the main page: {}", main_url);
        let main_page = self.fetcher.fetch(main_url).await;
        if main_page.has_text() {
            corpus.push_main_page(&main_page);
        } else {
            ::log::warn!(
                "Could not get content from the main page: {}. This might affect brochure quality.",
                main_url
            );
        }

        ::log::info!("Asking the relevance filter for sub-links of {}", main_url);
        let selection = self.filter.select_links(main_url).await;
        if selection.is_empty() {
            ::log::info!(
                "No additional relevant links found; the brochure will use the main page only"
            );
            return corpus;
        }

        ::log::info!(
            "Found {} additional relevant pages, fetching their content",
            selection.links().len()
        );
        for link in selection.links() {
            let url = link.url.trim();
            if url.is_empty() {
                ::log::info!("Skipping link with no valid URL: {:?}", link);
                continue;
            }

            ::log::info!("Fetching content for {}: {}", link.kind, url);
            let page = self.fetcher.fetch(url).await;
            if page.has_text() {
                corpus.push_sub_page(&link.kind, url, &page);
            } else {
                ::log::info!("No content retrieved for {}", url);
            }
        }

        corpus
    }
}

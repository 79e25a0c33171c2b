use crate::config::BrochureConfig;
use crate::fetchers::PageFetcher;
use crate::llm::{ChatModel, ChatRequest};
use crate::prompts::{LINK_FILTER_INSTRUCTIONS, link_request_message};
use crate::results::{FetchedPage, LinkSelection, RelevantLinks};

/// Asks the model which outbound links of a landing page belong in a brochure
///
/// The choice itself is left entirely to the model; the filter only checks
/// that the answer has the `{"links": [{"type", "url"}]}` shape.
pub struct RelevanceFilter<'a, F, M> {
    fetcher: &'a F,
    model: &'a M,
    temperature: f32,
}

impl<'a, F: PageFetcher, M: ChatModel> RelevanceFilter<'a, F, M> {
    pub fn new(fetcher: &'a F, model: &'a M, config: &BrochureConfig) -> Self {
        Self {
            fetcher,
            model,
            temperature: config.filter_temperature,
        }
    }

    /// Fetch `url` and classify its outbound links
    pub async fn select_links(&self, url: &str) -> LinkSelection {
        let page = self.fetcher.fetch(url).await;
        self.select_from_page(&page).await
    }

    /// Classify the outbound links of an already fetched page
    pub async fn select_from_page(&self, page: &FetchedPage) -> LinkSelection {
        if page.links.is_empty() {
            ::log::info!(
                "No links found or error occurred for {}. Skipping link filtering.",
                page.url
            );
            return LinkSelection::NoCandidates;
        }

        ::log::info!(
            "Asking the model to filter {} links from {}",
            page.links.len(),
            page.url
        );
        let request = ChatRequest::new(
            LINK_FILTER_INSTRUCTIONS,
            link_request_message(&page.url, &page.links),
            self.temperature,
        )
        .with_json_object();

        let answer = match self.model.complete(&request).await {
            Ok(answer) => answer,
            Err(e) => {
                ::log::warn!("Link filtering failed for {}: {}", page.url, e);
                return LinkSelection::Unavailable;
            }
        };

        match RelevantLinks::from_json(&answer) {
            Ok(relevant) => {
                ::log::debug!("Model selected {} links", relevant.links.len());
                LinkSelection::Selected(relevant.links)
            }
            Err(e) => {
                ::log::warn!("The model returned invalid JSON: {}. Error: {}", answer, e);
                LinkSelection::Unavailable
            }
        }
    }
}

//! In-crate fakes for the fetcher and model seams.

use crate::error::{BrochureError, Result};
use crate::fetchers::PageFetcher;
use crate::llm::{ChatModel, ChatRequest, DeltaStream};
use crate::results::FetchedPage;
use std::collections::HashMap;
use std::sync::Mutex;

/// Serves canned pages and records every requested URL
#[derive(Default)]
pub struct FakeFetcher {
    pages: HashMap<String, FetchedPage>,
    pub requested: Mutex<Vec<String>>,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: &str, title: &str, text: &str, links: &[&str]) -> Self {
        self.pages.insert(
            url.to_string(),
            FetchedPage::new(
                url.to_string(),
                title.to_string(),
                text.to_string(),
                links.iter().map(|l| l.to_string()).collect(),
            ),
        );
        self
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

impl PageFetcher for FakeFetcher {
    async fn fetch(&self, url: &str) -> FetchedPage {
        self.requested.lock().unwrap().push(url.to_string());
        self.pages
            .get(url)
            .cloned()
            .unwrap_or_else(|| FetchedPage::failed(url))
    }
}

/// What the fake model does when streamed
pub enum StreamScript {
    Deltas(Vec<Result<String>>),
    RejectRequest,
}

/// Answers `complete` with a canned string and `stream` with scripted deltas
pub struct FakeModel {
    answer: Option<String>,
    script: Mutex<Option<StreamScript>>,
    pub requests: Mutex<Vec<ChatRequest>>,
}

impl FakeModel {
    pub fn answering(answer: &str) -> Self {
        Self {
            answer: Some(answer.to_string()),
            script: Mutex::new(None),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            answer: None,
            script: Mutex::new(None),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn streaming(mut self, deltas: &[&str]) -> Self {
        self.script = Mutex::new(Some(StreamScript::Deltas(
            deltas.iter().map(|d| Ok(d.to_string())).collect(),
        )));
        self
    }

    pub fn streaming_results(mut self, deltas: Vec<Result<String>>) -> Self {
        self.script = Mutex::new(Some(StreamScript::Deltas(deltas)));
        self
    }

    pub fn rejecting_streams(mut self) -> Self {
        self.script = Mutex::new(Some(StreamScript::RejectRequest));
        self
    }

    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl ChatModel for FakeModel {
    async fn complete(&self, request: &ChatRequest) -> Result<String> {
        self.requests.lock().unwrap().push(request.clone());
        self.answer.clone().ok_or(BrochureError::EmptyResponse)
    }

    async fn stream(&self, request: &ChatRequest) -> Result<DeltaStream> {
        self.requests.lock().unwrap().push(request.clone());
        match self.script.lock().unwrap().take() {
            Some(StreamScript::Deltas(deltas)) => Ok(Box::pin(futures::stream::iter(deltas))),
            Some(StreamScript::RejectRequest) | None => Err(BrochureError::Api {
                status: 500,
                body: "scripted failure".into(),
            }),
        }
    }
}

use crate::aggregator::ContentAggregator;
use crate::config::BrochureConfig;
use crate::fetchers::PageFetcher;
use crate::llm::{ChatModel, ChatRequest, DeltaStream};
use crate::prompts::{brochure_instructions, brochure_request_preamble};
use crate::utils::strip_code_fences;
use futures::{Stream, StreamExt};

/// Where a brochure run currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Aggregating,
    Requesting,
    Streaming { fragments: usize },
    Completed,
    Failed,
}

impl RunState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunState::Completed | RunState::Failed)
    }
}

/// Output of a brochure run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrochureEvent {
    /// The cleaned draft after another fragment arrived
    Draft(String),

    /// The stream ended normally; carries the final document
    Completed(String),

    /// The request or the stream failed; `partial` is whatever was drafted
    Failed { partial: String, reason: String },
}

impl BrochureEvent {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, BrochureEvent::Draft(_))
    }

    /// Markdown carried by the event
    pub fn markdown(&self) -> &str {
        match self {
            BrochureEvent::Draft(text) | BrochureEvent::Completed(text) => text,
            BrochureEvent::Failed { partial, .. } => partial,
        }
    }
}

/// Writes a brochure from a company's website with the text-generation service
pub struct BrochureGenerator<'a, F, M> {
    fetcher: &'a F,
    model: &'a M,
    config: &'a BrochureConfig,
}

impl<'a, F: PageFetcher, M: ChatModel> BrochureGenerator<'a, F, M> {
    pub fn new(fetcher: &'a F, model: &'a M, config: &'a BrochureConfig) -> Self {
        Self {
            fetcher,
            model,
            config,
        }
    }

    /// User message with the company, its URL and the capped website content
    pub async fn prepare_request_message(&self, company_name: &str, main_url: &str) -> String {
        let mut message = brochure_request_preamble(company_name, main_url);

        let corpus = ContentAggregator::new(self.fetcher, self.model, self.config)
            .gather(main_url)
            .await;

        ::log::info!(
            "Collected {} characters from {} pages",
            corpus.char_count(),
            corpus.sources().len()
        );

        let max_chars = self.config.max_content_chars;
        if corpus.char_count() > max_chars {
            ::log::warn!(
                "Collected website content was {} characters and has been truncated to {}",
                corpus.char_count(),
                max_chars
            );
        }
        message.push_str(corpus.truncated(max_chars));
        message
    }

    /// Full streaming request for the brochure writer
    pub async fn build_request(&self, company_name: &str, main_url: &str) -> ChatRequest {
        let user = self.prepare_request_message(company_name, main_url).await;
        ChatRequest::new(
            brochure_instructions(self.config.tone),
            user,
            self.config.brochure_temperature,
        )
    }

    /// Start a run; nothing is fetched until the first event is pulled
    pub fn run(&self, company_name: &str, main_url: &str) -> BrochureRun<'a, F, M> {
        BrochureRun {
            generator: BrochureGenerator {
                fetcher: self.fetcher,
                model: self.model,
                config: self.config,
            },
            company_name: company_name.to_string(),
            main_url: main_url.to_string(),
            state: RunState::Idle,
            request: None,
            stream: None,
            draft: String::new(),
        }
    }
}

/// One brochure generation, pulled event by event
///
/// Each `Draft` carries the whole document so far. The run ends with exactly
/// one `Completed` or `Failed` event; after that it yields nothing. Dropping
/// the run abandons the underlying request.
pub struct BrochureRun<'a, F, M> {
    generator: BrochureGenerator<'a, F, M>,
    company_name: String,
    main_url: String,
    state: RunState,
    request: Option<ChatRequest>,
    stream: Option<DeltaStream>,
    draft: String,
}

impl<'a, F: PageFetcher, M: ChatModel> BrochureRun<'a, F, M> {
    pub fn state(&self) -> RunState {
        self.state
    }

    /// The cleaned document so far
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Advance the run to its next event
    pub async fn next_event(&mut self) -> Option<BrochureEvent> {
        loop {
            match self.state {
                RunState::Idle => {
                    ::log::info!(
                        "Generating brochure for {} from {}",
                        self.company_name,
                        self.main_url
                    );
                    self.state = RunState::Aggregating;
                }
                RunState::Aggregating => {
                    let request = self
                        .generator
                        .build_request(&self.company_name, &self.main_url)
                        .await;
                    self.request = Some(request);
                    self.state = RunState::Requesting;
                }
                RunState::Requesting => {
                    let Some(request) = self.request.take() else {
                        return Some(self.fail("no request was prepared".to_string()));
                    };
                    ::log::info!("Requesting brochure from the writer");
                    match self.generator.model.stream(&request).await {
                        Ok(stream) => {
                            self.stream = Some(stream);
                            self.state = RunState::Streaming { fragments: 0 };
                        }
                        Err(e) => return Some(self.fail(e.to_string())),
                    }
                }
                RunState::Streaming { fragments } => {
                    let Some(stream) = self.stream.as_mut() else {
                        return Some(self.fail("stream is gone".to_string()));
                    };
                    match stream.next().await {
                        Some(Ok(delta)) => {
                            self.draft.push_str(&delta);
                            self.draft = strip_code_fences(&self.draft);
                            self.state = RunState::Streaming {
                                fragments: fragments + 1,
                            };
                            return Some(BrochureEvent::Draft(self.draft.clone()));
                        }
                        Some(Err(e)) => return Some(self.fail(e.to_string())),
                        None => {
                            self.stream = None;
                            self.state = RunState::Completed;
                            ::log::info!("Brochure complete after {} fragments", fragments);
                            return Some(BrochureEvent::Completed(self.draft.clone()));
                        }
                    }
                }
                RunState::Completed | RunState::Failed => return None,
            }
        }
    }

    /// Drain the run and return its terminal event
    pub async fn finish(mut self) -> BrochureEvent {
        let mut last = None;
        while let Some(event) = self.next_event().await {
            last = Some(event);
        }
        last.unwrap_or_else(|| BrochureEvent::Failed {
            partial: self.draft.clone(),
            reason: "run had already finished".to_string(),
        })
    }

    /// Turn the run into a stream of events
    pub fn into_stream(self) -> impl Stream<Item = BrochureEvent> + 'a
    where
        F: 'a,
        M: 'a,
    {
        futures::stream::unfold(self, |mut run| async move {
            run.next_event().await.map(|event| (event, run))
        })
    }

    fn fail(&mut self, reason: String) -> BrochureEvent {
        ::log::error!("An error occurred during brochure generation: {}", reason);
        self.stream = None;
        self.state = RunState::Failed;
        BrochureEvent::Failed {
            partial: self.draft.clone(),
            reason,
        }
    }
}

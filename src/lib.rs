// Re-export modules
pub mod aggregator;
pub mod config;
pub mod error;
pub mod fetchers;
pub mod filter;
pub mod generator;
pub mod llm;
pub mod parsers;
pub mod prompts;
pub mod results;
pub mod utils;

#[cfg(test)]
mod testing;

// Re-export commonly used types for convenience
pub use config::{ApiCredential, BrochureConfig, BrochureTone, CredentialStatus};
pub use error::BrochureError;
pub use generator::{BrochureEvent, BrochureGenerator, BrochureRun, RunState};
pub use results::{FetchedPage, LinkClassification, LinkSelection, RelevantLinks};

use fetchers::WebFetcher;
use llm::OpenAiClient;

/// Main builder for brochure generation
pub struct Brochure {
    config: BrochureConfig,
    credential: Option<ApiCredential>,
}

impl Default for Brochure {
    fn default() -> Self {
        Self::new()
    }
}

impl Brochure {
    /// Create a builder with default configuration
    pub fn new() -> Self {
        Self {
            config: BrochureConfig::default(),
            credential: None,
        }
    }

    /// Apply a configuration
    pub fn with_config(mut self, config: BrochureConfig) -> Self {
        self.config = config;
        self
    }

    /// Load configuration from a JSON file
    pub fn with_config_file(
        mut self,
        path: impl AsRef<std::path::Path>,
    ) -> Result<Self, BrochureError> {
        self.config = BrochureConfig::from_file(path)?;
        Ok(self)
    }

    /// Load configuration from a JSON string
    pub fn with_config_str(mut self, json: &str) -> Result<Self, BrochureError> {
        self.config = BrochureConfig::from_json(json)?;
        Ok(self)
    }

    /// Use this key instead of reading `OPENAI_API_KEY`
    pub fn with_credential(mut self, credential: ApiCredential) -> Self {
        self.credential = Some(credential);
        self
    }

    /// Override the model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    /// Override the brochure tone
    pub fn with_tone(mut self, tone: BrochureTone) -> Self {
        self.config.tone = tone;
        self
    }

    /// Override the website content cap
    pub fn with_max_content_chars(mut self, max_chars: usize) -> Self {
        self.config.max_content_chars = max_chars;
        self
    }

    /// Build the fetcher and model client
    ///
    /// Reads the credential from the environment if none was given and warns
    /// when it is missing or malformed; it never fails because of it.
    pub fn build(self) -> Result<BrochureService, BrochureError> {
        self.config.validate()?;
        let credential = self.credential.unwrap_or_else(ApiCredential::from_env);
        credential.check();

        let fetcher = WebFetcher::new(&self.config)?;
        let model = OpenAiClient::from_config(credential, &self.config);

        Ok(BrochureService {
            fetcher,
            model,
            config: self.config,
        })
    }
}

/// Configured fetcher and model client; each run is independent
#[derive(Debug)]
pub struct BrochureService {
    fetcher: WebFetcher,
    model: OpenAiClient,
    config: BrochureConfig,
}

impl BrochureService {
    pub fn config(&self) -> &BrochureConfig {
        &self.config
    }

    pub fn generator(&self) -> BrochureGenerator<'_, WebFetcher, OpenAiClient> {
        BrochureGenerator::new(&self.fetcher, &self.model, &self.config)
    }

    /// Start a brochure run for one company
    pub fn run(
        &self,
        company_name: &str,
        main_url: &str,
    ) -> BrochureRun<'_, WebFetcher, OpenAiClient> {
        self.generator().run(company_name, main_url)
    }
}

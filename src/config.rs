use crate::error::{BrochureError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Environment variable holding the chat-completion API key
pub const API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Environment variable overriding the chat-completion base URL
pub const BASE_URL_VAR: &str = "OPENAI_BASE_URL";

/// Environment variable overriding the model name
pub const MODEL_VAR: &str = "BROCHURE_MODEL";

/// Voice used by the brochure writer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrochureTone {
    #[default]
    Professional,
    Humorous,
}

/// Configuration shared by the fetcher, the filter and the generator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrochureConfig {
    /// Base URL of the chat-completions API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Model used for both link filtering and brochure writing
    #[serde(default = "default_model")]
    pub model: String,

    /// Browser-like User-Agent sent with page fetches
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Timeout for a single page fetch
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,

    /// Maximum characters of website content sent to the writer
    #[serde(default = "default_max_content_chars")]
    pub max_content_chars: usize,

    #[serde(default = "default_filter_temperature")]
    pub filter_temperature: f32,

    #[serde(default = "default_brochure_temperature")]
    pub brochure_temperature: f32,

    #[serde(default)]
    pub tone: BrochureTone,
}

fn default_api_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/117.0.0"
        .to_string()
}

fn default_fetch_timeout_secs() -> u64 {
    10
}

fn default_max_content_chars() -> usize {
    30_000
}

fn default_filter_temperature() -> f32 {
    0.0
}

fn default_brochure_temperature() -> f32 {
    0.7
}

impl Default for BrochureConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            model: default_model(),
            user_agent: default_user_agent(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
            max_content_chars: default_max_content_chars(),
            filter_temperature: default_filter_temperature(),
            brochure_temperature: default_brochure_temperature(),
            tone: BrochureTone::default(),
        }
    }
}

impl BrochureConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `OPENAI_BASE_URL` and `BROCHURE_MODEL` when they are set,
    /// reading `.env` first
    pub fn with_env_overrides(self) -> Self {
        load_dotenv();
        self.with_overrides(|name| std::env::var(name).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(base_url) = lookup(BASE_URL_VAR).filter(|v| !v.is_empty()) {
            self.api_base_url = base_url;
        }
        if let Some(model) = lookup(MODEL_VAR).filter(|v| !v.is_empty()) {
            self.model = model;
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(BrochureError::Config("model must not be empty".into()));
        }
        if self.fetch_timeout_secs == 0 {
            return Err(BrochureError::Config(
                "fetch_timeout_secs must be positive".into(),
            ));
        }
        if url::Url::parse(&self.api_base_url).is_err() {
            return Err(BrochureError::Config(format!(
                "api_base_url is not a valid URL: {}",
                self.api_base_url
            )));
        }
        Ok(())
    }
}

/// How the API key looked when it was loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialStatus {
    Valid,
    Missing,
    Malformed,
}

/// API key forwarded to the chat-completions endpoint
#[derive(Clone, Default)]
pub struct ApiCredential {
    key: Option<String>,
}

impl fmt::Debug for ApiCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiCredential")
            .field("key", &self.key.as_ref().map(|_| "<redacted>"))
            .field("status", &self.status())
            .finish()
    }
}

impl ApiCredential {
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            key: if key.trim().is_empty() {
                None
            } else {
                Some(key.trim().to_string())
            },
        }
    }

    pub fn missing() -> Self {
        Self { key: None }
    }

    /// Read the key from the process environment, loading `.env` first
    pub fn from_env() -> Self {
        load_dotenv();
        match std::env::var(API_KEY_VAR) {
            Ok(key) => Self::new(key),
            Err(_) => Self::missing(),
        }
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn status(&self) -> CredentialStatus {
        match &self.key {
            None => CredentialStatus::Missing,
            Some(key) if key.starts_with("sk-proj-") && key.len() > 10 => CredentialStatus::Valid,
            Some(_) => CredentialStatus::Malformed,
        }
    }

    /// Log whether the key looks usable; never fails
    pub fn check(&self) -> CredentialStatus {
        let status = self.status();
        match status {
            CredentialStatus::Valid => ::log::info!("API key loaded"),
            CredentialStatus::Missing => ::log::warn!(
                "No API key found; set {} in the environment or a .env file",
                API_KEY_VAR
            ),
            CredentialStatus::Malformed => ::log::warn!(
                "The API key in {} does not look like a project key; requests may be rejected",
                API_KEY_VAR
            ),
        }
        status
    }
}

/// Load `.env` into the process environment; variables already set win
fn load_dotenv() {
    if let Err(e) = dotenvy::dotenv() {
        ::log::debug!("No .env file loaded: {}", e);
    }
}

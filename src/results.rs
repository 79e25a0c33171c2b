use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Title used for a page that could not be fetched
pub const ERROR_TITLE: &str = "Error";

/// Title used when a fetched document has no usable `<title>`
pub const MISSING_TITLE: &str = "No title found";

/// Label used for a classification the model returned without a `type`
pub const DEFAULT_LINK_KIND: &str = "Relevant Page";

/// A fetched page with its readable text and outbound links
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchedPage {
    /// URL that was requested
    pub url: String,

    /// Document title, `"Error"` for a failed fetch
    pub title: String,

    /// Visible body text, one text run per line
    pub text: String,

    /// Absolute outbound links in document order
    pub links: Vec<String>,
}

impl FetchedPage {
    /// Create a new page instance
    pub fn new(url: String, title: String, text: String, links: Vec<String>) -> Self {
        Self {
            url,
            title,
            text,
            links,
        }
    }

    /// Sentinel page produced when the fetch fails
    pub fn failed(url: &str) -> Self {
        Self {
            url: url.to_string(),
            title: ERROR_TITLE.to_string(),
            text: String::new(),
            links: Vec::new(),
        }
    }

    /// Whether this page is the sentinel for a failed fetch
    pub fn is_error(&self) -> bool {
        self.title == ERROR_TITLE && self.text.is_empty() && self.links.is_empty()
    }

    pub fn has_text(&self) -> bool {
        !self.text.is_empty()
    }

    /// Title and text block that goes into the corpus
    pub fn clean_contents(&self) -> String {
        format!(
            "Webpage Title:\n{}\nWebpage Contents:\n{}\n\n",
            self.title, self.text
        )
    }
}

/// One link picked by the relevance filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkClassification {
    /// Purpose of the page, e.g. "about page"
    #[serde(
        rename = "type",
        default = "default_link_kind",
        deserialize_with = "deserialize_link_kind"
    )]
    pub kind: String,

    /// Empty when the model gave no usable URL; such entries are skipped
    #[serde(default, deserialize_with = "deserialize_link_url")]
    pub url: String,
}

fn default_link_kind() -> String {
    DEFAULT_LINK_KIND.to_string()
}

// A null or non-string value spoils only its own entry, not the whole answer
fn deserialize_link_kind<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(string_value(Value::deserialize(deserializer)?).unwrap_or_else(default_link_kind))
}

fn deserialize_link_url<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(string_value(Value::deserialize(deserializer)?).unwrap_or_default())
}

fn string_value(value: Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text),
        _ => None,
    }
}

impl LinkClassification {
    pub fn new(kind: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            url: url.into(),
        }
    }
}

/// Wire shape of the filter answer: `{"links": [...]}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelevantLinks {
    #[serde(default)]
    pub links: Vec<LinkClassification>,
}

impl RelevantLinks {
    /// Parse the JSON object returned by the model
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Outcome of asking the relevance filter about a landing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkSelection {
    /// The landing page had no outbound links, so the model was never asked
    NoCandidates,

    /// The model call failed or its answer was not a link list
    Unavailable,

    /// Links the model picked, possibly none
    Selected(Vec<LinkClassification>),
}

impl LinkSelection {
    pub fn links(&self) -> &[LinkClassification] {
        match self {
            LinkSelection::Selected(links) => links,
            LinkSelection::NoCandidates | LinkSelection::Unavailable => &[],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.links().is_empty()
    }

    /// Render the selection in the `{"links": [...]}` shape
    pub fn to_relevant_links(&self) -> RelevantLinks {
        RelevantLinks {
            links: self.links().to_vec(),
        }
    }
}

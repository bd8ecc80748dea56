//! Core domain types for paddockdocs.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Season
// ---------------------------------------------------------------------------

/// A season entry discovered on the portal's listing page.
///
/// Seasons are resolved fresh on every call; there is no persisted registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Season {
    /// Label as shown on the portal (e.g. "SEASON 2024").
    pub label: String,
    /// Year component: the label's trailing whitespace-separated token.
    pub year: String,
    /// Absolute URL of the season's document index page.
    pub index_url: String,
}

impl Season {
    /// Build a season from its portal label and index URL.
    ///
    /// The year is the label's last whitespace-separated token, or the whole
    /// label when it has no spaces.
    pub fn new(label: impl Into<String>, index_url: impl Into<String>) -> Self {
        let label = label.into();
        let year = label
            .split_whitespace()
            .next_back()
            .unwrap_or(label.as_str())
            .to_string();
        Self {
            label,
            year,
            index_url: index_url.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// DocumentRef
// ---------------------------------------------------------------------------

/// A discovered PDF document: absolute URL plus its URL-derived filename.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRef {
    /// Absolute URL of the document.
    pub url: String,
    /// Final path segment of the URL.
    pub filename: String,
}

impl DocumentRef {
    /// Build a document ref from an absolute URL, deriving the filename
    /// from the last path segment.
    pub fn from_url(url: impl Into<String>) -> Self {
        let url = url.into();
        let filename = url
            .rsplit('/')
            .next()
            .unwrap_or(url.as_str())
            .to_string();
        Self { url, filename }
    }
}

// ---------------------------------------------------------------------------
// DocumentClass
// ---------------------------------------------------------------------------

/// Semantic document category, derived purely from filename keywords.
///
/// The classifying predicates are independent: a filename may belong to
/// more than one class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentClass {
    /// Event notes: tyre/compound bulletins and race-event notes.
    EventNotes,
    /// Stewards' infringement, summons, and decision documents.
    Infringements,
    /// No keyword set matched.
    Unclassified,
}

impl std::fmt::Display for DocumentClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::EventNotes => "event notes",
            Self::Infringements => "infringements",
            Self::Unclassified => "unclassified",
        };
        write!(f, "{s}")
    }
}

// ---------------------------------------------------------------------------
// TokenUsage / QuestionAnswer
// ---------------------------------------------------------------------------

/// Token and cost accounting for one model invocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub total_tokens: u64,
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub total_cost_usd: f64,
}

/// One answered question, in battery order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionAnswer {
    pub question: String,
    pub answer: String,
    pub usage: TokenUsage,
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where the portfolio text came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum PortfolioSource {
    Pdf,
    Manual,
}

impl PortfolioSource {
    /// Confirmation shown to the user once the input has been accepted
    pub fn status_message(&self) -> &'static str {
        match self {
            PortfolioSource::Pdf => "PDF uploaded and text extracted.",
            PortfolioSource::Manual => "Manual input received.",
        }
    }
}

impl std::fmt::Display for PortfolioSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PortfolioSource::Pdf => write!(f, "pdf"),
            PortfolioSource::Manual => write!(f, "manual"),
        }
    }
}

/// Portfolio description handed to the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioInput {
    pub source: PortfolioSource,
    pub text: String,
}

impl PortfolioInput {
    pub fn new(source: PortfolioSource, text: impl Into<String>) -> Self {
        Self {
            source,
            text: text.into(),
        }
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

/// Token accounting reported by the completion endpoint
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Keep / Sell / Buy lists pulled out of the model's markdown table.
///
/// A section is `None` when its marker does not occur in the response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct RecommendationSections {
    pub keep: Option<Vec<String>>,
    pub sell: Option<Vec<String>>,
    pub buy: Option<Vec<String>>,
}

impl RecommendationSections {
    pub fn is_empty(&self) -> bool {
        self.keep.is_none() && self.sell.is_none() && self.buy.is_none()
    }
}

/// Model recommendation for one portfolio
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Recommendation {
    /// Raw markdown returned by the model
    pub markdown: String,
    pub sections: RecommendationSections,
    pub model: String,
    pub source: PortfolioSource,
    #[serde(default)]
    pub usage: Option<TokenUsage>,
    pub analyzed_at: DateTime<Utc>,
}

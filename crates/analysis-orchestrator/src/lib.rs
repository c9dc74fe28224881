use analysis_core::{
    AnalysisError, AnalysisResult, PortfolioInput, Recommendation, TokenUsage,
};
use chrono::Utc;
use llm_client::{CompletionProvider, GroqClient, LlmConfig, Usage};
use std::sync::Arc;

pub mod prompt;
pub mod sections;

pub use prompt::build_portfolio_prompt;
pub use sections::parse_sections;

/// Runs one portfolio through the model and shapes the answer.
#[derive(Clone)]
pub struct AnalysisOrchestrator {
    provider: Arc<dyn CompletionProvider>,
}

impl AnalysisOrchestrator {
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self { provider }
    }

    /// Build an orchestrator backed by the Groq HTTP client.
    pub fn with_groq(config: LlmConfig) -> AnalysisResult<Self> {
        let client = GroqClient::new(config).map_err(|e| AnalysisError::Unknown(e.to_string()))?;
        Ok(Self::new(Arc::new(client)))
    }

    pub fn model(&self) -> &str {
        self.provider.model()
    }

    pub fn backend_name(&self) -> &'static str {
        self.provider.backend_name()
    }

    pub async fn analyze(&self, input: &PortfolioInput) -> AnalysisResult<Recommendation> {
        tracing::info!(
            source = %input.source,
            chars = input.char_count(),
            backend = self.provider.backend_name(),
            "Analyzing portfolio"
        );

        let prompt = build_portfolio_prompt(&input.text);
        let completion = self.provider.complete(&prompt).await.map_err(|e| {
            tracing::error!("Completion request failed: {}", e);
            AnalysisError::Llm(e.to_string())
        })?;

        let sections = parse_sections(&completion.content);
        if sections.is_empty() {
            tracing::debug!("No Keep/Sell/Buy table found in model response");
        }

        Ok(Recommendation {
            markdown: completion.content,
            sections,
            model: completion.model,
            source: input.source,
            usage: completion.usage.map(to_token_usage),
            analyzed_at: Utc::now(),
        })
    }
}

fn to_token_usage(usage: Usage) -> TokenUsage {
    TokenUsage {
        prompt_tokens: usage.prompt_tokens,
        completion_tokens: usage.completion_tokens,
        total_tokens: usage.total_tokens,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use analysis_core::PortfolioSource;
    use async_trait::async_trait;
    use llm_client::{Completion, LlmError, LlmResult};
    use std::sync::Mutex;

    struct CannedProvider {
        reply: String,
        prompts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl CompletionProvider for CannedProvider {
        async fn complete(&self, prompt: &str) -> LlmResult<Completion> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok(Completion {
                content: self.reply.clone(),
                model: "canned-model".to_string(),
                usage: Some(Usage {
                    prompt_tokens: 10,
                    completion_tokens: 20,
                    total_tokens: 30,
                }),
            })
        }

        fn model(&self) -> &str {
            "canned-model"
        }

        fn backend_name(&self) -> &'static str {
            "canned"
        }
    }

    struct FailingProvider;

    #[async_trait]
    impl CompletionProvider for FailingProvider {
        async fn complete(&self, _prompt: &str) -> LlmResult<Completion> {
            Err(LlmError::Api {
                status: 503,
                message: "over capacity".to_string(),
            })
        }

        fn model(&self) -> &str {
            "down"
        }

        fn backend_name(&self) -> &'static str {
            "failing"
        }
    }

    #[tokio::test]
    async fn test_analyze_builds_recommendation() {
        let provider = Arc::new(CannedProvider {
            reply: "| **Keep** | AAPL |\n| **Sell** | TSLA |\n| **Buy** | NVDA |".to_string(),
            prompts: Mutex::new(Vec::new()),
        });
        let orchestrator = AnalysisOrchestrator::new(provider.clone());
        let input = PortfolioInput::new(PortfolioSource::Manual, "AAPL 10, TSLA 3");

        let rec = orchestrator.analyze(&input).await.unwrap();

        assert_eq!(rec.model, "canned-model");
        assert_eq!(rec.source, PortfolioSource::Manual);
        assert_eq!(rec.sections.keep, Some(vec!["AAPL".to_string()]));
        assert_eq!(rec.sections.buy, Some(vec!["NVDA".to_string()]));
        assert_eq!(rec.usage.unwrap().total_tokens, 30);

        let prompts = provider.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].starts_with("Portfolio: AAPL 10, TSLA 3. "));
    }

    #[tokio::test]
    async fn test_analyze_keeps_free_text_without_table() {
        let provider = Arc::new(CannedProvider {
            reply: "Hold everything for now.".to_string(),
            prompts: Mutex::new(Vec::new()),
        });
        let orchestrator = AnalysisOrchestrator::new(provider);
        let input = PortfolioInput::new(PortfolioSource::Pdf, "KO 50");

        let rec = orchestrator.analyze(&input).await.unwrap();
        assert_eq!(rec.markdown, "Hold everything for now.");
        assert!(rec.sections.is_empty());
    }

    #[tokio::test]
    async fn test_analyze_reports_request_errors() {
        let orchestrator = AnalysisOrchestrator::new(Arc::new(FailingProvider));
        let input = PortfolioInput::new(PortfolioSource::Manual, "KO 50");

        let err = orchestrator.analyze(&input).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Error during API request: Provider returned HTTP 503: over capacity"
        );
    }
}

use analysis_core::{AnalysisError, AnalysisResult, PortfolioInput, PortfolioSource};

/// Pick the portfolio description to analyze.
///
/// Extracted PDF text takes priority over manual text when both are present.
/// Manual text counts only if it has non-whitespace content, and is passed on
/// untrimmed.
pub fn select_input(
    pdf_text: Option<String>,
    manual: Option<&str>,
) -> AnalysisResult<PortfolioInput> {
    if let Some(text) = pdf_text {
        if text.trim().is_empty() {
            return Err(AnalysisError::EmptyDocument);
        }
        return Ok(PortfolioInput::new(PortfolioSource::Pdf, text));
    }

    match manual {
        Some(text) if !text.trim().is_empty() => {
            Ok(PortfolioInput::new(PortfolioSource::Manual, text))
        }
        _ => Err(AnalysisError::NoInput),
    }
}

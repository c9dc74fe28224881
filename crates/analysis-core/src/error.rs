use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Please upload a PDF file or enter the portfolio manually.")]
    NoInput,

    #[error("No text could be extracted from the uploaded PDF")]
    EmptyDocument,

    #[error("Error during API request: {0}")]
    Llm(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl AnalysisError {
    /// True when the failure was caused by what the user submitted.
    pub fn is_input_error(&self) -> bool {
        matches!(self, AnalysisError::NoInput | AnalysisError::EmptyDocument)
    }
}

pub type AnalysisResult<T> = Result<T, AnalysisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_llm_error_keeps_request_prefix() {
        let err = AnalysisError::Llm("connection refused".to_string());
        assert_eq!(err.to_string(), "Error during API request: connection refused");
        assert!(!err.is_input_error());
    }

    #[test]
    fn test_input_errors() {
        assert!(AnalysisError::NoInput.is_input_error());
        assert!(AnalysisError::EmptyDocument.is_input_error());
        assert_eq!(
            AnalysisError::NoInput.to_string(),
            "Please upload a PDF file or enter the portfolio manually."
        );
    }
}

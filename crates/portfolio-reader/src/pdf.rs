use thiserror::Error;

#[cfg(test)]
#[path = "pdf_tests.rs"]
mod pdf_tests;

/// PDF magic bytes
const PDF_MAGIC: &[u8] = b"%PDF";
/// Maximum accepted PDF size (20 MB)
pub const MAX_PDF_SIZE: usize = 20 * 1024 * 1024;

#[derive(Error, Debug)]
pub enum PdfError {
    #[error("File too small to be a valid PDF")]
    TooSmall,

    #[error("PDF file too large ({size_mb} MB). Maximum: {max_mb} MB")]
    TooLarge { size_mb: usize, max_mb: usize },

    #[error("Invalid PDF file: missing PDF header")]
    MissingHeader,

    #[error("Failed to extract text from PDF: {0}")]
    Extraction(String),

    #[error("PDF parser crashed on this document")]
    ExtractionPanicked,
}

/// Cheap structural checks before handing bytes to the extractor.
pub fn validate_pdf(bytes: &[u8]) -> Result<(), PdfError> {
    if bytes.len() < 8 {
        return Err(PdfError::TooSmall);
    }

    if bytes.len() > MAX_PDF_SIZE {
        return Err(PdfError::TooLarge {
            size_mb: bytes.len() / (1024 * 1024),
            max_mb: MAX_PDF_SIZE / (1024 * 1024),
        });
    }

    if !bytes.starts_with(PDF_MAGIC) {
        return Err(PdfError::MissingHeader);
    }

    Ok(())
}

/// Extract the text of every page, in page order.
pub fn extract_text_from_pdf(bytes: &[u8]) -> Result<String, PdfError> {
    validate_pdf(bytes)?;
    extract_validated(bytes)
}

fn extract_validated(bytes: &[u8]) -> Result<String, PdfError> {
    let text = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| PdfError::Extraction(e.to_string()))?;

    tracing::debug!(bytes = bytes.len(), chars = text.len(), "Extracted PDF text");
    Ok(text)
}

/// Runs extraction on the blocking pool.
///
/// Bytes are validated before a blocking task is spawned, so rejected uploads
/// never occupy the pool. pdf-extract can panic on malformed documents; the
/// panic stays inside the blocking task and comes back as
/// [`PdfError::ExtractionPanicked`].
pub async fn extract_text_async(bytes: Vec<u8>) -> Result<String, PdfError> {
    validate_pdf(&bytes)?;

    match tokio::task::spawn_blocking(move || extract_validated(&bytes)).await {
        Ok(result) => result,
        Err(e) if e.is_panic() => {
            tracing::warn!("pdf-extract panicked while reading upload");
            Err(PdfError::ExtractionPanicked)
        }
        Err(e) => Err(PdfError::Extraction(e.to_string())),
    }
}

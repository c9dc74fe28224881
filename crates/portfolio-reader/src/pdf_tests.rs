#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::test_support::{blank_page_pdf, single_page_pdf};

    #[test]
    fn test_validate_rejects_tiny_input() {
        assert!(matches!(validate_pdf(b"%PDF"), Err(PdfError::TooSmall)));
    }

    #[test]
    fn test_validate_rejects_missing_header() {
        let bytes = b"AAPL 10 shares, MSFT 5 shares";
        assert!(matches!(validate_pdf(bytes), Err(PdfError::MissingHeader)));
    }

    #[test]
    fn test_validate_rejects_oversized_file() {
        let mut bytes = b"%PDF-1.4\n".to_vec();
        bytes.resize(MAX_PDF_SIZE + 1, b' ');
        match validate_pdf(&bytes) {
            Err(PdfError::TooLarge { size_mb, max_mb }) => {
                assert_eq!(size_mb, 20);
                assert_eq!(max_mb, 20);
            }
            other => panic!("expected TooLarge, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_accepts_header() {
        assert!(validate_pdf(&single_page_pdf("AAPL")).is_ok());
    }

    #[test]
    fn test_extract_single_page() {
        let pdf = single_page_pdf("AAPL 10 shares");
        let text = extract_text_from_pdf(&pdf).unwrap();
        assert!(text.contains("AAPL"), "extracted: {:?}", text);
    }

    #[test]
    fn test_extract_does_not_touch_non_pdf() {
        let err = extract_text_from_pdf(b"plain text portfolio").unwrap_err();
        assert!(matches!(err, PdfError::MissingHeader));
    }

    #[tokio::test]
    async fn test_extract_async_reports_broken_documents() {
        let broken = b"%PDF-1.4\nthis is not really a pdf body\n%%EOF\n".to_vec();
        let err = extract_text_async(broken).await.unwrap_err();
        assert!(matches!(
            err,
            PdfError::Extraction(_) | PdfError::ExtractionPanicked
        ));
    }

    #[tokio::test]
    async fn test_extract_async_single_page() {
        let text = extract_text_async(single_page_pdf("MSFT 5 shares")).await.unwrap();
        assert!(text.contains("MSFT"));
    }

    #[tokio::test]
    async fn test_extract_async_rejects_non_pdf_up_front() {
        let err = extract_text_async(b"AAPL 10, MSFT 5".to_vec()).await.unwrap_err();
        assert!(matches!(err, PdfError::MissingHeader));
    }

    #[tokio::test]
    async fn test_extract_async_blank_page_has_no_text() {
        let text = extract_text_async(blank_page_pdf()).await.unwrap();
        assert!(text.trim().is_empty(), "extracted: {:?}", text);
    }
}

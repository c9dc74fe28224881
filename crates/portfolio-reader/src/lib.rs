//! Turns what the user submitted (a PDF upload, a block of text, or both)
//! into the portfolio description sent to the model.

pub mod input;
pub mod pdf;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use input::select_input;
pub use pdf::{extract_text_async, extract_text_from_pdf, validate_pdf, PdfError, MAX_PDF_SIZE};

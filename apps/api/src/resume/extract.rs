//! Document extractor — converts an uploaded PDF byte stream into plain text.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("not a readable PDF: {0}")]
    InvalidPdf(#[from] pdf_extract::OutputError),
}

/// Extracts the text of every page in document order, joined by newlines.
///
/// Pages with no extractable text contribute an empty segment rather than an
/// error, so downstream logic never depends on the page count. An unreadable
/// or non-PDF stream fails with `ExtractionError` and no partial text is
/// produced.
pub fn extract_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    let pages = pdf_extract::extract_text_from_mem_by_pages(bytes)?;
    Ok(join_pages(&pages))
}

fn join_pages(pages: &[String]) -> String {
    pages.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_pages_preserves_page_order_and_count() {
        let pages = vec![
            "first page".to_string(),
            String::new(),
            "third page".to_string(),
        ];
        let joined = join_pages(&pages);
        assert_eq!(joined, "first page\n\nthird page");
        assert_eq!(joined.split('\n').count(), 3);
    }

    #[test]
    fn test_join_pages_single_page_has_no_separator() {
        assert_eq!(join_pages(&["only".to_string()]), "only");
    }

    #[test]
    fn test_join_pages_empty_document() {
        assert_eq!(join_pages(&[]), "");
    }

    #[test]
    fn test_extract_text_rejects_non_pdf_bytes() {
        let result = extract_text(b"this is definitely not a pdf");
        assert!(result.is_err(), "expected ExtractionError, got {result:?}");
    }

    #[test]
    fn test_extract_text_rejects_empty_stream() {
        assert!(extract_text(&[]).is_err());
    }
}

//! PDFテキスト抽出（全ページを連結）

use crate::error::{LegalAiError, Result};

pub fn extract_pdf_text(data: &[u8]) -> Result<String> {
    pdf_extract::extract_text_from_mem(data)
        .map_err(|e| LegalAiError::Extraction(format!("PDFからテキストを抽出できません: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_pdf_text_invalid_data() {
        let result = extract_pdf_text(b"not a pdf at all");
        assert!(matches!(result, Err(LegalAiError::Extraction(_))));
    }
}

use std::io::Cursor;

use standard_error::StandardError;

use crate::prelude::Result;

/// Declared upload type, derived from the original filename's extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Pdf,
    Docx,
}

impl FileKind {
    pub fn from_extension(ext: &str) -> Option<FileKind> {
        match ext.to_lowercase().as_str() {
            "pdf" => Some(FileKind::Pdf),
            "docx" => Some(FileKind::Docx),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            FileKind::Pdf => "pdf",
            FileKind::Docx => "docx",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            FileKind::Pdf => "application/pdf",
            FileKind::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }
}

/// Decodes the raw upload into plain text. Layout, formatting and embedded
/// objects are discarded; encoding artifacts pass through uncorrected.
pub fn extract_document(data: &[u8], kind: FileKind) -> Result<String> {
    match kind {
        FileKind::Pdf => extract_text_from_pdf(data),
        FileKind::Docx => extract_text_from_docx(data),
    }
}

fn extract_text_from_pdf(data: &[u8]) -> Result<String> {
    use lopdf::Document;
    let cursor = Cursor::new(data);
    let doc = Document::load_from(cursor).map_err(|e| {
        tracing::error!("failed to load pdf: {}", e);
        StandardError::new("ERR-EXTRACT-001")
    })?;

    let pages = doc.get_pages();
    let mut text = String::new();

    for page_num in pages.keys() {
        match doc.extract_text(&[*page_num]) {
            Ok(page_text) => {
                text.push_str(&page_text);
                text.push(' ');
            }
            Err(e) => {
                tracing::warn!("failed to extract text from page {}: {}", page_num, e);
            }
        }
    }

    if text.trim().is_empty() {
        tracing::error!("no text recovered from pdf");
        return Err(StandardError::new("ERR-EXTRACT-001"));
    }
    Ok(text.trim().to_string())
}

fn extract_text_from_docx(data: &[u8]) -> Result<String> {
    use docx_rs::read_docx;
    let docx = read_docx(data).map_err(|e| {
        tracing::error!("failed to load docx: {}", e);
        StandardError::new("ERR-EXTRACT-002")
    })?;
    let mut text = String::new();
    // paragraph boundaries become line breaks, nothing else survives
    for child in docx.document.children {
        if let docx_rs::DocumentChild::Paragraph(p) = child {
            for child in p.children {
                if let docx_rs::ParagraphChild::Run(run) = child {
                    for run_child in run.children {
                        if let docx_rs::RunChild::Text(t) = run_child {
                            text.push_str(&t.text);
                        }
                    }
                }
            }
            text.push('\n');
        }
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use tracing_test::traced_test;

    use super::*;

    fn build_docx(paragraphs: &[&str]) -> Vec<u8> {
        use docx_rs::{Docx, Paragraph, Run};
        let mut docx = Docx::new();
        for para in paragraphs {
            docx = docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(*para)));
        }
        let mut buf = Cursor::new(Vec::new());
        docx.build().pack(&mut buf).unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_file_kind_from_extension() {
        assert_eq!(FileKind::from_extension("pdf"), Some(FileKind::Pdf));
        assert_eq!(FileKind::from_extension("PDF"), Some(FileKind::Pdf));
        assert_eq!(FileKind::from_extension("docx"), Some(FileKind::Docx));
        assert_eq!(FileKind::from_extension("doc"), None);
        assert_eq!(FileKind::from_extension("txt"), None);
        assert_eq!(FileKind::from_extension(""), None);
    }

    #[test]
    fn test_docx_paragraphs_become_lines() -> Result<()> {
        let data = build_docx(&["Jane Doe", "Software Engineer"]);
        let text = extract_document(&data, FileKind::Docx)?;
        assert_eq!(text, "Jane Doe\nSoftware Engineer\n");
        Ok(())
    }

    #[test]
    #[traced_test]
    fn test_corrupt_pdf_is_an_extraction_failure() {
        let garbage = b"definitely not a pdf";
        assert!(extract_document(garbage, FileKind::Pdf).is_err());
    }

    #[test]
    #[traced_test]
    fn test_corrupt_docx_is_an_extraction_failure() {
        let garbage = b"definitely not a zip archive";
        assert!(extract_document(garbage, FileKind::Docx).is_err());
    }
}

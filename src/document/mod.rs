pub mod pdf;
pub mod docx;
pub mod chunk;

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("File not found")]
    NotFound,

    #[error("Unsupported file format")]
    UnsupportedFormat,

    #[error("Error reading the file: {0}")]
    ReadFailed(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl ExtractError {
    pub fn code(&self) -> u8 {
        match self {
            ExtractError::NotFound => 1,
            ExtractError::UnsupportedFormat => 2,
            ExtractError::ReadFailed(_) => 3,
            ExtractError::Unexpected(_) => 4,
        }
    }
}

impl From<std::io::Error> for ExtractError {
    fn from(err: std::io::Error) -> Self {
        ExtractError::ReadFailed(err.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
}

impl DocumentFormat {
    /// Detects the format from the file extension, ignoring case.
    /// `.doc` goes through the DOCX reader.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "pdf" => Some(DocumentFormat::Pdf),
            "docx" | "doc" => Some(DocumentFormat::Docx),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    #[serde(rename = "errCod")]
    pub err_cod: u8,
    #[serde(rename = "errDes")]
    pub err_des: String,
    pub text: String,
}

impl From<Result<String, ExtractError>> for ExtractionResult {
    fn from(result: Result<String, ExtractError>) -> Self {
        match result {
            Ok(text) => ExtractionResult {
                err_cod: 0,
                err_des: "Ok".to_string(),
                text,
            },
            Err(err) => ExtractionResult {
                err_cod: err.code(),
                err_des: err.to_string(),
                text: String::new(),
            },
        }
    }
}

pub fn process_document(path: &Path) -> Result<String, ExtractError> {
    if !path.exists() {
        return Err(ExtractError::NotFound);
    }
    let format = DocumentFormat::from_path(path).ok_or(ExtractError::UnsupportedFormat)?;
    debug!("Extracting {:?} text from {}", format, path.display());

    // Third-party parsers may panic on malformed input.
    let content = panic::catch_unwind(AssertUnwindSafe(|| match format {
        DocumentFormat::Pdf => pdf::extract(path),
        DocumentFormat::Docx => docx::extract(path),
    }))
    .map_err(|payload| ExtractError::Unexpected(panic_message(payload)))??;

    Ok(content.replace(|c: char| c.is_control() && !c.is_whitespace(), ""))
}

/// Extracts the text of a PDF, DOC or DOCX file into a structured result.
pub fn extract_text(path: &Path) -> ExtractionResult {
    let result = process_document(path);
    if let Err(err) = &result {
        warn!("Extraction failed for {}: {}", path.display(), err);
    }
    result.into()
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "parser panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_missing_file() {
        let result = extract_text(Path::new("/definitely/not/here.pdf"));
        assert_eq!(result.err_cod, 1);
        assert_eq!(result.err_des, "File not found");
        assert!(result.text.is_empty());
    }

    #[test]
    fn test_unsupported_format() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("notes.txt");
        fs::write(&path, "plain text")?;
        let result = extract_text(&path);
        assert_eq!(result.err_cod, 2);
        assert_eq!(result.err_des, "Unsupported file format");
        Ok(())
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(DocumentFormat::from_path(Path::new("a.PDF")), Some(DocumentFormat::Pdf));
        assert_eq!(DocumentFormat::from_path(Path::new("b.DocX")), Some(DocumentFormat::Docx));
        assert_eq!(DocumentFormat::from_path(Path::new("c.doc")), Some(DocumentFormat::Docx));
        assert_eq!(DocumentFormat::from_path(Path::new("d.odt")), None);
        assert_eq!(DocumentFormat::from_path(Path::new("pdf")), None);
    }

    #[test]
    fn test_corrupt_pdf() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("broken.pdf");
        fs::write(&path, b"this is not a pdf")?;
        let result = extract_text(&path);
        assert_eq!(result.err_cod, 3);
        assert!(result.err_des.starts_with("Error reading the file: "));
        assert!(result.text.is_empty());
        Ok(())
    }

    #[test]
    fn test_corrupt_docx() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("broken.docx");
        fs::write(&path, b"PK not really a zip")?;
        let result = extract_text(&path);
        assert_eq!(result.err_cod, 3);
        Ok(())
    }

    #[test]
    fn test_panic_message() {
        let payload: Box<dyn Any + Send> = Box::new("boom");
        assert_eq!(panic_message(payload), "boom");
        let payload: Box<dyn Any + Send> = Box::new(String::from("bang"));
        assert_eq!(panic_message(payload), "bang");
        let err = ExtractError::Unexpected("bang".to_string());
        assert_eq!(err.code(), 4);
        assert_eq!(err.to_string(), "Unexpected error: bang");
    }

    #[test]
    fn test_extraction_json_round_trip() -> anyhow::Result<()> {
        let result: ExtractionResult = Ok("line \"one\"\r\nC:\\two\n".to_string()).into();
        let json = serde_json::to_string(&result)?;
        assert!(json.contains(r#"\"one\"\r\nC:\\two\n"#));
        let parsed: ExtractionResult = serde_json::from_str(&json)?;
        assert_eq!(parsed, result);
        Ok(())
    }
}

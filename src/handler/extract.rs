use std::path::Path;
use log::info;
use crate::document::{extract_text, ExtractionResult};

pub fn extract_file(path: &Path) -> ExtractionResult {
    info!("Extracting text: {}", path.display());
    let result = extract_text(path);
    if result.err_cod == 0 {
        info!("Extracted {} characters from {}", result.text.chars().count(), path.display());
    }
    result
}

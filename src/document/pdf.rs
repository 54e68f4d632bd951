use std::path::Path;

use pdf_extract::extract_text;

use super::ExtractError;

pub fn extract(path: &Path) -> Result<String, ExtractError> {
    extract_text(path).map_err(|err| ExtractError::ReadFailed(err.to_string()))
}

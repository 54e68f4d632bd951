use std::path::{Path, PathBuf};
use log::{info, warn};
use serde::Serialize;
use walkdir::DirEntry;
use crate::document::chunk::{ChunkResult, TextChunker};
use crate::document::{extract_text, DocumentFormat};

/// Outcome of extracting and chunking one file. `chunks` is absent when extraction failed.
#[derive(Debug, Serialize)]
pub struct ProcessedDocument {
    pub path: PathBuf,
    #[serde(rename = "errCod")]
    pub err_cod: u8,
    #[serde(rename = "errDes")]
    pub err_des: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chunks: Option<ChunkResult>,
}

pub fn process_path(
    chunker: &TextChunker,
    path: &Path,
    recursive: bool,
    chunk_size: i64,
    overlap: i64,
) -> Vec<ProcessedDocument> {
    if path.is_dir() {
        process_directory(chunker, path, recursive, chunk_size, overlap)
    } else {
        vec![process_single_file(chunker, path, chunk_size, overlap)]
    }
}

fn process_directory(
    chunker: &TextChunker,
    path: &Path,
    recursive: bool,
    chunk_size: i64,
    overlap: i64,
) -> Vec<ProcessedDocument> {
    let mut documents = Vec::new();

    for entry in get_entries(path, recursive) {
        let entry_path = entry.path();
        if !entry_path.is_file() {
            continue;
        }
        match DocumentFormat::from_path(entry_path) {
            Some(_) => documents.push(process_single_file(chunker, entry_path, chunk_size, overlap)),
            None => warn!("Skipping unsupported file: {}", entry_path.display()),
        }
    }

    info!("Processed {} documents under {}", documents.len(), path.display());
    documents
}

fn process_single_file(
    chunker: &TextChunker,
    path: &Path,
    chunk_size: i64,
    overlap: i64,
) -> ProcessedDocument {
    info!("Processing document: {}", path.display());

    let extraction = extract_text(path);
    let chunks = (extraction.err_cod == 0).then(|| {
        let result: ChunkResult = chunker.create_chunks(Some(extraction.text.as_str()), chunk_size, overlap).into();
        info!("Document {} split into {} chunks", path.display(), result.chunks.len());
        result
    });

    ProcessedDocument {
        path: path.to_path_buf(),
        err_cod: extraction.err_cod,
        err_des: extraction.err_des,
        chunks,
    }
}

// Entries come back sorted by name so output order is stable.
fn get_entries(path: &Path, recursive: bool) -> Box<dyn Iterator<Item = DirEntry>> {
    let iter = if recursive {
        walkdir::WalkDir::new(path)
    } else {
        walkdir::WalkDir::new(path).max_depth(1)
    };
    Box::new(iter.sort_by_file_name().into_iter().filter_map(|e| e.ok()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use docx_rs::{Docx, Paragraph, Run};

    fn write_docx(path: &Path, text: &str) -> anyhow::Result<()> {
        let file = fs::File::create(path)?;
        Docx::new()
            .add_paragraph(Paragraph::new().add_run(Run::new().add_text(text)))
            .build()
            .pack(file)?;
        Ok(())
    }

    #[test]
    fn test_process_directory() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        write_docx(&dir.path().join("a.docx"), "a b c d e f g h i j")?;
        fs::write(dir.path().join("b.pdf"), b"broken")?;
        fs::write(dir.path().join("c.txt"), b"skipped")?;
        fs::create_dir(dir.path().join("nested"))?;
        write_docx(&dir.path().join("nested").join("d.docx"), "deep")?;

        let chunker = TextChunker::default();
        let documents = process_path(&chunker, dir.path(), false, 6, 2);
        assert_eq!(documents.len(), 2);

        assert_eq!(documents[0].err_cod, 0);
        let chunks = documents[0].chunks.as_ref().map(|c| c.chunks.clone());
        assert_eq!(chunks, Some(vec![
            "a b c d e".to_string(),
            "d e f g h".to_string(),
            "g h i j".to_string(),
            "j".to_string(),
        ]));

        assert_eq!(documents[1].err_cod, 3);
        assert!(documents[1].chunks.is_none());

        let documents = process_path(&chunker, dir.path(), true, 6, 2);
        assert_eq!(documents.len(), 3);
        Ok(())
    }

    #[test]
    fn test_process_single_file_json() -> anyhow::Result<()> {
        let documents = process_path(&TextChunker::default(), Path::new("/missing/file.docx"), false, 6, 2);
        assert_eq!(documents.len(), 1);
        let json = serde_json::to_value(&documents[0])?;
        assert_eq!(json["errCod"], 1);
        assert!(json.get("chunks").is_none());
        Ok(())
    }

    #[test]
    fn test_process_invalid_window() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("a.docx");
        write_docx(&path, "some words here")?;
        let documents = process_path(&TextChunker::default(), &path, false, 6, 5);
        assert_eq!(documents[0].err_cod, 0);
        assert_eq!(documents[0].chunks.as_ref().map(|c| c.err_cod), Some(5));
        Ok(())
    }
}

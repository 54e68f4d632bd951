use std::fs;
use std::io::{self, Read};
use std::path::Path;
use anyhow::Context;
use log::info;
use crate::document::chunk::{ChunkRequest, ChunkResult, TextChunker};

/// Reads a whole file, or stdin when no path is given.
pub fn read_input(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer).context("Failed to read stdin")?;
            Ok(buffer)
        }
    }
}

pub fn chunk_text(chunker: &TextChunker, text: &str, chunk_size: i64, overlap: i64) -> ChunkResult {
    let result: ChunkResult = chunker.create_chunks(Some(text), chunk_size, overlap).into();
    info!("Chunking finished with code {}, {} chunks", result.err_cod, result.chunks.len());
    result
}

/// Parses a JSON `ChunkRequest`. Malformed JSON is an error, a `null` text is a result.
pub fn answer_request(chunker: &TextChunker, raw: &str) -> anyhow::Result<ChunkResult> {
    let request: ChunkRequest = serde_json::from_str(raw).context("Invalid chunk request")?;
    Ok(chunker.handle(&request))
}

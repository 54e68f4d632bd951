use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Approximate number of tokens a single whitespace-delimited word costs.
pub const TOKENS_PER_WORD: f64 = 1.2;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChunkError {
    #[error("Text is absent")]
    NullText,

    #[error("Chunk size must be greater than 0")]
    InvalidChunkSize,

    #[error("Overlap can not be negative")]
    NegativeOverlap,

    #[error("Chunk size (in tokens) must be greater than the overlap (in tokens)")]
    ChunkNotLargerThanOverlapTokens,

    #[error("Chunk size (converted to words) must be greater than the overlap")]
    ChunkNotLargerThanOverlapWords,
}

impl ChunkError {
    pub fn code(&self) -> u8 {
        match self {
            ChunkError::NullText => 1,
            ChunkError::InvalidChunkSize => 2,
            ChunkError::NegativeOverlap => 3,
            ChunkError::ChunkNotLargerThanOverlapTokens => 4,
            ChunkError::ChunkNotLargerThanOverlapWords => 5,
        }
    }
}

/// Input of a chunking call as it arrives over JSON. `text` may be `null`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkRequest {
    pub text: Option<String>,
    #[serde(rename = "tokenChunkSize")]
    pub token_chunk_size: i64,
    #[serde(rename = "tokenOverlap")]
    pub token_overlap: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkResult {
    #[serde(rename = "errCod")]
    pub err_cod: u8,
    #[serde(rename = "errDes")]
    pub err_des: String,
    #[serde(rename = "Chunks")]
    pub chunks: Vec<String>,
}

impl From<Result<Vec<String>, ChunkError>> for ChunkResult {
    fn from(result: Result<Vec<String>, ChunkError>) -> Self {
        match result {
            Ok(chunks) => ChunkResult {
                err_cod: 0,
                err_des: "Ok".to_string(),
                chunks,
            },
            Err(err) => ChunkResult {
                err_cod: err.code(),
                err_des: err.to_string(),
                chunks: Vec::new(),
            },
        }
    }
}

/// Word budget derived from a token budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordWindow {
    pub size: usize,
    pub overlap: usize,
}

impl WordWindow {
    pub fn step(&self) -> usize {
        self.size - self.overlap
    }
}

/// Sliding-window chunker over whitespace-delimited words.
///
/// Token counts are never measured; they are turned into word counts with
/// `tokens_per_word`, rounding both the chunk size and the overlap up.
#[derive(Debug, Clone, Copy)]
pub struct TextChunker {
    tokens_per_word: f64,
}

impl Default for TextChunker {
    fn default() -> Self {
        Self { tokens_per_word: TOKENS_PER_WORD }
    }
}

impl TextChunker {
    /// `tokens_per_word` must be finite and positive; callers validate it first.
    pub fn new(tokens_per_word: f64) -> Self {
        Self { tokens_per_word }
    }

    pub fn tokens_per_word(&self) -> f64 {
        self.tokens_per_word
    }

    fn words_for(&self, tokens: i64) -> usize {
        (tokens as f64 / self.tokens_per_word).ceil() as usize
    }

    /// Runs every parameter check in order and returns the derived word window.
    pub fn window(&self, token_chunk_size: i64, token_overlap: i64) -> Result<WordWindow, ChunkError> {
        if token_chunk_size <= 0 {
            return Err(ChunkError::InvalidChunkSize);
        }
        if token_overlap < 0 {
            return Err(ChunkError::NegativeOverlap);
        }
        if token_chunk_size <= token_overlap {
            return Err(ChunkError::ChunkNotLargerThanOverlapTokens);
        }

        let window = WordWindow {
            size: self.words_for(token_chunk_size),
            overlap: self.words_for(token_overlap),
        };
        // Independent rounding can close the gap between the two.
        if window.size <= window.overlap {
            return Err(ChunkError::ChunkNotLargerThanOverlapWords);
        }
        Ok(window)
    }

    pub fn create_chunks(
        &self,
        text: Option<&str>,
        token_chunk_size: i64,
        token_overlap: i64,
    ) -> Result<Vec<String>, ChunkError> {
        let text = text.ok_or(ChunkError::NullText)?;
        let window = self.window(token_chunk_size, token_overlap)?;

        // Whitespace runs never yield empty words, so blank text has no chunks.
        let words: Vec<&str> = text.split_whitespace().collect();
        debug!(
            "chunking {} words: window {} words, overlap {} words",
            words.len(), window.size, window.overlap
        );

        let mut chunks = Vec::new();
        let mut start = 0;
        while start < words.len() {
            let end = (start + window.size).min(words.len());
            chunks.push(words[start..end].join(" "));
            start += window.step();
        }

        Ok(chunks)
    }

    pub fn handle(&self, request: &ChunkRequest) -> ChunkResult {
        self.create_chunks(
            request.text.as_deref(),
            request.token_chunk_size,
            request.token_overlap,
        ).into()
    }
}

/// Chunks `text` with the default word/token ratio.
pub fn create_chunks(
    text: Option<&str>,
    token_chunk_size: i64,
    token_overlap: i64,
) -> Result<Vec<String>, ChunkError> {
    TextChunker::default().create_chunks(text, token_chunk_size, token_overlap)
}

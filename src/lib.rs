pub mod document;
pub mod handler;

use serde::{Deserialize, Serialize};

use crate::document::chunk::{TextChunker, TOKENS_PER_WORD};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Config {
    // Chunk, in tokens
    pub chunk_size: i64,
    pub chunk_overlap: i64,
    pub tokens_per_word: f64,

    // Output
    pub pretty: bool,
}

impl Config {
    pub fn chunker(&self) -> TextChunker {
        TextChunker::new(self.tokens_per_word)
    }
}

/// Loads defaults, then `config.toml` if present, then `DOCCHUNK_*` variables.
pub fn read_config() -> anyhow::Result<Config> {
    let config = config::Config::builder()
        .set_default("chunk_size", 512)?
        .set_default("chunk_overlap", 64)?
        .set_default("tokens_per_word", TOKENS_PER_WORD)?
        .set_default("pretty", false)?
        .add_source(config::File::with_name("config").required(false))
        .add_source(config::Environment::with_prefix("DOCCHUNK").try_parsing(true))
        .build()?
        .try_deserialize::<Config>()?;

    if !config.tokens_per_word.is_finite() || config.tokens_per_word <= 0.0 {
        anyhow::bail!("tokens_per_word must be a positive number, got {}", config.tokens_per_word);
    }
    Ok(config)
}

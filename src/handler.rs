use std::path::PathBuf;
use clap::{Parser, Subcommand};
use serde::Serialize;
use crate::Config;

mod chunk;
mod extract;
mod process;

pub use process::ProcessedDocument;

#[derive(Parser)]
#[command(name = "docchunk")]
#[command(about = "Extract text from PDF/DOCX files and split it into overlapping chunks", version = "0.1")]
pub struct Cli {
    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Extract the plain text of a document
    Extract {
        #[arg(help = "PDF, DOC or DOCX file")]
        path: PathBuf,
    },

    /// Split text into overlapping chunks
    Chunk {
        #[arg(short, long, help = "Text file to read, stdin when omitted")]
        input: Option<PathBuf>,

        #[arg(short = 's', long, allow_negative_numbers = true, help = "Chunk size in tokens")]
        chunk_size: Option<i64>,

        #[arg(short, long, allow_negative_numbers = true, help = "Overlap in tokens")]
        overlap: Option<i64>,
    },

    /// Answer a JSON chunk request {"text", "tokenChunkSize", "tokenOverlap"}
    Request {
        #[arg(short, long, help = "JSON file to read, stdin when omitted")]
        input: Option<PathBuf>,
    },

    /// Extract and chunk a document or every document in a directory
    Process {
        #[arg(help = "File or directory path")]
        path: PathBuf,

        #[arg(short, long, help = "Walk subdirectories")]
        recursive: bool,

        #[arg(short = 's', long, allow_negative_numbers = true, help = "Chunk size in tokens")]
        chunk_size: Option<i64>,

        #[arg(short, long, allow_negative_numbers = true, help = "Overlap in tokens")]
        overlap: Option<i64>,
    },
}

pub fn handler(args: Cli, config: Config) -> anyhow::Result<()> {
    let pretty = args.pretty || config.pretty;
    let chunker = config.chunker();

    match args.command {
        Command::Extract { path } => print_json(&extract::extract_file(&path), pretty),
        Command::Chunk { input, chunk_size, overlap } => {
            let text = chunk::read_input(input.as_deref())?;
            let result = chunk::chunk_text(
                &chunker,
                &text,
                chunk_size.unwrap_or(config.chunk_size),
                overlap.unwrap_or(config.chunk_overlap),
            );
            print_json(&result, pretty)
        }
        Command::Request { input } => {
            let raw = chunk::read_input(input.as_deref())?;
            print_json(&chunk::answer_request(&chunker, &raw)?, pretty)
        }
        Command::Process { path, recursive, chunk_size, overlap } => {
            let documents = process::process_path(
                &chunker,
                &path,
                recursive,
                chunk_size.unwrap_or(config.chunk_size),
                overlap.unwrap_or(config.chunk_overlap),
            );
            for document in &documents {
                print_json(document, pretty)?;
            }
            Ok(())
        }
    }
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> anyhow::Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", json);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_negative_sizes() {
        let cli = Cli::try_parse_from(["docchunk", "chunk", "--chunk-size", "-5", "--overlap", "-1"])
            .unwrap();
        match cli.command {
            Command::Chunk { chunk_size, overlap, input } => {
                assert_eq!(chunk_size, Some(-5));
                assert_eq!(overlap, Some(-1));
                assert!(input.is_none());
            }
            _ => panic!("expected chunk command"),
        }
    }

    #[test]
    fn test_parse_process() {
        let cli = Cli::try_parse_from(["docchunk", "process", "docs", "-r", "--pretty"]).unwrap();
        assert!(cli.pretty);
        assert!(matches!(cli.command, Command::Process { recursive: true, .. }));
    }
}

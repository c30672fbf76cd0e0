#![doc = include_str!("../README.md")]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use static_huffman::{DecodingStats, EncodingStats, Error};

#[derive(Subcommand)]
pub enum Command {
    /// Compresses INPUT file into the OUTPUT container
    #[clap(visible_alias = "e")]
    Encode {
        /// File to compress
        input: PathBuf,
        /// Container to write
        output: PathBuf,
    },
    /// Decompresses INPUT container into the OUTPUT file
    #[clap(visible_alias = "d")]
    Decode {
        /// Container to decompress
        input: PathBuf,
        /// File to write
        output: PathBuf,
    },
    /// Compresses INPUT in memory, prints the statistics and verifies decompression, without writing anything
    #[clap(visible_alias = "s")]
    Stats {
        /// File to analyze
        input: PathBuf,
    },
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Static Huffman compressor.
pub struct Conf {
    /// Operation to perform
    #[command(subcommand)]
    pub command: Command,

    /// Whether to print the statistics of encoding or decoding
    #[arg(short = 'v', long, default_value_t = false, global = true)]
    pub verbose: bool,

    /// Whether to treat the content as raw bytes instead of UTF-8 text (must be the same for encoding and decoding)
    #[arg(short = 'b', long, default_value_t = false, global = true)]
    pub binary: bool,
}

fn read(path: &Path) -> anyhow::Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("cannot read {}", path.display()))
}

fn write(path: &Path, content: &[u8]) -> anyhow::Result<()> {
    fs::write(path, content).with_context(|| format!("cannot write {}", path.display()))
}

/// Compresses `content` read from `path`. Returns the container and the statistics.
fn encode(conf: &Conf, path: &Path, content: Vec<u8>) -> anyhow::Result<(Vec<u8>, EncodingStats)> {
    let encoded = if conf.binary {
        static_huffman::serialize_bytes_with_stats(&content)
    } else {
        let text = String::from_utf8(content)
            .with_context(|| format!("{} is not a UTF-8 text (use --binary to compress raw bytes)", path.display()))?;
        static_huffman::serialize_data_with_stats(&text)
    };
    encoded.with_context(|| format!("cannot compress {}", path.display()))
}

/// Decompresses the `container` read from `path`. Returns the content and the statistics.
fn decode(conf: &Conf, path: &Path, container: &[u8]) -> anyhow::Result<(Vec<u8>, DecodingStats)> {
    let decoded = if conf.binary {
        static_huffman::deserialize_bytes_with_stats(container)
    } else {
        static_huffman::deserialize_data_with_stats(container).map(|(text, stats)| (text.into_bytes(), stats))
    };
    decoded.with_context(|| format!("cannot decompress {}", path.display()))
}

fn run(conf: &Conf) -> anyhow::Result<()> {
    match &conf.command {
        Command::Encode { input, output } => {
            let (container, stats) = encode(conf, input, read(input)?)?;
            write(output, &container)?;
            if conf.verbose { println!("{}", stats); }
        }
        Command::Decode { input, output } => {
            let (content, stats) = decode(conf, input, &read(input)?)?;
            write(output, &content)?;
            if conf.verbose { println!("{}", stats); }
        }
        Command::Stats { input } => {
            let content = read(input)?;
            let (container, stats) = encode(conf, input, content.clone())?;
            println!("{}", stats);
            let (decoded, decoding_stats) = decode(conf, input, &container)?;
            if decoded != content { bail!("decompressed content of {} differs from the original", input.display()); }
            if conf.verbose { println!("{}", decoding_stats); }
            println!("Round trip:        OK");
        }
    }
    Ok(())
}

/// Returns the exit code for `error`: 2 for malformed containers, 1 for everything else.
fn exit_code(error: &anyhow::Error) -> u8 {
    match error.downcast_ref::<Error>() {
        Some(e) if e.is_malformed_input() => 2,
        _ => 1
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let conf: Conf = Conf::parse();
    match run(&conf) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            log::debug!("{:?}", error);
            eprintln!("Error: {:#}", error);
            ExitCode::from(exit_code(&error))
        }
    }
}

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use huffman_text::{CodingConfig, CodingError, HuffmanCoder, EMPTY_INPUT_MESSAGE};

/// Huffman-encode the first line of a text file and report the space saved.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(long)]
    input_dir: Option<PathBuf>,

    #[arg(short, long)]
    input_file: Option<String>,

    /// Encode this text instead of reading the input file
    #[arg(short, long)]
    text: Option<String>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Fail on encoded bits that match no code
    #[arg(long)]
    strict: bool,
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => CodingConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => CodingConfig::default(),
    };
    if let Some(dir) = args.input_dir {
        config.input_dir = dir;
    }
    if let Some(file) = args.input_file {
        config.input_file = file;
    }
    config.strict_decode |= args.strict;

    let coder = HuffmanCoder::new(config);
    let result = match &args.text {
        Some(text) => coder.run(text),
        None => coder.run_from_input(),
    };

    let report = match result {
        Ok(report) => report,
        Err(CodingError::EmptyInput) => {
            println!("{EMPTY_INPUT_MESSAGE}");
            return Ok(());
        }
        Err(e) => return Err(e).context("encoding input"),
    };

    if args.json {
        println!("{}", report.to_json()?);
    } else {
        println!("{report}");
    }
    Ok(())
}

//! huffman-text: deterministic Huffman prefix coding of text.
//!
//! Pipeline:
//! - count symbol frequencies of the input text
//! - seed an ordered candidate list with one leaf per symbol
//! - merge the two lightest candidates until a single root remains
//! - derive `'0'`/`'1'` codes by walking from the root to each symbol
//! - encode the text and decode it back by greedy prefix matching
//!
//! Equal weights are resolved by the candidate list's placement rule, so the
//! same input always yields the same tree and the same codes.

pub mod candidates;
pub mod code_table;
pub mod config;
pub mod error;
pub mod frequency;
pub mod report;
pub mod symbol_map;
pub mod tree;

use std::fs::File;
use std::io::{BufRead, BufReader};

use tracing::debug;

pub use crate::code_table::CodeTable;
pub use crate::config::CodingConfig;
pub use crate::error::{CodingError, Result};
pub use crate::frequency::FrequencyDistribution;
pub use crate::report::CompressionReport;
pub use crate::tree::{HuffmanTree, MergeTreeBuilder};

use crate::symbol_map::SimpleHashBuilder;

/// Shown instead of a report when the input holds no text.
pub const EMPTY_INPUT_MESSAGE: &str =
    "Input Data Is Empty! Try Again with a File that has data inside!";

/// Everything produced while encoding one text.
#[derive(Debug, Clone)]
pub struct EncodedText {
    pub frequencies: FrequencyDistribution,
    pub tree: HuffmanTree,
    pub table: CodeTable,
    pub bits: String,
}

/// The main coding engine
pub struct HuffmanCoder {
    config: CodingConfig,
}

impl Default for HuffmanCoder {
    fn default() -> Self {
        Self::new(CodingConfig::default())
    }
}

impl HuffmanCoder {
    /// Create a coder with the given configuration
    pub fn new(config: CodingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CodingConfig {
        &self.config
    }

    /// First line of the configured input file; empty if the file is empty.
    pub fn load_input(&self) -> Result<String> {
        let path = self.config.input_path();
        let unavailable = |source| CodingError::ResourceUnavailable {
            path: path.clone(),
            source,
        };
        let file = File::open(&path).map_err(unavailable)?;
        let line = BufReader::new(file)
            .lines()
            .next()
            .transpose()
            .map_err(unavailable)?
            .unwrap_or_default();
        debug!(path = %path.display(), bytes = line.len(), "loaded input");
        Ok(line)
    }

    /// Count, build the tree, derive codes and encode `text`
    pub fn encode(&self, text: &str) -> Result<EncodedText> {
        if text.is_empty() {
            return Err(CodingError::EmptyInput);
        }
        let frequencies = frequency::count(text);
        let tree = tree::build_tree(&frequencies)?;
        let table =
            CodeTable::derive_with(&tree, &self.config.single_symbol_code, SimpleHashBuilder)?;
        let bits = table.encode(text)?;
        Ok(EncodedText {
            frequencies,
            tree,
            table,
            bits,
        })
    }

    /// Decode the bits of `encoded`, strictly if configured
    pub fn decode(&self, encoded: &EncodedText) -> Result<String> {
        if self.config.strict_decode {
            encoded.table.decode_strict(&encoded.bits)
        } else {
            Ok(encoded.table.decode(&encoded.bits))
        }
    }

    /// Encode, decode and summarise `text`.
    pub fn run(&self, text: &str) -> Result<CompressionReport> {
        let encoded = self.encode(text)?;
        let decoded = self.decode(&encoded)?;
        CompressionReport::new(
            &encoded.frequencies,
            &encoded.table,
            text,
            encoded.bits,
            decoded,
            self.config.report_precision,
        )
    }

    /// [`run`](Self::run) over the configured input file.
    pub fn run_from_input(&self) -> Result<CompressionReport> {
        let text = self.load_input()?;
        self.run(&text)
    }
}

//! Configuration for huffman-text

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::code_table::is_bit_string;
use crate::error::{CodingError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodingConfig {
    pub input_dir: PathBuf,
    pub input_file: String,
    /// Code assigned when the input holds a single distinct symbol.
    pub single_symbol_code: String,
    pub strict_decode: bool,
    pub report_precision: usize,
}

impl Default for CodingConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("inputData"),
            input_file: "input1.txt".to_string(),
            single_symbol_code: "0".to_string(),
            strict_decode: false,
            report_precision: 2,
        }
    }
}

impl CodingConfig {
    /// Load a JSON config; absent fields keep their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| CodingError::ResourceUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self =
            serde_json::from_str(&raw).map_err(|e| CodingError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Full path of the input source.
    pub fn input_path(&self) -> PathBuf {
        self.input_dir.join(&self.input_file)
    }

    pub fn validate(&self) -> Result<()> {
        let code = &self.single_symbol_code;
        if !is_bit_string(code) {
            return Err(CodingError::Config(format!(
                "single_symbol_code must be a non-empty bit string, got {code:?}"
            )));
        }
        Ok(())
    }
}

//! Byte-savings report for an encoded text

use std::fmt;
use std::hash::BuildHasher;

use serde::Serialize;

use crate::candidates::{OrderedCandidateList, Weighted};
use crate::code_table::CodeTable;
use crate::error::{CodingError, Result};
use crate::frequency::FrequencyDistribution;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SymbolRow {
    pub symbol: char,
    pub frequency: u64,
    pub code: String,
}

impl Weighted for SymbolRow {
    fn weight(&self) -> u64 {
        self.frequency
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CompressionReport {
    /// Descending frequency.
    pub rows: Vec<SymbolRow>,
    pub original: String,
    pub encoded: String,
    pub decoded: String,
    pub original_bytes: usize,
    pub encoded_bytes: usize,
    pub savings_percent: f64,
    #[serde(skip)]
    pub precision: usize,
}

impl CompressionReport {
    pub fn new<H, S>(
        freq: &FrequencyDistribution<H>,
        table: &CodeTable<S>,
        original: &str,
        encoded: String,
        decoded: String,
        precision: usize,
    ) -> Result<Self>
    where
        H: BuildHasher,
        S: BuildHasher + Clone,
    {
        // ascending with the candidate tie-break, read back to front
        let mut sorted = OrderedCandidateList::new();
        for (&symbol, &frequency) in freq.iter() {
            let code = table
                .get(symbol)
                .ok_or(CodingError::UnknownSymbol(symbol))?
                .to_string();
            sorted.insert(SymbolRow {
                symbol,
                frequency,
                code,
            })?;
        }
        let rows = sorted.into_vec().into_iter().rev().collect();

        let original_bytes = original.len();
        let encoded_bytes = encoded.len().div_ceil(8);
        let savings_percent = savings_percent(original_bytes, encoded_bytes);

        Ok(Self {
            rows,
            original: original.to_string(),
            encoded,
            decoded,
            original_bytes,
            encoded_bytes,
            savings_percent,
            precision,
        })
    }

    pub fn round_trips(&self) -> bool {
        self.original == self.decoded
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| CodingError::Serialization(e.to_string()))
    }
}

/// `100 - encoded / original * 100`; zero for an empty original.
pub fn savings_percent(original_bytes: usize, encoded_bytes: usize) -> f64 {
    if original_bytes == 0 {
        return 0.0;
    }
    100.0 - (encoded_bytes as f64 / original_bytes as f64 * 100.0)
}

impl fmt::Display for CompressionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Symbol\tFrequency   Code")?;
        writeln!(f, "------\t---------   ----")?;
        for row in &self.rows {
            writeln!(f, "{}\t{}\t    {}", row.symbol, row.frequency, row.code)?;
        }
        writeln!(f)?;
        writeln!(f, "Original String: \n{}", self.original)?;
        writeln!(f, "Encoded String: \n{}", self.encoded)?;
        writeln!(f, "Decoded String: \n{}\n", self.decoded)?;
        writeln!(f, "The original string requires {} bytes.", self.original_bytes)?;
        writeln!(f, "The encoded string requires {} bytes.", self.encoded_bytes)?;
        write!(
            f,
            "Difference in space required is {:.*}%.",
            self.precision, self.savings_percent
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{frequency, tree::build_tree};

    fn report_for(text: &str) -> CompressionReport {
        let freq = frequency::count(text);
        let table = CodeTable::derive_from(&build_tree(&freq).unwrap());
        let encoded = table.encode(text).unwrap();
        let decoded = table.decode(&encoded);
        CompressionReport::new(&freq, &table, text, encoded, decoded, 2).unwrap()
    }

    #[test]
    fn test_rows_descending_frequency() {
        let report = report_for("abracadabra");
        let symbols: String = report.rows.iter().map(|r| r.symbol).collect();
        assert_eq!(symbols, "arbdc");
        assert_eq!(report.rows[0].code, "0");
        assert_eq!(report.rows[0].frequency, 5);
    }

    #[test]
    fn test_byte_counts_and_savings() {
        let report = report_for("abracadabra");
        assert_eq!(report.original_bytes, 11);
        assert_eq!(report.encoded_bytes, 3);
        assert!((report.savings_percent - 72.7272).abs() < 0.001);
        assert!(report.round_trips());
    }

    #[test]
    fn test_display_two_decimals() {
        let text = report_for("abracadabra").to_string();
        assert!(text.starts_with("Symbol\tFrequency   Code\n"));
        assert!(text.contains("a\t5\t    0\n"));
        assert!(text.contains("Encoded String: \n01111001101011000111100\n"));
        assert!(text.ends_with("Difference in space required is 72.73%."));
    }

    #[test]
    fn test_single_symbol_savings() {
        let report = report_for("aaaa");
        assert_eq!(report.encoded, "0000");
        assert_eq!(report.encoded_bytes, 1);
        assert!((report.savings_percent - 75.0).abs() < 1e-9);
        assert!(report.to_string().ends_with("75.00%."));
    }

    #[test]
    fn test_json_output() {
        let json = report_for("aabb").to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["original_bytes"], 4);
        assert_eq!(value["rows"].as_array().unwrap().len(), 2);
        assert!(value.get("precision").is_none());
    }

    #[test]
    fn test_savings_of_empty_original() {
        assert_eq!(savings_percent(0, 0), 0.0);
    }
}

//! Symbol codes derived from a finished merge tree
//!
//! Codes are strings of literal `'0'`/`'1'` characters. Decoding matches the
//! growing bit prefix against the table rather than walking the tree.

use std::hash::BuildHasher;

use tracing::{debug, warn};

use crate::error::{CodingError, Result};
use crate::frequency::FrequencyDistribution;
use crate::symbol_map::{SimpleHashBuilder, SymbolMap};
use crate::tree::HuffmanTree;

/// Code used for the lone symbol of a one-symbol tree unless configured otherwise.
pub const DEFAULT_SINGLE_SYMBOL_CODE: &str = "0";

#[derive(Debug, Clone)]
pub struct CodeTable<S = SimpleHashBuilder> {
    codes: SymbolMap<char, String, S>,
    symbols: SymbolMap<String, char, S>,
}

impl CodeTable<SimpleHashBuilder> {
    /// Derive codes with the default single-symbol code and hasher.
    pub fn derive_from(tree: &HuffmanTree) -> Self {
        Self::derive_unchecked(tree, DEFAULT_SINGLE_SYMBOL_CODE, SimpleHashBuilder)
    }
}

/// Non-empty and made only of `'0'`/`'1'`.
pub fn is_bit_string(code: &str) -> bool {
    !code.is_empty() && code.chars().all(|c| c == '0' || c == '1')
}

impl<S: BuildHasher + Clone> CodeTable<S> {
    /// One entry per distinct symbol of the root label, in label order.
    ///
    /// `single_symbol_code` is only used when the root is a leaf and must be
    /// a non-empty bit string.
    pub fn derive_with(tree: &HuffmanTree, single_symbol_code: &str, hasher: S) -> Result<Self> {
        if !is_bit_string(single_symbol_code) {
            return Err(CodingError::InvalidArgument(format!(
                "single-symbol code must be a non-empty bit string, got {single_symbol_code:?}"
            )));
        }
        Ok(Self::derive_unchecked(tree, single_symbol_code, hasher))
    }

    fn derive_unchecked(tree: &HuffmanTree, single_symbol_code: &str, hasher: S) -> Self {
        let alphabet = &tree.root_node().label;
        let capacity = alphabet.chars().count();
        let mut codes = SymbolMap::with_capacity_and_hasher(capacity, hasher.clone());
        let mut symbols = SymbolMap::with_capacity_and_hasher(capacity, hasher);

        for symbol in alphabet.chars() {
            if codes.contains_key(&symbol) {
                continue;
            }
            let mut code = trace_path(tree, symbol);
            if code.is_empty() {
                code = single_symbol_code.to_string();
            }
            symbols.insert(code.clone(), symbol);
            codes.insert(symbol, code);
        }

        debug!(symbols = codes.len(), "derived code table");
        Self { codes, symbols }
    }

    /// Code of `symbol`, if it has one.
    pub fn get(&self, symbol: char) -> Option<&str> {
        self.codes.get(&symbol).map(String::as_str)
    }

    /// Symbol whose code is exactly `code`.
    pub fn symbol_for(&self, code: &str) -> Option<char> {
        self.symbols.get(&code.to_string()).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, &str)> {
        self.codes.iter().map(|(&c, code)| (c, code.as_str()))
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Concatenate the code of every character of `text`.
    pub fn encode(&self, text: &str) -> Result<String> {
        let mut out = String::new();
        for symbol in text.chars() {
            let code = self.get(symbol).ok_or(CodingError::UnknownSymbol(symbol))?;
            out.push_str(code);
        }
        debug!(chars = text.chars().count(), bits = out.len(), "encoded text");
        Ok(out)
    }

    /// Greedy prefix decode. An unmatched tail is dropped.
    pub fn decode(&self, bits: &str) -> String {
        let (text, tail) = self.decode_prefix(bits);
        if let Some(position) = tail {
            warn!(position, "dropping trailing bits with no matching code");
        }
        text
    }

    /// Like [`decode`](Self::decode), but an unmatched tail is an error.
    pub fn decode_strict(&self, bits: &str) -> Result<String> {
        match self.decode_prefix(bits) {
            (text, None) => Ok(text),
            (_, Some(position)) => Err(CodingError::MalformedBits { position }),
        }
    }

    /// Total encoded length of a text with the given distribution.
    pub fn encoded_bit_len<H: BuildHasher>(&self, freq: &FrequencyDistribution<H>) -> Result<u64> {
        let mut bits = 0u64;
        for (&symbol, &count) in freq.iter() {
            let code = self.get(symbol).ok_or(CodingError::UnknownSymbol(symbol))?;
            bits += code.len() as u64 * count;
        }
        Ok(bits)
    }

    /// No code is a proper prefix of another.
    pub fn is_prefix_free(&self) -> bool {
        let codes: Vec<&str> = self.codes.values().map(String::as_str).collect();
        codes.iter().enumerate().all(|(i, a)| {
            codes
                .iter()
                .enumerate()
                .all(|(j, b)| i == j || !b.starts_with(a))
        })
    }

    /// Decoded text plus the byte offset of an unmatched tail, if any.
    fn decode_prefix(&self, bits: &str) -> (String, Option<usize>) {
        let mut out = String::new();
        let mut start = 0;
        let mut candidate = String::new();
        for (i, bit) in bits.char_indices() {
            candidate.push(bit);
            if let Some(&symbol) = self.symbols.get(&candidate) {
                out.push(symbol);
                candidate.clear();
                start = i + bit.len_utf8();
            }
        }
        let tail = (!candidate.is_empty()).then_some(start);
        (out, tail)
    }
}

fn trace_path(tree: &HuffmanTree, symbol: char) -> String {
    let mut code = String::new();
    let mut node = tree.root_node();
    while let (Some(left), Some(right)) = (node.left(), node.right()) {
        if tree.node(left).label.contains(symbol) {
            code.push('0');
            node = tree.node(left);
        } else {
            code.push('1');
            node = tree.node(right);
        }
    }
    code
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{frequency, tree::build_tree};

    fn table_for(text: &str) -> CodeTable {
        CodeTable::derive_from(&build_tree(&frequency::count(text)).unwrap())
    }

    #[test]
    fn test_abracadabra_codes() {
        let table = table_for("abracadabra");
        let codes: Vec<(char, &str)> = table.iter().collect();
        assert_eq!(
            codes,
            vec![
                ('a', "0"),
                ('r', "10"),
                ('b', "111"),
                ('c', "1101"),
                ('d', "1100"),
            ]
        );
        assert!(table.is_prefix_free());
    }

    #[test]
    fn test_encode_decode_abracadabra() {
        let table = table_for("abracadabra");
        let bits = table.encode("abracadabra").unwrap();
        assert_eq!(bits, "01111001101011000111100");
        assert_eq!(table.decode(&bits), "abracadabra");
    }

    #[test]
    fn test_encoded_bit_len_matches_encode() {
        let freq = frequency::count("abracadabra");
        let table = CodeTable::derive_from(&build_tree(&freq).unwrap());
        assert_eq!(table.encoded_bit_len(&freq).unwrap(), 23);
    }

    #[test]
    fn test_equal_pair_codes() {
        let table = table_for("aabb");
        assert_eq!(table.get('a'), Some("1"));
        assert_eq!(table.get('b'), Some("0"));
    }

    #[test]
    fn test_single_symbol_convention() {
        let table = table_for("aaaa");
        assert_eq!(table.get('a'), Some("0"));
        let bits = table.encode("aaaa").unwrap();
        assert_eq!(bits, "0000");
        assert_eq!(table.decode(&bits), "aaaa");
    }

    #[test]
    fn test_single_symbol_custom_code() {
        let tree = build_tree(&frequency::count("zz")).unwrap();
        let table = CodeTable::derive_with(&tree, "1", SimpleHashBuilder).unwrap();
        assert_eq!(table.encode("zz").unwrap(), "11");
        assert_eq!(table.symbol_for("1"), Some('z'));
    }

    #[test]
    fn test_single_symbol_code_must_be_bits() {
        let tree = build_tree(&frequency::count("aaaa")).unwrap();
        for code in ["", "01a", " "] {
            assert!(matches!(
                CodeTable::derive_with(&tree, code, SimpleHashBuilder),
                Err(CodingError::InvalidArgument(_))
            ));
        }
        assert!(is_bit_string("10"));
    }

    #[test]
    fn test_unknown_symbol() {
        let table = table_for("abc");
        assert!(matches!(
            table.encode("abx"),
            Err(CodingError::UnknownSymbol('x'))
        ));
    }

    #[test]
    fn test_decode_drops_unmatched_tail() {
        let table = table_for("abracadabra");
        // "0" -> a, "110" is an incomplete code
        assert_eq!(table.decode("0110"), "a");
    }

    #[test]
    fn test_decode_strict_reports_tail() {
        let table = table_for("abracadabra");
        assert!(matches!(
            table.decode_strict("0110"),
            Err(CodingError::MalformedBits { position: 1 })
        ));
        assert_eq!(table.decode_strict("010").unwrap(), "ar");
    }

    #[test]
    fn test_decode_empty_bits() {
        let table = table_for("abc");
        assert_eq!(table.decode(""), "");
        assert_eq!(table.decode_strict("").unwrap(), "");
    }
}

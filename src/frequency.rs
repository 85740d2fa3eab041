//! Symbol frequency distribution

use std::hash::BuildHasher;

use tracing::debug;

use crate::symbol_map::{SimpleHashBuilder, SymbolMap};

/// Occurrence count per symbol, in first-seen order.
pub type FrequencyDistribution<S = SimpleHashBuilder> = SymbolMap<char, u64, S>;

/// Count every character of `text` using the default hashing strategy.
pub fn count(text: &str) -> FrequencyDistribution {
    count_with_hasher(text, SimpleHashBuilder)
}

pub fn count_with_hasher<S: BuildHasher>(text: &str, hasher: S) -> FrequencyDistribution<S> {
    // worst case every character is distinct
    let mut freq = SymbolMap::with_capacity_and_hasher(text.len(), hasher);
    for symbol in text.chars() {
        match freq.get_mut(&symbol) {
            Some(n) => *n += 1,
            None => {
                freq.insert(symbol, 1);
            }
        }
    }
    debug!(
        symbols = freq.len(),
        chars = text.chars().count(),
        "counted frequency distribution"
    );
    freq
}

/// Sum of all counts; equals the character length of the counted text.
pub fn total<S: BuildHasher>(freq: &FrequencyDistribution<S>) -> u64 {
    freq.values().sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::RandomState;

    #[test]
    fn test_abracadabra() {
        let freq = count("abracadabra");
        let pairs: Vec<(char, u64)> = freq.iter().map(|(&c, &n)| (c, n)).collect();
        assert_eq!(pairs, vec![('a', 5), ('b', 2), ('r', 2), ('c', 1), ('d', 1)]);
        assert_eq!(total(&freq), 11);
    }

    #[test]
    fn test_single_symbol() {
        let freq = count("aaaa");
        assert_eq!(freq.len(), 1);
        assert_eq!(freq.get(&'a'), Some(&4));
    }

    #[test]
    fn test_empty_text() {
        assert!(count("").is_empty());
    }

    #[test]
    fn test_multibyte_chars_count_once() {
        let freq = count("ñañ");
        assert_eq!(freq.get(&'ñ'), Some(&2));
        assert_eq!(total(&freq), 3);
    }

    #[test]
    fn test_injected_hasher() {
        let freq = count_with_hasher("hello", RandomState::new());
        assert_eq!(freq.get(&'l'), Some(&2));
        assert_eq!(freq.keys().copied().collect::<String>(), "helo");
    }
}

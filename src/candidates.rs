//! Ordered candidate list driving tree construction
//!
//! A sequence kept ascending by weight. Equal weights are not placed FIFO:
//! a value whose weight equals the current head goes directly after the
//! head, while a value heavier than the head goes in front of the first
//! entry whose weight is at least its own. Merge order, and therefore code
//! lengths, depend on this placement, which is why a `BinaryHeap` is not
//! used here.

use crate::error::{CodingError, Result};

/// Anything that can be ordered by an integer weight.
pub trait Weighted {
    fn weight(&self) -> u64;
}

#[derive(Debug, Clone)]
pub struct OrderedCandidateList<T> {
    items: Vec<T>,
}

impl<T> Default for OrderedCandidateList<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Weighted> OrderedCandidateList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert keeping ascending weight order. Zero weights are rejected.
    pub fn insert(&mut self, value: T) -> Result<()> {
        let weight = value.weight();
        if weight == 0 {
            return Err(CodingError::InvalidArgument(
                "candidate weight must be at least 1".into(),
            ));
        }

        let position = match self.items.first() {
            None => 0,
            Some(head) if head.weight() > weight => 0,
            Some(head) if head.weight() == weight => 1,
            Some(_) => self.items[1..]
                .iter()
                .position(|item| item.weight() >= weight)
                .map_or(self.items.len(), |i| i + 1),
        };
        self.items.insert(position, value);
        Ok(())
    }

    /// Remove and return the entry at `index`.
    pub fn remove_at(&mut self, index: usize) -> Result<T> {
        self.check_index(index)?;
        Ok(self.items.remove(index))
    }

    /// Entry at `index` without removing it.
    pub fn get(&self, index: usize) -> Result<&T> {
        self.check_index(index)?;
        Ok(&self.items[index])
    }

    /// Index of the first entry with the same weight as `value`.
    pub fn first_index_of(&self, value: &T) -> Option<usize> {
        let weight = value.weight();
        self.items.iter().position(|item| item.weight() == weight)
    }

    /// Remove the first weight-equal entry; false if there was none.
    pub fn remove(&mut self, value: &T) -> bool {
        match self.first_index_of(value) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> {
        self.items.iter()
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.items.len() {
            return Err(CodingError::OutOfRange {
                index,
                len: self.items.len(),
            });
        }
        Ok(())
    }
}

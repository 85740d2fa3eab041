//! Huffman merge tree
//!
//! Nodes live in an arena owned by [`HuffmanTree`] and refer to each other by
//! [`NodeId`]. Children are owned top-down through the arena; the parent link
//! is only an index used for upward queries.

use std::hash::BuildHasher;

use tracing::{debug, trace};

use crate::candidates::{OrderedCandidateList, Weighted};
use crate::error::{CodingError, Result};
use crate::frequency::FrequencyDistribution;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// A leaf (one symbol) or a merged group of symbols.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    pub weight: u64,
    /// Symbols under this node, concatenated in merge order.
    pub label: String,
    children: Option<(NodeId, NodeId)>,
    parent: Option<NodeId>,
}

impl TreeNode {
    fn leaf(symbol: char, weight: u64) -> Self {
        Self {
            weight,
            label: symbol.to_string(),
            children: None,
            parent: None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    pub fn left(&self) -> Option<NodeId> {
        self.children.map(|(l, _)| l)
    }

    pub fn right(&self) -> Option<NodeId> {
        self.children.map(|(_, r)| r)
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    nodes: Vec<TreeNode>,
    root: NodeId,
}

impl HuffmanTree {
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn root_node(&self) -> &TreeNode {
        &self.nodes[self.root.0]
    }

    /// Panics if `id` was issued by a different tree.
    pub fn node(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id.0]
    }

    /// Number of nodes, leaves and internal.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Panics if `id` was issued by a different tree.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// Edges between `id` and the root.
    pub fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            depth += 1;
            current = parent;
        }
        depth
    }

    pub fn leaves(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.is_leaf())
            .map(|(i, _)| NodeId(i))
    }

    pub fn leaf_for(&self, symbol: char) -> Option<NodeId> {
        self.leaves().find(|&id| self.nodes[id.0].label.starts_with(symbol))
    }

    /// Code length implied by the tree shape; 0 when the root is the only leaf.
    pub fn code_length(&self, symbol: char) -> Option<usize> {
        self.leaf_for(symbol).map(|id| self.depth(id))
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &TreeNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    id: NodeId,
    weight: u64,
}

impl Weighted for Candidate {
    fn weight(&self) -> u64 {
        self.weight
    }
}

/// Drains a seeded candidate list into a single root by repeated merging.
#[derive(Debug)]
pub struct MergeTreeBuilder {
    nodes: Vec<TreeNode>,
    candidates: OrderedCandidateList<Candidate>,
}

impl MergeTreeBuilder {
    /// One leaf per distinct symbol, inserted in the distribution's enumeration order.
    pub fn seed<S: BuildHasher>(freq: &FrequencyDistribution<S>) -> Result<Self> {
        let mut nodes = Vec::with_capacity(freq.len().saturating_mul(2));
        let mut candidates = OrderedCandidateList::new();
        for (&symbol, &weight) in freq.iter() {
            let id = NodeId(nodes.len());
            nodes.push(TreeNode::leaf(symbol, weight));
            candidates.insert(Candidate { id, weight })?;
        }
        Ok(Self { nodes, candidates })
    }

    /// Labels of the pending candidates, lowest weight first.
    pub fn pending(&self) -> Vec<(&str, u64)> {
        self.candidates
            .iter()
            .map(|c| (self.nodes[c.id.0].label.as_str(), c.weight))
            .collect()
    }

    pub fn build(mut self) -> Result<HuffmanTree> {
        if self.candidates.is_empty() {
            return Err(CodingError::InvalidArgument(
                "cannot build a tree from an empty distribution".into(),
            ));
        }

        while self.candidates.len() > 1 {
            let a = *self.candidates.get(0)?;
            let b = *self.candidates.get(1)?;
            let (left, right) = if a.weight < b.weight {
                (a.id, b.id)
            } else {
                (b.id, a.id)
            };

            let parent = NodeId(self.nodes.len());
            let label = format!("{}{}", self.nodes[a.id.0].label, self.nodes[b.id.0].label);
            let weight = a.weight + b.weight;
            trace!(%label, weight, "merging candidates");
            self.nodes.push(TreeNode {
                weight,
                label,
                children: Some((left, right)),
                parent: None,
            });
            self.nodes[a.id.0].parent = Some(parent);
            self.nodes[b.id.0].parent = Some(parent);

            self.candidates.remove_at(0)?;
            self.candidates.remove_at(0)?;
            self.candidates.insert(Candidate { id: parent, weight })?;
        }

        let root = self.candidates.remove_at(0)?.id;
        debug!(
            nodes = self.nodes.len(),
            weight = self.nodes[root.0].weight,
            "built merge tree"
        );
        Ok(HuffmanTree {
            nodes: self.nodes,
            root,
        })
    }
}

/// Seed and build in one step.
pub fn build_tree<S: BuildHasher>(freq: &FrequencyDistribution<S>) -> Result<HuffmanTree> {
    MergeTreeBuilder::seed(freq)?.build()
}

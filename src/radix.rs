// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Radix tree index: a compressed trie over corpus suffixes or whole strings.
//!
//! Nodes live in one arena (`Vec<Node>`) and refer to each other by index. Edge labels
//! are never stored; an edge into `v` spells `symbols[v.pos + parent.depth .. v.pos + v.depth]`,
//! where `pos` is the start of any suffix in `v`'s subtree.
//!
//! Every leaf edge ends with its string's sentinel. Because sentinels are unique,
//! no suffix is a prefix of another, every suffix ends at its own leaf, and every
//! internal node other than the root branches.
//!
//! # Modes
//!
//! - [`RadixMode::Suffix`]: a suffix tree over every data suffix, built in O(n) from the
//!   suffix array and its LCP array. Leaves are in suffix-array order, so a node's
//!   `[lo, hi)` leaf interval is exactly the suffix-array match range.
//! - [`RadixMode::WholeString`]: a trie of whole strings, built by insertion with edge
//!   splitting. Every query is a whole-string prefix query and yields `(id, 0)`.

use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::corpus::Corpus;
use crate::error::{HaystackError, QueryError, Result};
use crate::haystack::{Haystack, Occurrences};
use crate::sais::{kasai, SuffixArray, SuffixArrayOptions};
use crate::types::{MatchRange, Offset, StringId, Symbol};

#[cfg(debug_assertions)]
use crate::contracts;

type NodeId = u32;

const ROOT: NodeId = 0;

/// What the tree indexes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RadixMode {
    /// Every suffix of every string.
    #[default]
    Suffix,
    /// Whole strings only.
    WholeString,
}

/// Options for [`RadixTreeIndex::build`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RadixTreeOptions {
    pub mode: RadixMode,
}

#[derive(Debug, Clone)]
struct Node {
    /// String depth: symbols from the root to this node.
    depth: u32,
    /// Start of a suffix (or string) in this subtree.
    pos: Offset,
    /// Leaf interval `[lo, hi)` into `leaves`.
    lo: u32,
    hi: u32,
    parent: Option<NodeId>,
    /// `(first edge symbol, child)`, sorted by symbol.
    children: Vec<(Symbol, NodeId)>,
}

impl Node {
    fn new(depth: u32, pos: Offset, parent: Option<NodeId>) -> Self {
        Self {
            depth,
            pos,
            lo: 0,
            hi: 0,
            parent,
            children: Vec::new(),
        }
    }

    #[inline]
    fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Where a descent stopped: `matched_on_edge` symbols down the edge into `node`.
///
/// When `matched_on_edge` equals the edge length the locus is the node itself;
/// otherwise it sits inside the edge, an implicit node the tree never materializes.
/// Either way the match set is `node`'s subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Locus {
    node: NodeId,
    matched_on_edge: u32,
}

/// Haystack backed by a radix tree.
#[derive(Debug, Clone)]
pub struct RadixTreeIndex {
    corpus: Arc<Corpus>,
    mode: RadixMode,
    nodes: Vec<Node>,
    /// Leaf suffix starts in DFS order.
    leaves: Vec<Offset>,
}

impl RadixTreeIndex {
    pub fn build(corpus: Arc<Corpus>, options: &RadixTreeOptions) -> Result<Self> {
        match options.mode {
            RadixMode::Suffix => {
                let suffix_array =
                    SuffixArray::build(&corpus, &SuffixArrayOptions { compute_lcp: true })?;
                Self::from_suffix_array(corpus, suffix_array)
            }
            RadixMode::WholeString => Self::build_whole_strings(corpus),
        }
    }

    /// Build a suffix-mode tree from an existing suffix array over `corpus`.
    ///
    /// The LCP array is computed if the suffix array was built without it.
    pub fn from_suffix_array(corpus: Arc<Corpus>, suffix_array: SuffixArray) -> Result<Self> {
        let started = Instant::now();
        check_node_capacity(&corpus)?;

        let (sa, lcp) = suffix_array.into_parts();
        let lcp = match lcp {
            Some(lcp) => lcp,
            None => kasai(corpus.symbols(), &sa),
        };

        // Sentinel-only suffixes sort last and are not indexed.
        let data_len = corpus.data_len();
        let leaves = sa[..data_len].to_vec();

        let mut nodes = vec![Node::new(0, leaves.first().copied().unwrap_or(0), None)];
        let mut stack: Vec<NodeId> = vec![ROOT];

        for (i, &pos) in leaves.iter().enumerate() {
            let shared = if i == 0 { 0 } else { lcp[i] };

            let mut last = None;
            while let Some(&top) = stack.last() {
                if nodes[top as usize].depth <= shared {
                    break;
                }
                nodes[top as usize].hi = i as u32;
                last = stack.pop();
            }

            let top = stack.last().copied().unwrap_or(ROOT);
            if nodes[top as usize].depth < shared {
                // The popped branch and suffix `i` share more than `top`: split its edge.
                if let Some(last) = last {
                    let branch = nodes.len() as NodeId;
                    let mut node = Node::new(shared, pos, Some(top));
                    node.lo = nodes[last as usize].lo;
                    let key = edge_symbol(&corpus, &nodes[last as usize], shared);
                    node.children.push((key, last));
                    nodes.push(node);

                    nodes[last as usize].parent = Some(branch);
                    if let Some(slot) = nodes[top as usize].children.last_mut() {
                        slot.1 = branch;
                    }
                    stack.push(branch);
                }
            }

            let parent = stack.last().copied().unwrap_or(ROOT);
            let leaf = nodes.len() as NodeId;
            let mut node = Node::new(suffix_len(&corpus, pos), pos, Some(parent));
            node.lo = i as u32;
            node.hi = i as u32 + 1;
            let key = edge_symbol(&corpus, &node, nodes[parent as usize].depth);
            nodes.push(node);
            nodes[parent as usize].children.push((key, leaf));
            stack.push(leaf);
        }

        for id in stack {
            nodes[id as usize].hi = data_len as u32;
        }

        let index = Self {
            corpus,
            mode: RadixMode::Suffix,
            nodes,
            leaves,
        };
        #[cfg(debug_assertions)]
        index.check_invariants();

        log::debug!(
            "radix tree built: mode=suffix, {} nodes, {} leaves, {:?}",
            index.nodes.len(),
            index.leaves.len(),
            started.elapsed()
        );
        Ok(index)
    }

    fn build_whole_strings(corpus: Arc<Corpus>) -> Result<Self> {
        let started = Instant::now();
        check_node_capacity(&corpus)?;

        let mut nodes = vec![Node::new(0, 0, None)];
        for entry in corpus.string_table().entries() {
            insert_string(&corpus, &mut nodes, entry.start, entry.len + 1);
        }
        let leaves = assign_leaf_intervals(&mut nodes);

        let index = Self {
            corpus,
            mode: RadixMode::WholeString,
            nodes,
            leaves,
        };
        #[cfg(debug_assertions)]
        index.check_invariants();

        log::debug!(
            "radix tree built: mode=whole_string, {} nodes, {} leaves, {:?}",
            index.nodes.len(),
            index.leaves.len(),
            started.elapsed()
        );
        Ok(index)
    }

    #[inline]
    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    #[inline]
    pub fn mode(&self) -> RadixMode {
        self.mode
    }

    /// Nodes including the root.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn leaf_count(&self) -> usize {
        self.leaves.len()
    }

    /// The leaf interval matching `pattern`, over the DFS leaf order.
    ///
    /// In suffix mode this equals the suffix-array match range.
    pub fn match_range(&self, pattern: &[u8]) -> Result<MatchRange> {
        let pattern = self.corpus.encode_pattern(pattern)?;
        Ok(self.range_of(&pattern))
    }

    fn range_of(&self, pattern: &[u8]) -> MatchRange {
        match self.descend(pattern) {
            Some(locus) => {
                let node = &self.nodes[locus.node as usize];
                MatchRange::new(node.lo as usize, node.hi as usize)
            }
            None => MatchRange::empty(),
        }
    }

    fn descend(&self, pattern: &[u8]) -> Option<Locus> {
        let mut node = ROOT;
        let mut matched = 0;
        while matched < pattern.len() {
            let child = self.child(node, Symbol::from(pattern[matched]))?;
            let label = self.edge_label(child);
            let rest = &pattern[matched..];
            let take = label.len().min(rest.len());
            if !label[..take]
                .iter()
                .zip(&rest[..take])
                .all(|(&symbol, &byte)| symbol == Symbol::from(byte))
            {
                return None;
            }
            matched += take;
            if take < label.len() {
                return Some(Locus {
                    node: child,
                    matched_on_edge: take as u32,
                });
            }
            node = child;
        }
        Some(Locus {
            node,
            matched_on_edge: self.edge_label(node).len() as u32,
        })
    }

    fn child(&self, node: NodeId, symbol: Symbol) -> Option<NodeId> {
        let children = &self.nodes[node as usize].children;
        children
            .binary_search_by_key(&symbol, |&(key, _)| key)
            .ok()
            .map(|i| children[i].1)
    }

    fn edge_label(&self, node: NodeId) -> &[Symbol] {
        let n = &self.nodes[node as usize];
        let parent_depth = n.parent.map_or(0, |p| self.nodes[p as usize].depth);
        let start = n.pos as usize;
        &self.corpus.symbols()[start + parent_depth as usize..start + n.depth as usize]
    }

    fn occurrences(&self, pattern: &[u8]) -> Result<Occurrences<'_>> {
        let range = self.match_range(pattern)?;
        Ok(Occurrences::new(&self.corpus, &self.leaves[range.as_range()]))
    }

    /// The string starting at corpus offset `pos`, if `pos` is a string start.
    fn string_at(&self, pos: Offset) -> Option<StringId> {
        match self.corpus.locate(pos) {
            Some((id, 0)) => Some(id),
            _ => None,
        }
    }

    /// Highest-id (latest) whole string ending exactly at `node`.
    fn terminus_at(&self, node: NodeId) -> Option<StringId> {
        self.nodes[node as usize]
            .children
            .iter()
            .rev()
            .filter(|&&(key, _)| Corpus::is_sentinel(key))
            .find_map(|&(_, leaf)| self.string_at(self.nodes[leaf as usize].pos))
    }

    /// The longest indexed string that is a prefix of `query`.
    ///
    /// Identical strings resolve to the highest id, the one inserted last.
    pub fn longest_prefix(&self, query: &[u8]) -> Result<Option<StringId>> {
        let query = self.corpus.encode_pattern(query)?;
        let mut best = None;
        let mut node = ROOT;
        let mut matched = 0;

        loop {
            if let Some(id) = self.terminus_at(node) {
                best = Some(id);
            }
            let Some(&byte) = query.get(matched) else {
                break;
            };
            let Some(child) = self.child(node, Symbol::from(byte)) else {
                break;
            };

            let label = self.edge_label(child);
            let mut along = 0;
            while along < label.len()
                && matched < query.len()
                && label[along] == Symbol::from(query[matched])
            {
                along += 1;
                matched += 1;
            }
            if along == label.len() {
                node = child;
                continue;
            }
            // A sentinel next on the edge means the query covers this leaf's suffix.
            if Corpus::is_sentinel(label[along]) {
                if let Some(id) = self.string_at(self.nodes[child as usize].pos) {
                    best = Some(id);
                }
            }
            break;
        }

        Ok(best)
    }

    /// Every indexed string, recovered from its leaf, in leaf order.
    pub fn whole_strings(&self) -> impl Iterator<Item = (StringId, Vec<u8>)> + '_ {
        self.leaves.iter().filter_map(move |&pos| {
            let id = self.string_at(pos)?;
            let bytes = self.corpus.string_bytes(id)?;
            Some((id, bytes))
        })
    }

    #[cfg(debug_assertions)]
    fn check_invariants(&self) {
        for (id, node) in self.nodes.iter().enumerate() {
            contracts::check_children_sorted(id, &node.children);
            if node.is_leaf() {
                contracts::check_leaf_interval(id, node.lo, node.hi);
                continue;
            }
            contracts::check_branching(id, id as NodeId == ROOT, node.children.len());
            for &(_, child) in &node.children {
                let child = &self.nodes[child as usize];
                contracts::check_interval_nested((node.lo, node.hi), (child.lo, child.hi));
            }
        }
    }
}

impl Haystack for RadixTreeIndex {
    fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    fn contains(&self, pattern: &[u8]) -> Result<bool> {
        let pattern = self.corpus.encode_pattern(pattern)?;
        Ok(self.descend(&pattern).is_some())
    }

    fn count(&self, pattern: &[u8]) -> Result<usize> {
        Ok(self.match_range(pattern)?.len())
    }

    fn locate(&self, pattern: &[u8]) -> Result<Occurrences<'_>> {
        self.occurrences(pattern)
    }

    fn enumerate_prefix(&self, pattern: &[u8]) -> Result<Occurrences<'_>> {
        self.occurrences(pattern)
    }

    fn enumerate_substring(&self, pattern: &[u8]) -> Result<Occurrences<'_>> {
        match self.mode {
            RadixMode::Suffix => self.occurrences(pattern),
            RadixMode::WholeString => Err(QueryError::SubstringUnsupported.into()),
        }
    }
}

/// Node ids are `u32`; a tree over `n` suffixes has fewer than `2n` nodes.
fn check_node_capacity(corpus: &Corpus) -> Result<()> {
    let bound = corpus.len().saturating_mul(2);
    if bound > NodeId::MAX as usize {
        return Err(HaystackError::capacity(
            "radix tree nodes",
            bound,
            NodeId::MAX as u64,
        ));
    }
    Ok(())
}

/// Suffix length from `pos`, sentinel included.
fn suffix_len(corpus: &Corpus, pos: Offset) -> u32 {
    corpus.suffix(pos).len() as u32
}

/// First symbol of the edge into `node` from a parent at `parent_depth`.
#[inline]
fn edge_symbol(corpus: &Corpus, node: &Node, parent_depth: u32) -> Symbol {
    corpus.symbols()[(node.pos + parent_depth) as usize]
}

/// Insert the `len` symbols at `start` (through the sentinel) into a whole-string trie.
fn insert_string(corpus: &Corpus, nodes: &mut Vec<Node>, start: Offset, len: u32) {
    let symbols = corpus.symbols();
    let at = |k: u32| symbols[(start + k) as usize];

    let mut node = ROOT;
    let mut matched = 0u32;
    loop {
        let key = at(matched);
        let slot = nodes[node as usize]
            .children
            .binary_search_by_key(&key, |&(k, _)| k);
        let child = match slot {
            Ok(i) => nodes[node as usize].children[i].1,
            Err(i) => {
                let leaf = nodes.len() as NodeId;
                nodes.push(Node::new(len, start, Some(node)));
                nodes[node as usize].children.insert(i, (key, leaf));
                return;
            }
        };

        let (child_pos, child_depth) = {
            let c = &nodes[child as usize];
            (c.pos, c.depth)
        };
        let edge_len = child_depth - matched;
        let mut along = 1;
        while along < edge_len && symbols[(child_pos + matched + along) as usize] == at(matched + along)
        {
            along += 1;
        }
        if along == edge_len {
            node = child;
            matched += along;
            continue;
        }

        // Mismatch inside the edge: split it at `matched + along`.
        let depth = matched + along;
        let branch = nodes.len() as NodeId;
        let mut split = Node::new(depth, child_pos, Some(node));
        let old_key = symbols[(child_pos + depth) as usize];
        let new_key = at(depth);
        let leaf = branch + 1;
        split.children = if old_key < new_key {
            vec![(old_key, child), (new_key, leaf)]
        } else {
            vec![(new_key, leaf), (old_key, child)]
        };
        nodes.push(split);
        nodes.push(Node::new(len, start, Some(branch)));
        nodes[child as usize].parent = Some(branch);
        if let Ok(i) = slot {
            nodes[node as usize].children[i].1 = branch;
        }
        return;
    }
}

/// DFS the tree in child order, filling leaf intervals. Returns the leaf order.
fn assign_leaf_intervals(nodes: &mut [Node]) -> Vec<Offset> {
    let mut leaves = Vec::new();
    // (node, children already pushed)
    let mut stack: Vec<(NodeId, bool)> = vec![(ROOT, false)];

    while let Some((id, expanded)) = stack.pop() {
        let node = &mut nodes[id as usize];
        if expanded {
            node.hi = leaves.len() as u32;
            continue;
        }
        node.lo = leaves.len() as u32;
        if node.is_leaf() {
            leaves.push(node.pos);
            node.hi = leaves.len() as u32;
            continue;
        }
        stack.push((id, true));
        stack.extend(node.children.iter().rev().map(|&(_, child)| (child, false)));
    }

    leaves
}

// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Interval tree: the range layer over query results.
//!
//! An AVL-balanced BST ordered by `(start, end)`, where every node also records the
//! largest `end` in its subtree. Intervals are half-open; `a` and `q` overlap iff
//! `a.start < q.end && q.start < a.end`.
//!
//! Overlap queries prune with the augmentation:
//!
//! - descend left only if `left.max_end > q.start` (something there ends after `q` starts)
//! - descend right only if `node.start < q.end` (everything right starts at or after `node`)
//!
//! which, with the tree balanced, costs O(log k + output).
//!
//! [`StringRegions`] keeps one tree per string, in string coordinates, so an
//! [`Occurrence`] can be resolved to the annotated regions it falls in.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::error::{QueryError, Result};
use crate::types::{Occurrence, StringId};

#[cfg(debug_assertions)]
use crate::contracts;

/// A half-open interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Interval {
    pub start: u64,
    pub end: u64,
}

impl Interval {
    /// Fails with `InvalidQuery` when `start > end`.
    pub fn new(start: u64, end: u64) -> Result<Self> {
        if start > end {
            return Err(QueryError::InvertedRange { start, end }.into());
        }
        Ok(Self { start, end })
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Non-empty intersection. An empty interval overlaps nothing.
    #[inline]
    pub fn overlaps(&self, other: &Interval) -> bool {
        !self.is_empty() && !other.is_empty() && self.start < other.end && other.start < self.end
    }
}

type Link<P> = Option<Box<Node<P>>>;

#[derive(Debug, Clone)]
struct Node<P> {
    interval: Interval,
    payload: P,
    max_end: u64,
    height: u32,
    left: Link<P>,
    right: Link<P>,
}

impl<P> Node<P> {
    fn leaf(interval: Interval, payload: P) -> Box<Self> {
        Box::new(Self {
            interval,
            payload,
            max_end: interval.end,
            height: 1,
            left: None,
            right: None,
        })
    }

    fn update(&mut self) {
        self.height = 1 + height(&self.left).max(height(&self.right));
        self.max_end = [&self.left, &self.right]
            .into_iter()
            .flatten()
            .map(|child| child.max_end)
            .fold(self.interval.end, u64::max);
    }

    fn balance_factor(&self) -> i64 {
        height(&self.left) as i64 - height(&self.right) as i64
    }

    #[cfg(debug_assertions)]
    fn check(&self) {
        let summary = |link: &Link<P>| link.as_ref().map(|n| (n.max_end, n.height));
        contracts::check_interval_node(
            self.interval.end,
            self.max_end,
            self.height,
            summary(&self.left),
            summary(&self.right),
        );
    }
}

#[inline]
fn height<P>(link: &Link<P>) -> u32 {
    link.as_ref().map_or(0, |node| node.height)
}

fn rotate_right<P>(mut node: Box<Node<P>>) -> Box<Node<P>> {
    match node.left.take() {
        Some(mut pivot) => {
            node.left = pivot.right.take();
            node.update();
            pivot.right = Some(node);
            pivot.update();
            pivot
        }
        None => node,
    }
}

fn rotate_left<P>(mut node: Box<Node<P>>) -> Box<Node<P>> {
    match node.right.take() {
        Some(mut pivot) => {
            node.right = pivot.left.take();
            node.update();
            pivot.left = Some(node);
            pivot.update();
            pivot
        }
        None => node,
    }
}

fn rebalance<P>(mut node: Box<Node<P>>) -> Box<Node<P>> {
    node.update();
    let factor = node.balance_factor();
    if factor > 1 {
        if node.left.as_ref().map_or(0, |l| l.balance_factor()) < 0 {
            node.left = node.left.take().map(rotate_left);
        }
        node = rotate_right(node);
    } else if factor < -1 {
        if node.right.as_ref().map_or(0, |r| r.balance_factor()) > 0 {
            node.right = node.right.take().map(rotate_right);
        }
        node = rotate_left(node);
    }

    #[cfg(debug_assertions)]
    node.check();

    node
}

fn insert_node<P>(link: Link<P>, new: Box<Node<P>>) -> Box<Node<P>> {
    match link {
        None => new,
        Some(mut node) => {
            if new.interval < node.interval {
                node.left = Some(insert_node(node.left.take(), new));
            } else {
                node.right = Some(insert_node(node.right.take(), new));
            }
            rebalance(node)
        }
    }
}

fn remove_node<P>(link: Link<P>, key: Interval, removed: &mut Option<P>) -> Link<P> {
    let mut node = link?;
    match key.cmp(&node.interval) {
        Ordering::Less => node.left = remove_node(node.left.take(), key, removed),
        Ordering::Greater => node.right = remove_node(node.right.take(), key, removed),
        Ordering::Equal => {
            let Node {
                payload,
                left,
                right,
                ..
            } = *node;
            *removed = Some(payload);
            return match (left, right) {
                (None, None) => None,
                (Some(child), None) | (None, Some(child)) => Some(child),
                (left, Some(right)) => {
                    let (rest, mut successor) = take_min(right);
                    successor.left = left;
                    successor.right = rest;
                    Some(rebalance(successor))
                }
            };
        }
    }
    Some(rebalance(node))
}

/// Detach the minimum node. Returns the remaining subtree and the minimum.
fn take_min<P>(mut node: Box<Node<P>>) -> (Link<P>, Box<Node<P>>) {
    match node.left.take() {
        None => {
            let rest = node.right.take();
            (rest, node)
        }
        Some(left) => {
            let (rest, min) = take_min(left);
            node.left = rest;
            (Some(rebalance(node)), min)
        }
    }
}

/// AVL-balanced interval tree with a payload per interval.
///
/// Duplicate intervals are allowed; each insert adds one entry.
#[derive(Debug, Clone)]
pub struct IntervalTree<P> {
    root: Link<P>,
    len: usize,
}

impl<P> Default for IntervalTree<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> IntervalTree<P> {
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Tree height; O(log n) for a balanced tree.
    pub fn height(&self) -> u32 {
        height(&self.root)
    }

    pub fn insert(&mut self, start: u64, end: u64, payload: P) -> Result<()> {
        let interval = Interval::new(start, end)?;
        self.root = Some(insert_node(self.root.take(), Node::leaf(interval, payload)));
        self.len += 1;
        Ok(())
    }

    /// Remove one interval equal to `[start, end)`, returning its payload.
    pub fn delete(&mut self, start: u64, end: u64) -> Result<Option<P>> {
        let key = Interval::new(start, end)?;
        let mut removed = None;
        self.root = remove_node(self.root.take(), key, &mut removed);
        if removed.is_some() {
            self.len -= 1;
        }
        Ok(removed)
    }

    /// Every stored interval overlapping `[start, end)`, lazily, in `(start, end)` order.
    pub fn query_overlap(&self, start: u64, end: u64) -> Result<Overlaps<'_, P>> {
        let query = Interval::new(start, end)?;
        if query.is_empty() {
            return Ok(Overlaps::empty(query));
        }
        Ok(Overlaps::new(self.root.as_deref(), query))
    }

    /// All intervals in `(start, end)` order.
    pub fn iter(&self) -> Iter<'_, P> {
        let mut iter = Iter { stack: Vec::new() };
        iter.push_left(self.root.as_deref());
        iter
    }
}

/// Lazy overlap query over an [`IntervalTree`].
#[derive(Debug, Clone)]
pub struct Overlaps<'a, P> {
    stack: Vec<&'a Node<P>>,
    query: Interval,
}

impl<'a, P> Overlaps<'a, P> {
    fn new(root: Option<&'a Node<P>>, query: Interval) -> Self {
        let mut overlaps = Self {
            stack: Vec::new(),
            query,
        };
        overlaps.push_left(root);
        overlaps
    }

    /// Nothing to report.
    fn empty(query: Interval) -> Self {
        Self::new(None, query)
    }

    /// Walk down the left spine, skipping subtrees that end before the query starts.
    fn push_left(&mut self, mut link: Option<&'a Node<P>>) {
        while let Some(node) = link {
            if node.max_end <= self.query.start {
                break;
            }
            self.stack.push(node);
            link = node.left.as_deref();
        }
    }
}

impl<'a, P> Iterator for Overlaps<'a, P> {
    type Item = (Interval, &'a P);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            // Everything left on the stack starts at or after this node.
            if node.interval.start >= self.query.end {
                self.stack.clear();
                return None;
            }
            self.push_left(node.right.as_deref());
            if node.interval.overlaps(&self.query) {
                return Some((node.interval, &node.payload));
            }
        }
        None
    }
}

/// In-order iterator over an [`IntervalTree`].
#[derive(Debug, Clone)]
pub struct Iter<'a, P> {
    stack: Vec<&'a Node<P>>,
}

impl<'a, P> Iter<'a, P> {
    fn push_left(&mut self, mut link: Option<&'a Node<P>>) {
        while let Some(node) = link {
            self.stack.push(node);
            link = node.left.as_deref();
        }
    }
}

impl<'a, P> Iterator for Iter<'a, P> {
    type Item = (Interval, &'a P);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left(node.right.as_deref());
        Some((node.interval, &node.payload))
    }
}

/// Annotated regions per string, in string-local byte offsets.
#[derive(Debug, Clone)]
pub struct StringRegions<P> {
    trees: HashMap<StringId, IntervalTree<P>>,
}

impl<P> Default for StringRegions<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> StringRegions<P> {
    pub fn new() -> Self {
        Self {
            trees: HashMap::new(),
        }
    }

    /// Total regions across all strings.
    pub fn len(&self) -> usize {
        self.trees.values().map(IntervalTree::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.trees.values().all(IntervalTree::is_empty)
    }

    pub fn insert(&mut self, string_id: StringId, start: u32, end: u32, payload: P) -> Result<()> {
        // Validate before creating an empty tree for the string.
        Interval::new(start.into(), end.into())?;
        self.trees
            .entry(string_id)
            .or_default()
            .insert(start.into(), end.into(), payload)
    }

    pub fn remove(&mut self, string_id: StringId, start: u32, end: u32) -> Result<Option<P>> {
        match self.trees.get_mut(&string_id) {
            Some(tree) => tree.delete(start.into(), end.into()),
            None => Interval::new(start.into(), end.into()).map(|_| None),
        }
    }

    /// Regions of `string_id` overlapping `[start, end)`.
    pub fn overlapping(&self, string_id: StringId, start: u32, end: u32) -> Result<Overlaps<'_, P>> {
        let query = Interval::new(start.into(), end.into())?;
        Ok(match self.trees.get(&string_id) {
            Some(tree) if !query.is_empty() => Overlaps::new(tree.root.as_deref(), query),
            _ => Overlaps::empty(query),
        })
    }

    /// Regions a match of length `pattern_len` at `occurrence` overlaps.
    ///
    /// A zero-length match covers no bytes and overlaps nothing.
    pub fn annotate(&self, occurrence: &Occurrence, pattern_len: u32) -> Result<Overlaps<'_, P>> {
        let end = occurrence.offset.saturating_add(pattern_len);
        self.overlapping(occurrence.string_id, occurrence.offset, end)
    }
}

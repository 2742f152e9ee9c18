use std::collections::{BTreeMap, BTreeSet};

use crate::ColorId;

/// Canonical key of an undirected edge: the smaller id comes first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeKey(ColorId, ColorId);

impl EdgeKey {
    /// Returns `None` for self-loops.
    #[inline]
    pub fn new(a: ColorId, b: ColorId) -> Option<Self> {
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Some(Self(a, b)),
            std::cmp::Ordering::Greater => Some(Self(b, a)),
            std::cmp::Ordering::Equal => None,
        }
    }

    #[inline]
    pub fn low(&self) -> ColorId {
        self.0
    }

    #[inline]
    pub fn high(&self) -> ColorId {
        self.1
    }
}

/// Undirected graph over palette ids.
///
/// Neighbor iteration is in ascending id order, which makes the ramp search
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColorGraph {
    adjacency: BTreeMap<ColorId, BTreeSet<ColorId>>,
    weights: BTreeMap<EdgeKey, u32>,
}

impl ColorGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an isolated node. No-op when present.
    pub fn add_node(&mut self, id: ColorId) {
        self.adjacency.entry(id).or_default();
    }

    /// Add an undirected edge, creating both nodes.
    ///
    /// Returns false (and adds nothing) for a self-loop. Adding an existing
    /// edge overwrites its weight when one is given.
    pub fn add_edge(&mut self, a: ColorId, b: ColorId, weight: Option<u32>) -> bool {
        let Some(key) = EdgeKey::new(a, b) else {
            return false;
        };
        self.adjacency.entry(a).or_default().insert(b);
        self.adjacency.entry(b).or_default().insert(a);
        if let Some(w) = weight {
            self.weights.insert(key, w);
        }
        true
    }

    pub fn contains_node(&self, id: ColorId) -> bool {
        self.adjacency.contains_key(&id)
    }

    pub fn contains_edge(&self, a: ColorId, b: ColorId) -> bool {
        self.adjacency.get(&a).is_some_and(|n| n.contains(&b))
    }

    /// Co-occurrence count for an adjacency edge, if one was recorded.
    pub fn edge_weight(&self, a: ColorId, b: ColorId) -> Option<u32> {
        EdgeKey::new(a, b).and_then(|k| self.weights.get(&k).copied())
    }

    /// Nodes in ascending id order.
    pub fn nodes(&self) -> impl Iterator<Item = ColorId> + '_ {
        self.adjacency.keys().copied()
    }

    /// Neighbors of `id` in ascending id order; empty for unknown ids.
    pub fn neighbors(&self, id: ColorId) -> impl Iterator<Item = ColorId> + '_ {
        self.adjacency.get(&id).into_iter().flatten().copied()
    }

    /// Edges as canonical keys in ascending order.
    pub fn edges(&self) -> impl Iterator<Item = EdgeKey> + '_ {
        self.adjacency.iter().flat_map(|(&a, ns)| {
            ns.iter()
                .filter(move |&&b| a < b)
                .map(move |&b| EdgeKey(a, b))
        })
    }

    pub fn degree(&self, id: ColorId) -> usize {
        self.adjacency.get(&id).map_or(0, |n| n.len())
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(|n| n.len()).sum::<usize>() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }
}

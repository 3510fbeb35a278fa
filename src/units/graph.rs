use std::collections::{BTreeMap, HashMap};

use num_traits::Zero;
use tracing::{debug, warn};

use crate::error::EdgeError;
use crate::math::{parsefmt, Num};

/// One table row: `1 from = ratio to`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Edge {
    pub from: String,
    pub to: String,
    pub ratio: Num,
}

impl Edge {
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        ratio: Num,
    ) -> Result<Self, EdgeError> {
        let (from, to) = (from.into(), to.into());
        if ratio.is_zero() {
            return Err(EdgeError::ZeroRatio { from, to });
        }
        Ok(Self { from, to, ratio })
    }

    /// Like `new`, with the ratio given as a decimal string.
    pub fn parse(
        from: impl Into<String>,
        to: impl Into<String>,
        ratio: &str,
    ) -> Result<Self, EdgeError> {
        let value = parsefmt::parse_decimal(ratio)
            .ok_or_else(|| EdgeError::InvalidRatio(ratio.to_owned()))?;
        Self::new(from, to, value)
    }
}

/// Undirected weighted graph of unit symbols.
///
/// The weight `w` stored for `a -> b` satisfies `1 b = w a`. Both directions
/// always exist and are reciprocal.
#[derive(Clone, Debug, Default)]
pub struct ConversionGraph {
    // first-appearance order, drives representative choice
    units: Vec<String>,
    edges: HashMap<String, BTreeMap<String, Num>>,
}

impl ConversionGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_edges<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = Edge>,
    {
        let mut graph = Self::new();
        for edge in edges {
            graph.insert(edge);
        }
        debug!(units = graph.len(), "conversion graph built");
        graph
    }

    /// Adds both directions of `edge`, overwriting any earlier weight.
    pub fn insert(&mut self, edge: Edge) {
        let Edge { from, to, ratio } = edge;
        self.register(&from);
        self.register(&to);

        let forward = ratio.recip();
        if let Some(old) = self.set_weight(&from, &to, forward) {
            warn!(
                %from,
                %to,
                old = %parsefmt::fmt_fraction(&old.recip()),
                new = %parsefmt::fmt_fraction(&ratio),
                "ratio overwritten"
            );
        }
        self.set_weight(&to, &from, ratio);
    }

    fn register(&mut self, unit: &str) {
        if !self.edges.contains_key(unit) {
            self.units.push(unit.to_owned());
            self.edges.insert(unit.to_owned(), BTreeMap::new());
        }
    }

    fn set_weight(&mut self, from: &str, to: &str, weight: Num) -> Option<Num> {
        self.edges
            .get_mut(from)
            .and_then(|neighbours| neighbours.insert(to.to_owned(), weight))
    }

    pub fn contains(&self, unit: &str) -> bool {
        self.edges.contains_key(unit)
    }

    /// Units in the order they first appeared.
    pub fn units(&self) -> impl Iterator<Item = &str> {
        self.units.iter().map(String::as_str)
    }

    /// Neighbours of `unit` with the weight of `unit -> neighbour`, in symbol order.
    pub fn neighbours(&self, unit: &str) -> impl Iterator<Item = (&str, &Num)> {
        self.edges
            .get(unit)
            .into_iter()
            .flat_map(|n| n.iter().map(|(s, w)| (s.as_str(), w)))
    }

    pub fn weight(&self, from: &str, to: &str) -> Option<&Num> {
        self.edges.get(from).and_then(|n| n.get(to))
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

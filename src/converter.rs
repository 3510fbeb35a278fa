//! Conversion between composite unit expressions.
//!
//! A [`Converter`] is built once from the ratio table and never mutated, so a
//! single instance can be shared by any number of threads.

use tracing::{debug, info, warn};

use crate::error::ConvertError;
use crate::math::{parsefmt, Num};
use crate::units::{
    collapse, normalize, parse, CanonicalMap, CompositeUnit, ConversionGraph, Edge,
};

pub const DEFAULT_FRACTIONAL_PLACES: u32 = 15;
/// Results are never rendered with more fractional digits than this.
pub const MAX_FRACTIONAL_PLACES: u32 = 128;

#[derive(Clone, Debug)]
pub struct Converter {
    canonical: CanonicalMap,
    fractional_places: u32,
}

impl Converter {
    pub fn new<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = Edge>,
    {
        Self::from_graph(&ConversionGraph::from_edges(edges))
    }

    pub fn from_graph(graph: &ConversionGraph) -> Self {
        let canonical = collapse(graph);
        info!(
            units = canonical.len(),
            components = canonical.component_count(),
            "conversion table ready"
        );
        Self {
            canonical,
            fractional_places: DEFAULT_FRACTIONAL_PLACES,
        }
    }

    pub fn with_fractional_places(mut self, places: u32) -> Self {
        self.set_fractional_places(places);
        self
    }

    pub fn fractional_places(&self) -> u32 {
        self.fractional_places
    }

    /// Values above `MAX_FRACTIONAL_PLACES` are clamped.
    pub fn set_fractional_places(&mut self, places: u32) {
        if places > MAX_FRACTIONAL_PLACES {
            warn!(places, max = MAX_FRACTIONAL_PLACES, "fractional places clamped");
        }
        self.fractional_places = places.min(MAX_FRACTIONAL_PLACES);
    }

    pub fn is_known(&self, symbol: &str) -> bool {
        self.canonical.contains(symbol)
    }

    pub fn unit_count(&self) -> usize {
        self.canonical.len()
    }

    pub fn component_count(&self) -> usize {
        self.canonical.component_count()
    }

    /// Parses and normalizes one expression.
    pub fn reduce(&self, text: &str) -> Result<CompositeUnit, ConvertError> {
        let unit = parse(text, &self.canonical)?;
        normalize(&unit, &self.canonical)
    }

    /// How many `to` are in one `from`, exactly.
    pub fn ratio(&self, from: &str, to: &str) -> Result<Num, ConvertError> {
        let from_unit = self.reduce(from)?;
        let to_unit = self.reduce(to)?;
        if !from_unit.same_units(&to_unit) {
            debug!(%from_unit, %to_unit, "units are not commensurable");
            return Err(ConvertError::CantConvert {
                from: from_unit.to_string(),
                to: to_unit.to_string(),
            });
        }
        Ok(from_unit.coefficient / to_unit.coefficient)
    }

    /// `ratio` rendered as a decimal string.
    pub fn convert(&self, from: &str, to: &str) -> Result<String, ConvertError> {
        let ratio = self.ratio(from, to)?;
        let rendered = parsefmt::fmt_decimal(&ratio, self.fractional_places);
        debug!(from, to, result = %rendered, "converted");
        Ok(rendered)
    }
}

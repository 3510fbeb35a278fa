pub mod collapse;
pub mod composite;
pub mod graph;
pub mod normalize;
pub mod parser;

pub use collapse::{collapse, Canonical, CanonicalMap};
pub use composite::{CompositeUnit, UnitBag};
pub use graph::{ConversionGraph, Edge};
pub use normalize::normalize;
pub use parser::{parse, KnownUnits};

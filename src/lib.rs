//! Exact conversion between unit expressions such as `km/h` and `m/s`,
//! driven by a sparse table of pairwise ratios.
//!
//! ```
//! use uniconv::{Converter, Edge};
//!
//! let converter = Converter::new([
//!     Edge::parse("km", "m", "1000").unwrap(),
//!     Edge::parse("h", "s", "3600").unwrap(),
//! ]);
//! assert_eq!(converter.convert("m/s", "km/h").unwrap(), "3.6");
//! ```

pub mod config;
pub mod converter;
pub mod error;
pub mod math;
pub mod session;
pub mod table;
pub mod term_frontend;
pub mod units;

pub use converter::Converter;
pub use error::{ConvertError, EdgeError, TableError};
pub use units::Edge;

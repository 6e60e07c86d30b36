//! Joins the curated rate table onto the boundary dataset.
//!
//! Both sides name countries independently, so names are compared through
//! [`normalize`] and resolved with [`resolve`]. Every step is a pure function
//! of its inputs; re-running it after either input changes needs no
//! invalidation.

pub mod aggregate;
pub mod enrich;
pub mod normalize;
pub mod resolve;
pub mod table;
pub mod trend;

pub use aggregate::*;
pub use enrich::*;
pub use normalize::*;
pub use resolve::*;
pub use table::*;
pub use trend::*;

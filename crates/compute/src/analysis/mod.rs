pub mod framing;
pub mod statistics;

pub use framing::*;
pub use statistics::*;

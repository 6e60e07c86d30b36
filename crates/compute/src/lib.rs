pub mod analysis;
pub mod reconcile;

pub use analysis::*;
pub use reconcile::*;

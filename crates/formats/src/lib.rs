pub mod boundary;
pub mod numeric;
pub mod tabular;
pub mod tax_table;
pub mod trend_table;

pub use boundary::*;
pub use tax_table::*;
pub use trend_table::*;

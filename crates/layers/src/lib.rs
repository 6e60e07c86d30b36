pub mod legend;
pub mod symbology;

pub use legend::*;
pub use symbology::*;

pub mod camera;
pub mod popup;
pub mod selection;

pub use camera::*;
pub use popup::*;
pub use selection::*;

mod compare;
mod heatmap;
mod photo;
mod share;

pub use compare::*;
pub use heatmap::*;
pub use photo::*;
pub use share::*;

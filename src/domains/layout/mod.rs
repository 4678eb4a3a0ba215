pub mod edges;
pub mod geometry;

pub use edges::*;
pub use geometry::*;

pub mod layout;
pub mod logger;
pub mod render;
pub mod scenario;

pub use layout::*;
pub use logger::*;
pub use render::*;
pub use scenario::*;

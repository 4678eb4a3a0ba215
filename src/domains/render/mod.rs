pub mod canvas;
pub mod ports;
pub mod renderer;
pub mod title;

pub use canvas::*;
pub use ports::*;
pub use renderer::*;
pub use title::*;

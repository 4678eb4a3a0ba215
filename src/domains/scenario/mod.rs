pub mod memory;
pub mod ports;
pub mod snapshot;
pub mod types;

pub use memory::*;
pub use ports::*;
pub use snapshot::*;
pub use types::*;

pub mod scenario_file;

pub use scenario_file::*;

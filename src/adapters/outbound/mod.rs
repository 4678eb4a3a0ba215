pub mod logging;
pub mod plotters_writer;
pub mod recording_writer;

pub use logging::*;
pub use plotters_writer::*;
pub use recording_writer::*;

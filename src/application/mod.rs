pub mod best_worst;
pub mod comparison;
pub mod scenario_view;
pub mod selection;

pub use best_worst::*;
pub use comparison::*;
pub use scenario_view::*;
pub use selection::*;

//! CLI command implementations.

pub mod check;
pub mod explain;
pub mod simulate;
pub mod table;

pub use check::CheckArgs;
pub use explain::ExplainArgs;
pub use simulate::SimulateArgs;
pub use table::TableArgs;

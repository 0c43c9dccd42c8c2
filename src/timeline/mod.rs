pub mod aggregate;
pub mod exec;
pub mod output;
pub mod selection;

pub use aggregate::{aggregate, CumulativeMode, Granularity, Timeline};
pub use exec::exec;
pub use output::{output_json, output_ndjson, output_table};
pub use selection::{DragState, Edge, Selection};

pub mod analyzers;
pub mod config;
pub mod error;
pub mod geo;
pub mod normalize;
pub mod output;
pub mod parser;
pub mod schema;
pub mod stats;
pub mod table;

pub use error::{PipelineError, Result};
pub use stats::Summary;
pub use table::CanonicalTable;

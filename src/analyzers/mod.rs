//! Aggregation, classification, ranking and auditing of the canonical table.
//!
//! Every stage is a pure function: it borrows the table or an aggregate and
//! returns a new value.

pub mod aggregate;
pub mod classify;
pub mod quality;
pub mod rank;
pub mod types;
pub mod utility;

pub use aggregate::{aggregate_by, count_distinct_by};
pub use classify::classify;
pub use quality::audit;
pub use rank::{rank, rank_n};

//! Data transformation pipeline: filter and sort state applied to a
//! dataset to produce an ordered, filtered view.

pub mod filter;
pub mod pipeline;
pub mod sort;

pub use filter::{FilterExpression, FilterState};
pub use pipeline::compute;
pub use sort::{Comparer, SortDirection, SortMode, SortState, SortingExpression};

//! Command implementations for varkit.

pub mod compare;
pub mod intersect;
pub mod sort;

pub use compare::{CompareCommand, CompareOutputs, Partition};
pub use intersect::{IntersectCommand, Strategy};
pub use sort::{is_sorted, SortCommand};

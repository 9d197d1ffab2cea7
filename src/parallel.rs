//! Parallel processing utilities using Rayon.

use crate::record::{genome_cmp, GenomeOrdered};
use rayon::prelude::*;

/// Minimum number of records before enabling parallelization.
/// Below this threshold, sequential processing is faster due to
/// thread spawn overhead.
pub const PARALLEL_THRESHOLD: usize = 10_000;

/// Stable sort by (chromosome key, start), parallel above the threshold.
///
/// `par_sort_by` is stable, like the sequential `sort_by`, so ties keep
/// their input order either way.
pub fn sort_genome_order<T: GenomeOrdered + Send>(mut records: Vec<T>) -> Vec<T> {
    if records.len() >= PARALLEL_THRESHOLD {
        records.par_sort_by(genome_cmp);
    } else {
        records.sort_by(genome_cmp);
    }
    records
}

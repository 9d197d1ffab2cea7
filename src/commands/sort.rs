//! Sort command implementation.
//!
//! Sort order:
//! 1. Primary: chromosome rank (1-22, then X, Y, MT, then unranked labels)
//! 2. Secondary: start coordinate (ascending)
//! 3. Ties: input order preserved (stable sort)
//!
//! Works on any record kind implementing `GenomeOrdered`, so variant and
//! region files share one engine.

use crate::bed::{read_region_file, write_region_file, RegionFile};
use crate::parallel::sort_genome_order;
use crate::record::{genome_cmp, GenomeOrdered, RecordError, Result};
use crate::vcf::{read_variant_file, write_variant_file, VariantFile};
use std::cmp::Ordering;
use std::io::Write;
use std::path::Path;

/// Whether a collection is already in genome order.
///
/// Checks that adjacent keys are non-decreasing. A stable sort leaves such
/// a collection untouched element-for-element (equal-key runs keep their
/// relative order by stability), so this is exactly "the collection equals
/// its own sorted output", original text included.
pub fn is_sorted<T: GenomeOrdered>(records: &[T]) -> bool {
    records
        .windows(2)
        .all(|pair| genome_cmp(&pair[0], &pair[1]) != Ordering::Greater)
}

/// Sort command configuration.
#[derive(Debug, Clone, Default)]
pub struct SortCommand {
    /// Reverse the fully sorted output
    pub reverse: bool,
}

impl SortCommand {
    pub fn new() -> Self {
        Self { reverse: false }
    }

    /// Stable sort by (chromosome key, start coordinate).
    pub fn sort<T: GenomeOrdered>(&self, mut records: Vec<T>) -> Vec<T> {
        records.sort_by(genome_cmp);
        if self.reverse {
            records.reverse();
        }
        records
    }

    /// Same order as [`SortCommand::sort`], parallel for large inputs.
    pub fn sort_parallel<T: GenomeOrdered + Send>(&self, records: Vec<T>) -> Vec<T> {
        let mut records = sort_genome_order(records);
        if self.reverse {
            records.reverse();
        }
        records
    }

    /// Execute sort on a file, writing header lines then sorted records.
    ///
    /// The file's extension selects the record rules: `.vcf` for variant
    /// rows, `.bed` for region rows.
    pub fn run<P: AsRef<Path>, W: Write>(&self, input: P, output: &mut W) -> Result<()> {
        match read_sort_input(input.as_ref())? {
            SortInput::Variants(VariantFile { header, variants }) => {
                let sorted = self.sort_parallel(variants);
                write_variant_file(output, &header, &sorted).map_err(RecordError::Io)?;
            }
            SortInput::Regions(RegionFile { header, regions }) => {
                let sorted = self.sort_parallel(regions);
                write_region_file(output, &header, &sorted).map_err(RecordError::Io)?;
            }
        }
        Ok(())
    }

    /// Report whether a file is already sorted, without writing anything.
    pub fn run_check<P: AsRef<Path>>(&self, input: P) -> Result<bool> {
        Ok(match read_sort_input(input.as_ref())? {
            SortInput::Variants(file) => is_sorted(&file.variants),
            SortInput::Regions(file) => is_sorted(&file.regions),
        })
    }
}

#[derive(Debug)]
enum SortInput {
    Variants(VariantFile),
    Regions(RegionFile),
}

fn read_sort_input(path: &Path) -> Result<SortInput> {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "vcf" => Ok(SortInput::Variants(read_variant_file(path, false)?)),
        "bed" => Ok(SortInput::Regions(read_region_file(path)?)),
        other => Err(RecordError::InvalidFormat(format!(
            "unsupported file extension '{}' for '{}': expected .vcf or .bed",
            other,
            path.display()
        ))),
    }
}

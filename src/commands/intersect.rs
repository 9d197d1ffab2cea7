//! Intersect command implementation.
//!
//! Filters a variant collection down to the variants that fall inside some
//! region, with two strategies:
//!
//! - [`Strategy::Exhaustive`]: scan the full region set per variant. O(n*m),
//!   no ordering requirements. The correctness baseline.
//! - [`Strategy::SortedSweep`]: one monotonic cursor over the regions,
//!   shared across the variant scan. O(n+m), but only valid when both
//!   inputs are in genome order and same-chromosome regions are disjoint.
//!   The cursor never moves backward, so violating either precondition
//!   yields silently wrong results; an explicit `check_sorted` opt-in
//!   verifies both up front.
//!
//! Both strategies build a new retained collection; the inputs are never
//! mutated mid-scan.

use crate::bed::read_region_file;
use crate::commands::sort::is_sorted;
use crate::parallel::PARALLEL_THRESHOLD;
use crate::record::{Region, RecordError, Result, Variant};
use crate::vcf::{read_variant_file, write_variant_file};
use rayon::prelude::*;
use std::cmp::Ordering;
use std::io::Write;
use std::path::Path;

/// Which intersection algorithm to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    #[default]
    Exhaustive,
    SortedSweep,
}

/// Intersect command configuration.
#[derive(Debug, Clone)]
pub struct IntersectCommand {
    pub strategy: Strategy,
    /// Verify sweep preconditions (sorted inputs, disjoint regions) before
    /// filtering. Off by default; the fast path never checks.
    pub check_sorted: bool,
    /// Allow the exhaustive scan to run on multiple threads for large
    /// inputs. The sweep is inherently sequential and ignores this.
    pub parallel: bool,
}

impl Default for IntersectCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl IntersectCommand {
    pub fn new() -> Self {
        Self {
            strategy: Strategy::Exhaustive,
            check_sorted: false,
            parallel: true,
        }
    }

    /// Retain the variants covered by some region.
    ///
    /// Output preserves the variants' input order for both strategies.
    pub fn filter(&self, variants: Vec<Variant>, regions: &[Region]) -> Result<Vec<Variant>> {
        match self.strategy {
            Strategy::Exhaustive => Ok(self.filter_exhaustive(variants, regions)),
            Strategy::SortedSweep => {
                if self.check_sorted {
                    verify_sweep_preconditions(&variants, regions)?;
                }
                Ok(filter_sorted_sweep(variants, regions))
            }
        }
    }

    /// Full scan of the region set per variant.
    ///
    /// Each variant's test is independent and the region set is read-only,
    /// so large inputs run on the Rayon pool; `collect` keeps input order,
    /// making the parallel result identical to the sequential one.
    fn filter_exhaustive(&self, variants: Vec<Variant>, regions: &[Region]) -> Vec<Variant> {
        if self.parallel && variants.len() >= PARALLEL_THRESHOLD {
            variants
                .into_par_iter()
                .filter(|v| covered(v, regions))
                .collect()
        } else {
            variants
                .into_iter()
                .filter(|v| covered(v, regions))
                .collect()
        }
    }

    /// Execute intersect on files: filter the variant file by the region
    /// file, writing the variant file's header then the retained records.
    pub fn run<W: Write>(
        &self,
        variant_path: &Path,
        region_path: &Path,
        output: &mut W,
    ) -> Result<()> {
        let region_file = read_region_file(region_path)?;
        let variant_file = read_variant_file(variant_path, false)?;

        let kept = self.filter(variant_file.variants, &region_file.regions)?;

        write_variant_file(output, &variant_file.header, &kept).map_err(RecordError::Io)?;
        Ok(())
    }
}

#[inline]
fn covered(variant: &Variant, regions: &[Region]) -> bool {
    regions
        .iter()
        .any(|r| r.contains(&variant.chrom, variant.pos))
}

/// Whether the region lies wholly before the variant in genome order, i.e.
/// the cursor may step past it for good.
#[inline]
fn region_behind(region: &Region, variant: &Variant) -> bool {
    match region.chrom.cmp(&variant.chrom) {
        Ordering::Less => true,
        Ordering::Equal => region.end < variant.pos,
        Ordering::Greater => false,
    }
}

/// O(n+m) sweep over pre-sorted variants and pre-sorted, disjoint regions.
///
/// The cursor only ever advances: it skips regions the remaining variants
/// can no longer reach, then the region under it decides the current
/// variant. A variant in a gap before the cursor region, or on a chromosome
/// with no regions at all, is dropped without moving the cursor, since the
/// next variant may still need the region the cursor is parked on.
fn filter_sorted_sweep(variants: Vec<Variant>, regions: &[Region]) -> Vec<Variant> {
    let mut kept = Vec::new();
    let mut cursor = 0usize;

    for variant in variants {
        while cursor < regions.len() && region_behind(&regions[cursor], &variant) {
            cursor += 1;
        }

        match regions.get(cursor) {
            Some(region) if region.contains(&variant.chrom, variant.pos) => kept.push(variant),
            // Gap before the cursor region, region on a later chromosome,
            // or regions exhausted: drop the variant, keep the cursor.
            _ => {}
        }
    }

    kept
}

/// Advisory pre-flight for the sweep: both inputs in genome order and
/// same-chromosome regions pairwise disjoint. On sorted regions the
/// adjacent-pair check covers all pairs.
fn verify_sweep_preconditions(variants: &[Variant], regions: &[Region]) -> Result<()> {
    if !is_sorted(variants) {
        return Err(RecordError::InvalidFormat(
            "variant input is not sorted by (chromosome, position); sort it or drop --sorted"
                .to_string(),
        ));
    }
    if !is_sorted(regions) {
        return Err(RecordError::InvalidFormat(
            "region input is not sorted by (chromosome, start); sort it or drop --sorted"
                .to_string(),
        ));
    }
    for pair in regions.windows(2) {
        if pair[0].chrom == pair[1].chrom && pair[1].start <= pair[0].end {
            return Err(RecordError::InvalidFormat(format!(
                "regions overlap on chromosome {}: '{}' and '{}'",
                pair[0].chrom,
                pair[0].line(),
                pair[1].line()
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sweep() -> IntersectCommand {
        IntersectCommand {
            strategy: Strategy::SortedSweep,
            check_sorted: false,
            parallel: false,
        }
    }

    fn exhaustive() -> IntersectCommand {
        IntersectCommand {
            strategy: Strategy::Exhaustive,
            check_sorted: false,
            parallel: false,
        }
    }

    fn lines(variants: &[Variant]) -> Vec<&str> {
        variants.iter().map(|v| v.line()).collect()
    }

    #[test]
    fn test_exhaustive_basic_retention() {
        let variants = vec![
            Variant::new("chr1", 100),
            Variant::new("chr1", 250),
            Variant::new("chrX", 50),
        ];
        let regions = vec![Region::new("chr1", 100, 200)];

        let kept = exhaustive().filter(variants, &regions).unwrap();
        assert_eq!(lines(&kept), vec!["chr1\t100"]);
    }

    #[test]
    fn test_boundaries_inclusive_both_ends() {
        let regions = vec![Region::new("chr1", 100, 200)];
        let variants = vec![
            Variant::new("chr1", 99),
            Variant::new("chr1", 100),
            Variant::new("chr1", 200),
            Variant::new("chr1", 201),
        ];

        for cmd in [exhaustive(), sweep()] {
            let kept = cmd.filter(variants.clone(), &regions).unwrap();
            assert_eq!(lines(&kept), vec!["chr1\t100", "chr1\t200"]);
        }
    }

    #[test]
    fn test_sweep_drops_gap_variant_without_moving_cursor() {
        let regions = vec![Region::new("chr1", 100, 200)];
        let variants = vec![Variant::new("chr1", 50), Variant::new("chr1", 150)];

        let kept = sweep().filter(variants, &regions).unwrap();
        // (1,50) falls in the gap before the first region and is dropped;
        // the cursor stays put so (1,150) still matches.
        assert_eq!(lines(&kept), vec!["chr1\t150"]);
    }

    #[test]
    fn test_sweep_advances_across_chromosomes() {
        let regions = vec![
            Region::new("chr1", 100, 200),
            Region::new("chr1", 300, 400),
            Region::new("chr2", 50, 60),
        ];
        let variants = vec![
            Variant::new("chr1", 150),
            Variant::new("chr1", 250),
            Variant::new("chr1", 350),
            Variant::new("chr2", 55),
            Variant::new("chr2", 70),
        ];

        let kept = sweep().filter(variants, &regions).unwrap();
        assert_eq!(lines(&kept), vec!["chr1\t150", "chr1\t350", "chr2\t55"]);
    }

    #[test]
    fn test_unrepresented_chromosome_dropped_by_both_strategies() {
        // chr2 has no regions at all; chr3 comes after every region.
        let regions = vec![Region::new("chr1", 1, 100), Region::new("chr4", 1, 100)];
        let variants = vec![
            Variant::new("chr1", 50),
            Variant::new("chr2", 50),
            Variant::new("chr3", 50),
            Variant::new("chr4", 50),
        ];

        let kept_ex = exhaustive().filter(variants.clone(), &regions).unwrap();
        let kept_sw = sweep().filter(variants, &regions).unwrap();

        assert_eq!(lines(&kept_ex), vec!["chr1\t50", "chr4\t50"]);
        assert_eq!(lines(&kept_ex), lines(&kept_sw));
    }

    #[test]
    fn test_strategies_agree_on_sorted_disjoint_input() {
        let regions = vec![
            Region::new("chr1", 10, 20),
            Region::new("chr1", 40, 50),
            Region::new("chr2", 5, 5),
            Region::new("chrX", 100, 300),
        ];
        let variants = vec![
            Variant::new("chr1", 5),
            Variant::new("chr1", 10),
            Variant::new("chr1", 30),
            Variant::new("chr1", 50),
            Variant::new("chr2", 5),
            Variant::new("chr2", 6),
            Variant::new("chrX", 100),
            Variant::new("chrX", 301),
            Variant::new("chrY", 1),
        ];

        let kept_ex = exhaustive().filter(variants.clone(), &regions).unwrap();
        let kept_sw = sweep().filter(variants, &regions).unwrap();
        assert_eq!(lines(&kept_ex), lines(&kept_sw));
    }

    #[test]
    fn test_empty_inputs() {
        for cmd in [exhaustive(), sweep()] {
            let kept = cmd
                .filter(Vec::new(), &[Region::new("chr1", 1, 10)])
                .unwrap();
            assert!(kept.is_empty());

            let kept = cmd.filter(vec![Variant::new("chr1", 5)], &[]).unwrap();
            assert!(kept.is_empty());
        }
    }

    #[test]
    fn test_parallel_exhaustive_matches_sequential() {
        let regions = vec![Region::new("chr1", 1000, 2000)];
        let variants: Vec<Variant> = (0..(PARALLEL_THRESHOLD as u64 + 50))
            .map(|i| Variant::new("chr1", i))
            .collect();

        let sequential = exhaustive().filter(variants.clone(), &regions).unwrap();

        let mut par_cmd = exhaustive();
        par_cmd.parallel = true;
        let parallel = par_cmd.filter(variants, &regions).unwrap();

        assert_eq!(lines(&sequential), lines(&parallel));
        assert_eq!(sequential.len(), 1001);
    }

    #[test]
    fn test_check_sorted_rejects_unsorted_variants() {
        let mut cmd = sweep();
        cmd.check_sorted = true;

        let regions = vec![Region::new("chr1", 1, 10)];
        let variants = vec![Variant::new("chr1", 200), Variant::new("chr1", 100)];

        let err = cmd.filter(variants, &regions).unwrap_err();
        match err {
            RecordError::InvalidFormat(msg) => assert!(msg.contains("variant input")),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_check_sorted_rejects_unsorted_regions() {
        let mut cmd = sweep();
        cmd.check_sorted = true;

        let regions = vec![Region::new("chr2", 1, 10), Region::new("chr1", 1, 10)];
        let variants = vec![Variant::new("chr1", 5)];

        let err = cmd.filter(variants, &regions).unwrap_err();
        match err {
            RecordError::InvalidFormat(msg) => assert!(msg.contains("region input")),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_check_sorted_rejects_overlapping_regions() {
        let mut cmd = sweep();
        cmd.check_sorted = true;

        let regions = vec![Region::new("chr1", 1, 100), Region::new("chr1", 50, 150)];
        let variants = vec![Variant::new("chr1", 5)];

        let err = cmd.filter(variants, &regions).unwrap_err();
        match err {
            RecordError::InvalidFormat(msg) => assert!(msg.contains("overlap")),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_check_sorted_accepts_touching_but_disjoint_regions() {
        let mut cmd = sweep();
        cmd.check_sorted = true;

        // end 100 and start 101 are disjoint under inclusive bounds
        let regions = vec![Region::new("chr1", 1, 100), Region::new("chr1", 101, 200)];
        let variants = vec![Variant::new("chr1", 100), Variant::new("chr1", 101)];

        let kept = cmd.filter(variants, &regions).unwrap();
        assert_eq!(kept.len(), 2);
    }
}

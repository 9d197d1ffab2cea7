//! VARKIT: Variant and Region Toolkit
//!
//! This library normalizes, orders and matches genomic records drawn from
//! line-oriented VCF/BED-style files.
//!
//! # Features
//!
//! - **Chromosome-aware ordering**: one total order over chromosome labels
//!   (1-22, X, Y, MT, then everything else), applied identically everywhere
//! - **Exact-match comparison**: three-way concordance partitioning of two
//!   variant collections by structural identity key
//! - **Region filtering**: keep the variants falling inside a region set,
//!   via an exhaustive scan or a linear sweep over sorted inputs
//!
//! # Example
//!
//! ```rust
//! use varkit::commands::{IntersectCommand, SortCommand};
//! use varkit::record::{Region, Variant};
//!
//! let cmd = SortCommand::new();
//! let variants = cmd.sort(vec![
//!     Variant::new("chrX", 50),
//!     Variant::new("chr2", 100),
//! ]);
//! assert_eq!(variants[0].line(), "chr2\t100");
//!
//! let regions = vec![Region::new("chr2", 90, 110)];
//! let kept = IntersectCommand::new().filter(variants, &regions).unwrap();
//! assert_eq!(kept.len(), 1);
//! ```

pub mod bed;
pub mod chrom;
pub mod commands;
pub mod parallel;
pub mod record;
pub mod vcf;

// Re-export commonly used types
pub use chrom::{chrom_key, ChromKey};
pub use record::{GenomeOrdered, RecordError, Region, Variant, VariantKey};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bed::{read_region_file, write_region_file, RegionFile};
    pub use crate::chrom::{chrom_key, ChromKey};
    pub use crate::commands::{is_sorted, CompareCommand, IntersectCommand, SortCommand, Strategy};
    pub use crate::record::{GenomeOrdered, RecordError, Region, Variant, VariantKey};
    pub use crate::vcf::{read_variant_file, write_variant_file, VariantFile};
}

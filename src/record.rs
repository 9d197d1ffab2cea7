//! Core record types for variant and region data.
//!
//! A [`Variant`] is a single-position record parsed from a VCF-style row; a
//! [`Region`] is an inclusive coordinate range parsed from a BED-style row.
//! Both keep the verbatim source line so output files can reproduce their
//! input byte-for-byte. Records are built once at parse time and never
//! mutated; every operation over them produces a new collection.

use crate::chrom::{chrom_key, ChromKey};
use memchr::memchr_iter;
use std::cmp::Ordering;
use std::fmt;
use std::io;
use thiserror::Error;

/// Errors that can occur while reading variant or region data.
#[derive(Error, Debug)]
pub enum RecordError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Invalid input: {0}")]
    InvalidFormat(String),
}

pub type Result<T> = std::result::Result<T, RecordError>;

/// Ordering seam shared by every record kind the sort engine handles.
pub trait GenomeOrdered {
    fn chrom_key(&self) -> &ChromKey;
    fn start(&self) -> u64;
}

/// Compare two records by (chromosome key, start coordinate).
///
/// This is the one comparison the sort and sweep code key on; ties are left
/// Equal so a stable sort preserves input order.
#[inline]
pub fn genome_cmp<T: GenomeOrdered>(a: &T, b: &T) -> Ordering {
    a.chrom_key()
        .cmp(b.chrom_key())
        .then(a.start().cmp(&b.start()))
}

/// A single-position variant record.
#[derive(Debug, Clone, PartialEq)]
pub struct Variant {
    pub chrom: ChromKey,
    pub pos: u64,
    pub ref_allele: Option<String>,
    pub alt_allele: Option<String>,
    original: String,
}

/// Structural identity key for a variant.
///
/// Two variants denote the same call iff their keys are equal. Comparison is
/// field-by-field, so textual differences that normalize away (a "chr"
/// prefix, label case) never split a key, and formatting never joins two
/// distinct ones.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VariantKey {
    pub chrom: ChromKey,
    pub pos: u64,
    pub ref_allele: String,
    pub alt_allele: String,
}

impl Variant {
    /// Build a minimal variant from parts. The original line is synthesized;
    /// mainly useful in tests and examples.
    pub fn new(chrom: impl AsRef<str>, pos: u64) -> Self {
        let chrom = chrom.as_ref();
        Self {
            chrom: chrom_key(chrom),
            pos,
            ref_allele: None,
            alt_allele: None,
            original: format!("{}\t{}", chrom, pos),
        }
    }

    /// Build a variant carrying alleles. The original line is synthesized.
    pub fn with_alleles(
        chrom: impl AsRef<str>,
        pos: u64,
        ref_allele: impl Into<String>,
        alt_allele: impl Into<String>,
    ) -> Self {
        let chrom = chrom.as_ref();
        let ref_allele = ref_allele.into();
        let alt_allele = alt_allele.into();
        let original = format!("{}\t{}\t.\t{}\t{}", chrom, pos, ref_allele, alt_allele);
        Self {
            chrom: chrom_key(chrom),
            pos,
            ref_allele: Some(ref_allele),
            alt_allele: Some(alt_allele),
            original,
        }
    }

    /// Parse a tab-separated variant row.
    ///
    /// Requires at least [chrom, pos]; with `with_alleles` the row must also
    /// carry ref and alt at columns 4 and 5 ([chrom, pos, id, ref, alt]).
    pub fn parse_line(line: &str, line_number: usize, with_alleles: bool) -> Result<Variant> {
        let required = if with_alleles { 5 } else { 2 };
        let fields = split_fields(line, required);
        if fields.len() < required {
            return Err(RecordError::Parse {
                line: line_number,
                message: format!(
                    "expected at least {} tab-separated columns, got {}: '{}'",
                    required,
                    fields.len(),
                    line
                ),
            });
        }

        let pos = parse_u64_fast(fields[1].as_bytes()).ok_or_else(|| RecordError::Parse {
            line: line_number,
            message: format!("invalid position '{}'", fields[1]),
        })?;

        let (ref_allele, alt_allele) = if with_alleles {
            (Some(fields[3].to_string()), Some(fields[4].to_string()))
        } else {
            (None, None)
        };

        Ok(Variant {
            chrom: chrom_key(fields[0]),
            pos,
            ref_allele,
            alt_allele,
            original: line.to_string(),
        })
    }

    /// The verbatim source line.
    #[inline]
    pub fn line(&self) -> &str {
        &self.original
    }

    /// Derive the identity key. Missing alleles key as empty strings, which
    /// only arises outside the compare flow since compare parsing requires
    /// both alleles.
    pub fn key(&self) -> VariantKey {
        VariantKey {
            chrom: self.chrom.clone(),
            pos: self.pos,
            ref_allele: self.ref_allele.clone().unwrap_or_default(),
            alt_allele: self.alt_allele.clone().unwrap_or_default(),
        }
    }
}

impl GenomeOrdered for Variant {
    #[inline]
    fn chrom_key(&self) -> &ChromKey {
        &self.chrom
    }

    #[inline]
    fn start(&self) -> u64 {
        self.pos
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.original)
    }
}

/// A coordinate range on one chromosome, inclusive on both ends.
///
/// Within one collection, regions on the same chromosome are assumed
/// pairwise disjoint; the sweep in the intersect command relies on that and
/// does not re-validate it.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub chrom: ChromKey,
    pub start: u64,
    pub end: u64,
    original: String,
}

impl Region {
    /// Build a region from parts. The original line is synthesized.
    pub fn new(chrom: impl AsRef<str>, start: u64, end: u64) -> Self {
        let chrom = chrom.as_ref();
        Self {
            chrom: chrom_key(chrom),
            start,
            end,
            original: format!("{}\t{}\t{}", chrom, start, end),
        }
    }

    /// Parse a tab-separated region row: [chrom, start, end, ...].
    pub fn parse_line(line: &str, line_number: usize) -> Result<Region> {
        let fields = split_fields(line, 3);
        if fields.len() < 3 {
            return Err(RecordError::Parse {
                line: line_number,
                message: format!(
                    "expected at least 3 tab-separated columns, got {}: '{}'",
                    fields.len(),
                    line
                ),
            });
        }

        let start = parse_u64_fast(fields[1].as_bytes()).ok_or_else(|| RecordError::Parse {
            line: line_number,
            message: format!("invalid start position '{}'", fields[1]),
        })?;
        let end = parse_u64_fast(fields[2].as_bytes()).ok_or_else(|| RecordError::Parse {
            line: line_number,
            message: format!("invalid end position '{}'", fields[2]),
        })?;

        if start > end {
            return Err(RecordError::Parse {
                line: line_number,
                message: format!("start ({}) > end ({})", start, end),
            });
        }

        Ok(Region {
            chrom: chrom_key(fields[0]),
            start,
            end,
            original: line.to_string(),
        })
    }

    /// The verbatim source line.
    #[inline]
    pub fn line(&self) -> &str {
        &self.original
    }

    /// Whether the given position falls inside this region. Both bounds are
    /// inclusive.
    #[inline]
    pub fn contains(&self, chrom: &ChromKey, pos: u64) -> bool {
        self.chrom == *chrom && self.start <= pos && pos <= self.end
    }
}

impl GenomeOrdered for Region {
    #[inline]
    fn chrom_key(&self) -> &ChromKey {
        &self.chrom
    }

    #[inline]
    fn start(&self) -> u64 {
        self.start
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.original)
    }
}

/// Fast u64 parsing - no allocation, no error formatting.
///
/// Returns None if the input is empty or contains non-digit characters.
#[inline]
fn parse_u64_fast(bytes: &[u8]) -> Option<u64> {
    if bytes.is_empty() {
        return None;
    }
    let mut n: u64 = 0;
    for &b in bytes {
        let d = b.wrapping_sub(b'0');
        if d > 9 {
            return None;
        }
        n = n.checked_mul(10)?.checked_add(d as u64)?;
    }
    Some(n)
}

/// Split the first `max` tab-separated fields using memchr for tab search.
///
/// Stops early once `max` fields are collected; the remainder of the line is
/// never scanned.
fn split_fields(line: &str, max: usize) -> Vec<&str> {
    let bytes = line.as_bytes();
    let mut fields = Vec::with_capacity(max);
    let mut start = 0;
    for tab in memchr_iter(b'\t', bytes) {
        fields.push(&line[start..tab]);
        start = tab + 1;
        if fields.len() == max {
            return fields;
        }
    }
    fields.push(&line[start..]);
    fields
}

//! Chromosome label normalization to a total order.
//!
//! Every place that reads a chromosome field goes through [`chrom_key`];
//! the mapping lives here and nowhere else.

use std::fmt;

/// Total-order key derived from a chromosome label.
///
/// Numeric labels keep their value, so "1".."22" order naturally; "X", "Y"
/// and "MT"/"M" rank as 23, 24 and 25. Labels that match neither fall back
/// to [`ChromKey::Other`], which orders after every ranked chromosome and
/// lexically among themselves. The derived `Ord` gives exactly that order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChromKey {
    /// Numeric rank: autosomes by value, X=23, Y=24, MT=25.
    Rank(u32),
    /// Unranked label, stored with any "chr" prefix already stripped.
    Other(String),
}

/// Normalize a chromosome label to its ordering key.
///
/// A literal "chr" prefix is stripped before matching, so "chr7" and "7"
/// produce equal keys. X/Y/MT/M match case-insensitively. Unrecognized
/// labels never fail; they map to [`ChromKey::Other`].
pub fn chrom_key(label: &str) -> ChromKey {
    let name = label.strip_prefix("chr").unwrap_or(label);

    if let Ok(n) = name.parse::<u32>() {
        return ChromKey::Rank(n);
    }

    if name.eq_ignore_ascii_case("X") {
        ChromKey::Rank(23)
    } else if name.eq_ignore_ascii_case("Y") {
        ChromKey::Rank(24)
    } else if name.eq_ignore_ascii_case("MT") || name.eq_ignore_ascii_case("M") {
        ChromKey::Rank(25)
    } else {
        ChromKey::Other(name.to_string())
    }
}

impl fmt::Display for ChromKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChromKey::Rank(23) => write!(f, "X"),
            ChromKey::Rank(24) => write!(f, "Y"),
            ChromKey::Rank(25) => write!(f, "MT"),
            ChromKey::Rank(n) => write!(f, "{}", n),
            ChromKey::Other(name) => write!(f, "{}", name),
        }
    }
}

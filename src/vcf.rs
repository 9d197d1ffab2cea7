//! Streaming variant file parser.
//!
//! Variant files are line-oriented and tab-separated: lines starting with
//! `#` are header lines, everything else non-empty is a data row. Header
//! lines are collected verbatim (minus the line terminator) in their
//! original order so derived outputs can reattach them unchanged.

use crate::record::{Result, Variant};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

/// A fully read variant file: its header prefix plus parsed records.
#[derive(Debug, Clone, Default)]
pub struct VariantFile {
    pub header: Vec<String>,
    pub variants: Vec<Variant>,
}

/// A streaming variant file reader.
///
/// Header lines encountered while reading are accumulated on the reader;
/// take them with [`VcfReader::into_header`] once the records are drained.
pub struct VcfReader<R: Read> {
    reader: BufReader<R>,
    line_number: usize,
    buffer: String,
    header: Vec<String>,
    with_alleles: bool,
}

impl VcfReader<File> {
    /// Open a variant file from a path.
    pub fn from_path<P: AsRef<Path>>(path: P, with_alleles: bool) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(file, with_alleles))
    }
}

impl<R: Read> VcfReader<R> {
    /// Create a reader from any readable source. With `with_alleles`, data
    /// rows must carry ref/alt columns and parsed variants have identity
    /// keys over them.
    pub fn new(reader: R, with_alleles: bool) -> Self {
        Self {
            reader: BufReader::new(reader),
            line_number: 0,
            buffer: String::with_capacity(1024),
            header: Vec::new(),
            with_alleles,
        }
    }

    /// Read the next data record, accumulating any header lines passed on
    /// the way. Returns Ok(None) at end of input.
    pub fn read_record(&mut self) -> Result<Option<Variant>> {
        loop {
            self.buffer.clear();
            let bytes_read = self.reader.read_line(&mut self.buffer)?;
            if bytes_read == 0 {
                return Ok(None);
            }
            self.line_number += 1;

            let line = self.buffer.trim();
            if line.is_empty() {
                continue;
            }
            if line.starts_with('#') {
                self.header.push(line.to_string());
                continue;
            }

            return Variant::parse_line(line, self.line_number, self.with_alleles).map(Some);
        }
    }

    /// Header lines seen so far.
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Consume the reader, yielding the accumulated header.
    pub fn into_header(self) -> Vec<String> {
        self.header
    }
}

/// Read a whole variant file into memory.
pub fn read_variant_file<P: AsRef<Path>>(path: P, with_alleles: bool) -> Result<VariantFile> {
    let mut reader = VcfReader::from_path(path, with_alleles)?;

    let mut variants = Vec::new();
    while let Some(variant) = reader.read_record()? {
        variants.push(variant);
    }

    Ok(VariantFile {
        header: reader.into_header(),
        variants,
    })
}

/// Parse a variant file from a string (useful for testing).
pub fn parse_variant_file(content: &str, with_alleles: bool) -> Result<VariantFile> {
    let mut reader = VcfReader::new(content.as_bytes(), with_alleles);
    let mut variants = Vec::new();
    while let Some(variant) = reader.read_record()? {
        variants.push(variant);
    }
    Ok(VariantFile {
        header: reader.into_header(),
        variants,
    })
}

/// Write header lines followed by record lines, each newline-terminated.
pub fn write_variant_file<W: io::Write>(
    writer: &mut W,
    header: &[String],
    variants: &[Variant],
) -> io::Result<()> {
    for line in header {
        writeln!(writer, "{}", line)?;
    }
    for variant in variants {
        writeln!(writer, "{}", variant.line())?;
    }
    Ok(())
}

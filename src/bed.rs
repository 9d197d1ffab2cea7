//! Streaming region file parser.
//!
//! Region files are BED-style: lines beginning with a "chr" label are data
//! rows with columns [chrom, start, end, ...]; every other line (track
//! lines, comments, even blanks) belongs to the header and is preserved
//! verbatim, in order, for reattachment to derived outputs.

use crate::record::{Region, Result};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

/// A fully read region file: its header lines plus parsed records.
#[derive(Debug, Clone, Default)]
pub struct RegionFile {
    pub header: Vec<String>,
    pub regions: Vec<Region>,
}

/// A streaming region file reader.
pub struct BedReader<R: Read> {
    reader: BufReader<R>,
    line_number: usize,
    buffer: String,
    header: Vec<String>,
}

impl BedReader<File> {
    /// Open a region file from a path.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(file))
    }
}

impl<R: Read> BedReader<R> {
    /// Create a reader from any readable source.
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
            line_number: 0,
            buffer: String::with_capacity(1024),
            header: Vec::new(),
        }
    }

    /// Read the next data record, accumulating any header lines passed on
    /// the way. Returns Ok(None) at end of input.
    pub fn read_record(&mut self) -> Result<Option<Region>> {
        loop {
            self.buffer.clear();
            let bytes_read = self.reader.read_line(&mut self.buffer)?;
            if bytes_read == 0 {
                return Ok(None);
            }
            self.line_number += 1;

            // Only the terminator is trimmed; header lines stay verbatim.
            let line = self.buffer.trim_end_matches(['\r', '\n']);
            if !line.starts_with("chr") {
                self.header.push(line.to_string());
                continue;
            }

            return Region::parse_line(line, self.line_number).map(Some);
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

/// Read a whole region file into memory.
pub fn read_region_file<P: AsRef<Path>>(path: P) -> Result<RegionFile> {
    let mut reader = BedReader::from_path(path)?;

    let mut regions = Vec::new();
    while let Some(region) = reader.read_record()? {
        regions.push(region);
    }

    Ok(RegionFile {
        header: reader.into_header(),
        regions,
    })
}

/// Parse a region file from a string (useful for testing).
pub fn parse_region_file(content: &str) -> Result<RegionFile> {
    let mut reader = BedReader::new(content.as_bytes());
    let mut regions = Vec::new();
    while let Some(region) = reader.read_record()? {
        regions.push(region);
    }
    Ok(RegionFile {
        header: reader.into_header(),
        regions,
    })
}

/// Write header lines followed by record lines, each newline-terminated.
pub fn write_region_file<W: io::Write>(
    writer: &mut W,
    header: &[String],
    regions: &[Region],
) -> io::Result<()> {
    for line in header {
        writeln!(writer, "{}", line)?;
    }
    for region in regions {
        writeln!(writer, "{}", region.line())?;
    }
    Ok(())
}

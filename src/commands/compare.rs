//! Compare command implementation.
//!
//! Partitions an input variant collection against a reference collection by
//! identity key into concordant / unique-to-input / unique-to-reference.
//!
//! Duplicate keys within one collection are preserved per-occurrence: each
//! record is classified independently and none are collapsed, so output
//! sizes always add up to the input sizes.

use crate::record::{RecordError, Result, Variant, VariantKey};
use crate::vcf::{read_variant_file, write_variant_file};
use rustc_hash::FxHashSet;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// The three-way split produced by [`CompareCommand::partition`].
#[derive(Debug, Clone, Default)]
pub struct Partition {
    /// Records of the input whose key also occurs in the reference.
    pub concordant: Vec<Variant>,
    /// Records of the input whose key does not occur in the reference.
    pub unique_to_input: Vec<Variant>,
    /// Records of the reference whose key does not occur in the input.
    pub unique_to_reference: Vec<Variant>,
}

/// Paths of the three files written by [`CompareCommand::run`].
#[derive(Debug, Clone)]
pub struct CompareOutputs {
    pub concordant: PathBuf,
    pub unique_to_input: PathBuf,
    pub unique_to_reference: PathBuf,
}

/// Compare command configuration.
#[derive(Debug, Clone, Default)]
pub struct CompareCommand;

impl CompareCommand {
    pub fn new() -> Self {
        Self
    }

    /// Partition `input` against `reference` by identity key.
    ///
    /// Each output preserves its source collection's order. Total over any
    /// two collections, including empty ones.
    pub fn partition(&self, input: Vec<Variant>, reference: Vec<Variant>) -> Partition {
        let input_keys: FxHashSet<VariantKey> = input.iter().map(Variant::key).collect();
        let reference_keys: FxHashSet<VariantKey> = reference.iter().map(Variant::key).collect();

        let mut concordant = Vec::new();
        let mut unique_to_input = Vec::new();
        for variant in input {
            if reference_keys.contains(&variant.key()) {
                concordant.push(variant);
            } else {
                unique_to_input.push(variant);
            }
        }

        let unique_to_reference = reference
            .into_iter()
            .filter(|variant| !input_keys.contains(&variant.key()))
            .collect();

        Partition {
            concordant,
            unique_to_input,
            unique_to_reference,
        }
    }

    /// Execute compare on two variant files.
    ///
    /// Writes three result files with names derived from the source stems:
    /// `<input>_concordant`, `<input>_unique` and `<reference>_unique`, each
    /// keeping its source's extension. Files land next to the input unless
    /// `out_dir` is given. Concordant and unique-to-input outputs carry the
    /// input file's header; unique-to-reference carries the reference's.
    pub fn run(
        &self,
        input: &Path,
        reference: &Path,
        out_dir: Option<&Path>,
    ) -> Result<CompareOutputs> {
        let input_file = read_variant_file(input, true)?;
        let reference_file = read_variant_file(reference, true)?;

        let partition = self.partition(input_file.variants, reference_file.variants);

        let dir = match out_dir {
            Some(dir) => dir.to_path_buf(),
            None => input.parent().map(Path::to_path_buf).unwrap_or_default(),
        };

        let outputs = CompareOutputs {
            concordant: derived_path(&dir, input, "concordant")?,
            unique_to_input: derived_path(&dir, input, "unique")?,
            unique_to_reference: derived_path(&dir, reference, "unique")?,
        };

        write_partition_file(&outputs.concordant, &input_file.header, &partition.concordant)?;
        write_partition_file(
            &outputs.unique_to_input,
            &input_file.header,
            &partition.unique_to_input,
        )?;
        write_partition_file(
            &outputs.unique_to_reference,
            &reference_file.header,
            &partition.unique_to_reference,
        )?;

        Ok(outputs)
    }
}

fn write_partition_file(path: &Path, header: &[String], variants: &[Variant]) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::with_capacity(256 * 1024, file);
    write_variant_file(&mut writer, header, variants).map_err(RecordError::Io)
}

/// `<dir>/<stem>_<label><ext>` for a source file.
fn derived_path(dir: &Path, source: &Path, label: &str) -> Result<PathBuf> {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .ok_or_else(|| {
            RecordError::InvalidFormat(format!("cannot derive a filename from '{}'", source.display()))
        })?;

    let name = match source.extension() {
        Some(ext) => format!("{}_{}.{}", stem, label, ext.to_string_lossy()),
        None => format!("{}_{}", stem, label),
    };
    Ok(dir.join(name))
}

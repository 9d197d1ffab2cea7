//! File-level integration tests for the compare command.
//!
//! Tests verify:
//! 1. The three result files and their derived names
//! 2. Which header each result file carries
//! 3. Identity matching across "chr" prefix differences in files

use std::fs;
use std::path::Path;
use tempfile::tempdir;
use varkit::commands::CompareCommand;

fn write_file(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_compare_writes_three_derived_files() {
    let dir = tempdir().unwrap();
    let input = write_file(
        dir.path(),
        "calls.vcf",
        "##input-header\nchr1\t10\trs1\tA\tT\nchr1\t20\trs2\tC\tG\n",
    );
    let reference = write_file(
        dir.path(),
        "truth.vcf",
        "##reference-header\n1\t10\t.\tA\tT\n1\t30\t.\tG\tC\n",
    );

    let outputs = CompareCommand::new()
        .run(&input, &reference, None)
        .unwrap();

    assert_eq!(outputs.concordant, dir.path().join("calls_concordant.vcf"));
    assert_eq!(outputs.unique_to_input, dir.path().join("calls_unique.vcf"));
    assert_eq!(
        outputs.unique_to_reference,
        dir.path().join("truth_unique.vcf")
    );

    // Concordant records come from the input file, with the input header
    assert_eq!(
        fs::read_to_string(&outputs.concordant).unwrap(),
        "##input-header\nchr1\t10\trs1\tA\tT\n"
    );
    assert_eq!(
        fs::read_to_string(&outputs.unique_to_input).unwrap(),
        "##input-header\nchr1\t20\trs2\tC\tG\n"
    );
    // Unique-to-reference records carry the reference header
    assert_eq!(
        fs::read_to_string(&outputs.unique_to_reference).unwrap(),
        "##reference-header\n1\t30\t.\tG\tC\n"
    );
}

#[test]
fn test_compare_honors_out_dir() {
    let src = tempdir().unwrap();
    let dst = tempdir().unwrap();

    let input = write_file(src.path(), "a.vcf", "chr1\t1\t.\tA\tT\n");
    let reference = write_file(src.path(), "b.vcf", "chr1\t1\t.\tA\tT\n");

    let outputs = CompareCommand::new()
        .run(&input, &reference, Some(dst.path()))
        .unwrap();

    assert_eq!(outputs.concordant, dst.path().join("a_concordant.vcf"));
    assert!(outputs.concordant.exists());
    assert!(outputs.unique_to_input.exists());
    assert!(outputs.unique_to_reference.exists());

    // Fully concordant: both unique files hold no records
    assert_eq!(fs::read_to_string(&outputs.unique_to_input).unwrap(), "");
    assert_eq!(
        fs::read_to_string(&outputs.unique_to_reference).unwrap(),
        ""
    );
}

#[test]
fn test_compare_requires_allele_columns() {
    let dir = tempdir().unwrap();
    let input = write_file(dir.path(), "a.vcf", "chr1\t1\n");
    let reference = write_file(dir.path(), "b.vcf", "chr1\t1\t.\tA\tT\n");

    assert!(CompareCommand::new().run(&input, &reference, None).is_err());
}

#[test]
fn test_compare_empty_files() {
    let dir = tempdir().unwrap();
    let input = write_file(dir.path(), "a.vcf", "#only-header\n");
    let reference = write_file(dir.path(), "b.vcf", "");

    let outputs = CompareCommand::new()
        .run(&input, &reference, None)
        .unwrap();

    assert_eq!(
        fs::read_to_string(&outputs.concordant).unwrap(),
        "#only-header\n"
    );
    assert_eq!(
        fs::read_to_string(&outputs.unique_to_reference).unwrap(),
        ""
    );
}

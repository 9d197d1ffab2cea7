//! VARKIT: Variant and Region Toolkit
//!
//! Usage: varkit <COMMAND> [OPTIONS]

use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process;

use varkit::commands::{CompareCommand, IntersectCommand, SortCommand, Strategy};
use varkit::record::RecordError;

#[derive(Parser)]
#[command(name = "varkit")]
#[command(version)]
#[command(about = "VARKIT: Variant and Region Toolkit - sorting, concordance and region filtering for VCF/BED files", long_about = None)]
struct Cli {
    /// Number of threads to use (default: number of CPUs)
    #[arg(long, short = 't', global = true)]
    threads: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sort a VCF or BED file by chromosome and start coordinate
    Sort {
        /// Input file (.vcf or .bed)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Report whether the file is already sorted instead of writing output
        #[arg(short, long)]
        check: bool,

        /// Reverse the sort order
        #[arg(short, long)]
        reverse: bool,
    },

    /// Filter a variant file by the coverage regions of a BED file
    Intersect {
        /// Input variant file
        #[arg(short = 'v', long)]
        variant_file: PathBuf,

        /// Input region file
        #[arg(short = 'r', long)]
        region_file: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Inputs are sorted and regions disjoint: use the linear sweep
        #[arg(short = 's', long)]
        sorted: bool,

        /// Verify the sweep's preconditions before filtering
        #[arg(long)]
        check_sorted: bool,
    },

    /// Compare two variant files by variant identity
    Compare {
        /// Input variant file
        #[arg(short = 'v', long)]
        variant_file: PathBuf,

        /// Reference variant file
        #[arg(short = 'r', long)]
        reference_file: PathBuf,

        /// Directory for the three result files (default: the input file's directory)
        #[arg(short, long)]
        out_dir: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    // Configure thread pool if --threads specified
    if let Some(n) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build_global()
            .expect("Failed to initialize thread pool");
    }

    let result = match cli.command {
        Commands::Sort {
            input,
            output,
            check,
            reverse,
        } => run_sort(input, output, check, reverse),

        Commands::Intersect {
            variant_file,
            region_file,
            output,
            sorted,
            check_sorted,
        } => run_intersect(variant_file, region_file, output, sorted, check_sorted),

        Commands::Compare {
            variant_file,
            reference_file,
            out_dir,
        } => run_compare(variant_file, reference_file, out_dir),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run_sort(
    input: PathBuf,
    output: Option<PathBuf>,
    check: bool,
    reverse: bool,
) -> Result<(), RecordError> {
    let cmd = SortCommand { reverse };

    if check {
        if cmd.run_check(&input)? {
            println!("File is sorted");
        } else {
            println!("File is not sorted");
        }
        return Ok(());
    }

    match output {
        Some(path) => {
            let file = File::create(&path)?;
            let mut writer = BufWriter::with_capacity(256 * 1024, file);
            cmd.run(&input, &mut writer)?;
            writer.flush()?;
            eprintln!("Sorted file saved as: {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::with_capacity(256 * 1024, stdout.lock());
            cmd.run(&input, &mut writer)?;
            writer.flush()?;
        }
    }

    Ok(())
}

fn run_intersect(
    variant_file: PathBuf,
    region_file: PathBuf,
    output: Option<PathBuf>,
    sorted: bool,
    check_sorted: bool,
) -> Result<(), RecordError> {
    let cmd = IntersectCommand {
        strategy: if sorted {
            Strategy::SortedSweep
        } else {
            Strategy::Exhaustive
        },
        check_sorted,
        parallel: true,
    };

    match output {
        Some(path) => {
            let file = File::create(&path)?;
            let mut writer = BufWriter::with_capacity(256 * 1024, file);
            cmd.run(&variant_file, &region_file, &mut writer)?;
            writer.flush()?;
            eprintln!("Intersect file saved as: {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::with_capacity(256 * 1024, stdout.lock());
            cmd.run(&variant_file, &region_file, &mut writer)?;
            writer.flush()?;
        }
    }

    Ok(())
}

fn run_compare(
    variant_file: PathBuf,
    reference_file: PathBuf,
    out_dir: Option<PathBuf>,
) -> Result<(), RecordError> {
    let cmd = CompareCommand::new();
    let outputs = cmd.run(&variant_file, &reference_file, out_dir.as_deref())?;

    eprintln!("Concordant results saved as: {}", outputs.concordant.display());
    eprintln!(
        "Unique to input saved as: {}",
        outputs.unique_to_input.display()
    );
    eprintln!(
        "Unique to reference saved as: {}",
        outputs.unique_to_reference.display()
    );

    Ok(())
}

use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use optimal_prefix::{CodeLengthReport, FrequencyTable, HuffmanTree};
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

/// Print the Huffman code length and bit cost of every byte in a file.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// File to analyze.
    input: PathBuf,

    /// Raise log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    // Only fails if a subscriber is already installed.
    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn run(args: &Args) -> optimal_prefix::Result<()> {
    let table = FrequencyTable::from_reader(File::open(&args.input)?)?;
    info!(path = %args.input.display(), bytes = table.total(), "counted input");

    let tree = HuffmanTree::build(&table)?;
    let report = CodeLengthReport::new(&table, &tree)?;

    print!("{}", report);
    println!("total: {} bits.", report.total_bits());
    info!(
        average = report.average_code_length(),
        entropy = table.entropy(),
        "bits per byte"
    );
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "report failed");
            eprintln!("huffman_report: {}", e);
            ExitCode::FAILURE
        }
    }
}

use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use search_bench::{
    util::{init_trace, time},
    BenchConfig, BenchError, Benchmark, IdentifierSet, SizeClass,
};

/// Compare hashing, linear and brute-force search latency on CSV identifiers.
#[derive(Parser)]
struct Args {
    /// CSV file to read identifiers from [default: sampleData.csv].
    #[clap(short, long)]
    input: Option<PathBuf>,
    /// Name of the integer identifier column [default: log_id].
    #[clap(short, long)]
    column: Option<String>,
    /// Dataset sizes as LABEL=SIZE, in report order
    /// [default: Small=10,Medium=100,Large=1000].
    #[clap(short, long, value_delimiter = ',')]
    sizes: Option<Vec<SizeClass>>,
    /// Timed calls per strategy and dataset [default: 10].
    #[clap(short, long)]
    runs: Option<usize>,
    /// Queries per batch; half hit, half miss [default: 100].
    #[clap(short, long)]
    queries: Option<usize>,
    /// Also write the results as JSON to this file.
    #[clap(long)]
    json: Option<PathBuf>,
    /// More logging on stderr. Repeat for more detail.
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    /// No logging at all.
    #[clap(long)]
    quiet: bool,
}

impl Args {
    fn config(&self) -> BenchConfig {
        let d = BenchConfig::default();
        BenchConfig {
            input: self.input.clone().unwrap_or(d.input),
            column: self.column.clone().unwrap_or(d.column),
            sizes: self.sizes.clone().unwrap_or(d.sizes),
            runs: self.runs.unwrap_or(d.runs),
            queries: self.queries.unwrap_or(d.queries),
        }
    }
}

fn run(args: &Args) -> Result<(), BenchError> {
    let config = args.config();
    config.validate()?;

    let ids = time("Loading identifiers", || {
        IdentifierSet::load(&config.input, &config.column)
    })?;
    let table = Benchmark::new(&ids, &config).run()?;

    if let Some(path) = &args.json {
        table.save_json(path)?;
    }
    print!("{table}");
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_trace(1 + args.verbose as usize, args.quiet);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error during {}: {e}", e.stage());
            ExitCode::FAILURE
        }
    }
}

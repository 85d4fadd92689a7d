use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use search_bench::{
    strategy_by_name, util::init_trace, BenchConfig, BenchError, Benchmark, IdentifierSet,
};

#[derive(Parser)]
struct Args {
    /// Strategy to run: hashing, linear-search or brute-force.
    #[clap(long)]
    fname: String,

    #[clap(short, long)]
    input: Option<PathBuf>,

    #[clap(short, long)]
    column: Option<String>,

    #[clap(short, long)]
    runs: Option<usize>,
}

fn run(args: &Args) -> Result<(), BenchError> {
    let scheme = strategy_by_name(&args.fname)
        .ok_or_else(|| BenchError::Config(format!("unknown strategy `{}`", args.fname)))?;
    let d = BenchConfig::default();
    let config = BenchConfig {
        input: args.input.clone().unwrap_or(d.input),
        column: args.column.clone().unwrap_or(d.column),
        runs: args.runs.unwrap_or(d.runs),
        sizes: d.sizes,
        queries: d.queries,
    };
    let ids = IdentifierSet::load(&config.input, &config.column)?;
    let table = Benchmark::new(&ids, &config).run_one(scheme)?;
    println!("{}", scheme.name());
    for row in &table.rows {
        println!("{} {} {:.4}", row.label, row.size, row.means[0]);
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_trace(1, false);
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error during {}: {e}", e.stage());
            ExitCode::FAILURE
        }
    }
}

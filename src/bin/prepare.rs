//! Run the full preparation pipeline: base tables, then the stratified split
//!
//! Usage: cargo run --bin prepare -- --root . --test-fraction 0.3

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use penguin_prep::{pipeline, PipelineConfig};
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "prepare", about = "Prepare the penguin dataset for training")]
struct Args {
    /// Project root containing the data/ directory
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Fraction of rows held out for testing
    #[arg(long, default_value = "0.3")]
    test_fraction: f64,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "penguin_prep=info,prepare=info".into()),
        )
        .init();

    let args = Args::parse();
    let cfg = PipelineConfig::new(&args.root).with_test_fraction(args.test_fraction);

    if let Err(e) = pipeline::prepare_base_tables(&cfg) {
        error!("preparing base tables failed: {e}");
        return ExitCode::FAILURE;
    }

    match pipeline::split(&cfg) {
        Ok(tables) => {
            info!(
                "pipeline complete: {} train rows, {} test rows",
                tables.x_train.n_rows(),
                tables.x_test.n_rows()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("splitting failed: {e}");
            ExitCode::FAILURE
        }
    }
}

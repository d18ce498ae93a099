use anyhow::Context;
use clap::Parser;
use factor_fixture::core::verify::{verify_file, VerifyOptions};
use factor_fixture::utils::logger::{self, LogFormat};

#[derive(Parser)]
#[command(name = "verify_factors")]
#[command(about = "Checks a factors file written by factor-fixture")]
struct Args {
    /// Factors file to check
    path: String,

    /// Accept a file from a run that was killed part way through
    #[arg(long)]
    allow_partial: bool,

    /// Require the file to cover every i below this bound
    #[arg(short = 'n', long)]
    upper_bound: Option<u64>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose, LogFormat::Compact);

    let options = VerifyOptions {
        allow_partial: args.allow_partial,
        expected_upper_bound: args.upper_bound,
    };

    let report = match verify_file(&args.path, options) {
        Ok(report) => report,
        Err(e) => {
            tracing::debug!("Verification error: {:?}", e);
            eprintln!("❌ {}: {}", args.path, e.user_friendly_message());
            std::process::exit(1);
        }
    };

    if args.json {
        let json = serde_json::to_string_pretty(&report).context("serializing report")?;
        println!("{}", json);
    } else {
        println!("✅ {} is valid", args.path);
        println!("  Lines: {}", report.lines);
        println!("  Values: {}", report.distinct_values);
        match report.last_value {
            Some(last) => println!("  Last i: {}", last),
            None => println!("  Last i: -"),
        }
        println!("  Complete: {}", report.complete);
    }

    Ok(())
}

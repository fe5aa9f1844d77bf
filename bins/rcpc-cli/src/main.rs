use std::fs;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod config;

/// Decodes a raw LLR sample file against a code descriptor.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Soft-decision Viterbi decoder",
    long_about = "Decodes a stream of signed 8-bit LLR samples against a TOML code descriptor \
                  and writes the most-likely information bits to a file."
)]
struct Args {
    /// TOML file describing K, N, length, termination and (optionally)
    /// puncturing / recursive feedback taps.
    #[arg(help = "Path to the code descriptor TOML file")]
    descriptor: String,

    /// Raw signed-byte LLR samples, positive meaning "more likely bit 0".
    #[arg(help = "Path to the raw LLR sample file")]
    input: String,

    /// Destination for the decoded bits, one byte (0x00/0x01) per bit.
    #[arg(help = "Path to write the decoded bits to")]
    output: String,
}

fn run(args: &Args) -> Result<(), String> {
    let descriptor = config::load_descriptor(&args.descriptor)?;

    let raw = fs::read(&args.input).map_err(|e| format!("failed to read {}: {e}", args.input))?;
    let soft_bits: Vec<i8> = raw.into_iter().map(|b| b as i8).collect();

    let decoded = rcpc_core::decode(&descriptor, &soft_bits)
        .map_err(|e| format!("decode failed: {e}"))?;

    fs::write(&args.output, &decoded)
        .map_err(|e| format!("failed to write {}: {e}", args.output))?;

    tracing::info!(
        bits = decoded.len(),
        output = %args.output,
        "decode complete"
    );
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

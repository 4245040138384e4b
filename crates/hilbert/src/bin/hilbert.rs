//! Command-line front end: check a proof file or discharge its last hypothesis

use anyhow::Context;
use clap::Parser;
use hilbert::{parse_proof_file, run, Mode, OutputFormat, RunConfig};
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(
    name = "hilbert",
    about = "Check Hilbert-style proofs or discharge their last hypothesis"
)]
struct Args {
    /// Proof file: a `hypotheses |- goal` header, then one formula per line
    #[arg(default_value = "task2.in")]
    input: PathBuf,

    /// Where to write the annotated or elaborated proof
    #[arg(default_value = "task2.out")]
    output: PathBuf,

    #[arg(value_enum, default_value_t = Mode::Check)]
    mode: Mode,

    /// Directory with replacement proof templates
    #[arg(long)]
    templates: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let start = Instant::now();

    let proof = parse_proof_file(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    log::info!(
        "Read {} hypotheses and {} proof lines from {}",
        proof.hypotheses.len(),
        proof.lines.len(),
        args.input.display()
    );

    let config = RunConfig {
        mode: args.mode,
        format: args.format,
        templates: args.templates,
    };
    let output = run(&proof, &config)?;
    for message in &output.diagnostics {
        eprintln!("{}", message);
    }

    fs::write(&args.output, &output.document)
        .with_context(|| format!("writing {}", args.output.display()))?;
    log::info!(
        "Wrote {} in {:.3}s",
        args.output.display(),
        start.elapsed().as_secs_f64()
    );
    Ok(())
}

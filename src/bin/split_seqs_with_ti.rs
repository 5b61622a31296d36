use std::io;
use std::process::ExitCode;

use camino::Utf8PathBuf;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use taxid_annotate::app::App;
use taxid_annotate::config::{DEFAULT_DB, DEFAULT_MAX_CHARS, RunConfig, SplitConfig};
use taxid_annotate::error::AnnotateError;

#[derive(Parser)]
#[command(name = "split-seqs-with-ti")]
#[command(about = "Get sequences with taxonomy id appended, split into size-bounded files")]
#[command(version)]
struct Cli {
    /// Database root
    #[arg(long, default_value = DEFAULT_DB)]
    db: String,

    /// Summary file (default: <TLEVEL>.assembly_summary.txt)
    #[arg(long)]
    sumfile: Option<String>,

    /// Max characters in file
    #[arg(long, default_value_t = DEFAULT_MAX_CHARS)]
    maxchar: f64,

    /// Write a JSON report of resolved taxonomy IDs and output files here
    #[arg(long)]
    summary_json: Option<String>,

    /// Taxonomy level to process
    tlevel: String,

    /// Output prefix; files are named <PREFIX>.NN.fna
    prefix: String,
}

fn main() -> ExitCode {
    if let Err(report) = run() {
        eprintln!("{report:?}");
        if let Some(err) = report.downcast_ref::<AnnotateError>() {
            return ExitCode::from(err.exit_code());
        }
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn run() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let split = SplitConfig::new(cli.prefix.as_str(), cli.maxchar)?;
    let app = App::new(RunConfig::new(
        cli.db.as_str(),
        &cli.tlevel,
        cli.sumfile.as_deref(),
    ));

    let report = app.split(split)?;
    info!(
        "wrote {} records to {} files",
        report.records(),
        report.chunks.len()
    );
    let placeholders = report.placeholders().count();
    if placeholders > 0 {
        warn!("{placeholders} assemblies were annotated with a placeholder taxonomy ID");
    }
    if let Some(path) = cli.summary_json {
        report.write_json(&Utf8PathBuf::from(path))?;
    }
    Ok(())
}

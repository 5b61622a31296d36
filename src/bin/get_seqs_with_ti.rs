use std::fs::File;
use std::io::{self, BufWriter};
use std::process::ExitCode;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use taxid_annotate::app::App;
use taxid_annotate::config::{DEFAULT_DB, RunConfig};
use taxid_annotate::error::AnnotateError;

#[derive(Parser)]
#[command(name = "get-seqs-with-ti")]
#[command(about = "Get sequences with taxonomy id appended")]
#[command(version)]
struct Cli {
    /// Database root
    #[arg(long, default_value = DEFAULT_DB)]
    db: String,

    /// Summary file (default: <TLEVEL>.assembly_summary.txt)
    #[arg(long)]
    sumfile: Option<String>,

    /// Write a JSON report of resolved taxonomy IDs here
    #[arg(long)]
    summary_json: Option<String>,

    /// Taxonomy level to process
    tlevel: String,

    /// Output FASTA (default: stdout)
    outfile: Option<String>,
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
    let app = App::new(RunConfig::new(
        cli.db.as_str(),
        &cli.tlevel,
        cli.sumfile.as_deref(),
    ));

    let report = match &cli.outfile {
        Some(path) => {
            let path = Utf8PathBuf::from(path);
            let file = File::create(&path).map_err(|err| AnnotateError::io(&path, err))?;
            app.annotate_to(&mut BufWriter::new(file), &path)?
        }
        None => {
            let mut out = BufWriter::new(io::stdout().lock());
            app.annotate_to(&mut out, Utf8Path::new("<stdout>"))?
        }
    };

    let placeholders = report.placeholders().count();
    if placeholders > 0 {
        warn!("{placeholders} assemblies were annotated with a placeholder taxonomy ID");
    }
    if let Some(path) = cli.summary_json {
        report.write_json(&Utf8PathBuf::from(path))?;
    }
    Ok(())
}

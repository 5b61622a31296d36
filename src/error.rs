use camino::Utf8PathBuf;
use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum AnnotateError {
    #[error("filesystem error at {path}: {message}")]
    Io { path: Utf8PathBuf, message: String },

    #[error("assembly summary {0} has no header line")]
    SummaryEmpty(Utf8PathBuf),

    #[error("assembly summary header has no `{0}` column")]
    SummaryMissingColumn(String),

    #[error("assembly summary {path} line {line}: {message}")]
    SummaryRow {
        path: Utf8PathBuf,
        line: usize,
        message: String,
    },

    #[error("malformed VERSION line {line} in {path}: {content:?}")]
    #[diagnostic(help("expected `VERSION <accession> GI:<gi>`"))]
    MalformedVersionLine {
        path: Utf8PathBuf,
        line: usize,
        content: String,
    },

    #[error("GenBank file {0} does not exist")]
    #[diagnostic(help("every *_genomic.fna.gz needs a *_genomic.gbff.gz next to it"))]
    MissingGenBank(Utf8PathBuf),

    #[error("accession {accession} from {fasta} has no GI in the GenBank file")]
    MissingGi {
        accession: String,
        fasta: Utf8PathBuf,
    },

    #[error("not a genomic FASTA path: {0}")]
    InvalidAssemblyPath(String),

    #[error("invalid max characters: {0}")]
    InvalidMaxChars(String),

    #[error("failed to write run report: {0}")]
    Report(String),
}

impl AnnotateError {
    pub fn io(path: impl Into<Utf8PathBuf>, err: impl std::fmt::Display) -> Self {
        AnnotateError::Io {
            path: path.into(),
            message: err.to_string(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            AnnotateError::MissingGenBank(_)
            | AnnotateError::MissingGi { .. }
            | AnnotateError::MalformedVersionLine { .. }
            | AnnotateError::SummaryEmpty(_)
            | AnnotateError::SummaryMissingColumn(_)
            | AnnotateError::SummaryRow { .. } => 2,
            _ => 1,
        }
    }
}

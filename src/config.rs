use camino::{Utf8Path, Utf8PathBuf};

use crate::error::AnnotateError;

pub const DEFAULT_DB: &str = "refseq";
pub const DEFAULT_MAX_CHARS: f64 = 4e9;

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub db: Utf8PathBuf,
    pub taxonomy_level: String,
    pub summary_file: Option<Utf8PathBuf>,
}

impl RunConfig {
    pub fn new(
        db: impl Into<Utf8PathBuf>,
        taxonomy_level: impl Into<String>,
        summary_file: Option<&str>,
    ) -> Self {
        Self {
            db: db.into(),
            taxonomy_level: taxonomy_level.into(),
            summary_file: summary_file
                .filter(|path| !path.is_empty())
                .map(Utf8PathBuf::from),
        }
    }

    pub fn summary_path(&self) -> Utf8PathBuf {
        match &self.summary_file {
            Some(path) => path.clone(),
            None => Utf8PathBuf::from(format!("{}.assembly_summary.txt", self.taxonomy_level)),
        }
    }

    pub fn level_root(&self) -> Utf8PathBuf {
        self.db.join(&self.taxonomy_level)
    }
}

#[derive(Debug, Clone)]
pub struct SplitConfig {
    pub prefix: Utf8PathBuf,
    pub max_chars: f64,
}

impl SplitConfig {
    pub fn new(prefix: impl Into<Utf8PathBuf>, max_chars: f64) -> Result<Self, AnnotateError> {
        if !max_chars.is_finite() || max_chars < 0.0 {
            return Err(AnnotateError::InvalidMaxChars(max_chars.to_string()));
        }
        Ok(Self {
            prefix: prefix.into(),
            max_chars,
        })
    }

    pub fn chunk_path(&self, index: u32) -> Utf8PathBuf {
        chunk_path(&self.prefix, index)
    }
}

pub fn chunk_path(prefix: &Utf8Path, index: u32) -> Utf8PathBuf {
    Utf8PathBuf::from(format!("{prefix}.{index:02}.fna"))
}

use std::fmt;
use std::str::FromStr;

use camino::Utf8Path;
use serde::Serialize;

use crate::error::AnnotateError;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct AssemblyId(String);

impl AssemblyId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn prefix(&self) -> &str {
        self.0.split('.').next().unwrap_or(&self.0)
    }

    pub fn from_fasta_path(path: &Utf8Path) -> Result<Self, AnnotateError> {
        let name = path
            .file_name()
            .ok_or_else(|| AnnotateError::InvalidAssemblyPath(path.to_string()))?;
        let (id, _) = name
            .split_once("_genomic")
            .ok_or_else(|| AnnotateError::InvalidAssemblyPath(path.to_string()))?;
        id.parse()
    }

    pub fn from_ftp_path(ftp_path: &str) -> Self {
        let last = ftp_path.rsplit('/').next().unwrap_or(ftp_path);
        Self(last.to_string())
    }
}

impl fmt::Display for AssemblyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AssemblyId {
    type Err = AnnotateError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.is_empty() {
            return Err(AnnotateError::InvalidAssemblyPath(value.to_string()));
        }
        Ok(Self(value.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TaxidSource {
    Exact,
    Prefix,
    GenBank,
    /// No tier answered; the value is the assembly prefix, not a real taxid.
    Placeholder,
}

impl fmt::Display for TaxidSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaxidSource::Exact => write!(f, "exact"),
            TaxidSource::Prefix => write!(f, "prefix"),
            TaxidSource::GenBank => write!(f, "genbank"),
            TaxidSource::Placeholder => write!(f, "placeholder"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedTaxid {
    pub taxid: String,
    pub source: TaxidSource,
}

impl ResolvedTaxid {
    pub fn new(taxid: impl Into<String>, source: TaxidSource) -> Self {
        Self {
            taxid: taxid.into(),
            source,
        }
    }
}

use std::fs::File;
use std::io::{BufWriter, Write};

use camino::{Utf8Path, Utf8PathBuf};
use serde::Serialize;

use crate::domain::{AssemblyId, ResolvedTaxid, TaxidSource};
use crate::error::AnnotateError;
use crate::splitter::ChunkSummary;

#[derive(Debug, Clone, Serialize)]
pub struct AssemblyReport {
    pub assembly: AssemblyId,
    pub fasta: Utf8PathBuf,
    pub taxid: String,
    pub source: TaxidSource,
    pub records: u64,
}

impl AssemblyReport {
    pub fn new(
        assembly: AssemblyId,
        fasta: Utf8PathBuf,
        resolved: ResolvedTaxid,
        records: u64,
    ) -> Self {
        Self {
            assembly,
            fasta,
            taxid: resolved.taxid,
            source: resolved.source,
            records,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    pub taxonomy_level: String,
    pub assemblies: Vec<AssemblyReport>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub chunks: Vec<ChunkSummary>,
}

impl RunReport {
    pub fn new(taxonomy_level: impl Into<String>) -> Self {
        Self {
            taxonomy_level: taxonomy_level.into(),
            ..Self::default()
        }
    }

    pub fn records(&self) -> u64 {
        self.assemblies.iter().map(|assembly| assembly.records).sum()
    }

    pub fn placeholders(&self) -> impl Iterator<Item = &AssemblyReport> {
        self.assemblies
            .iter()
            .filter(|assembly| assembly.source == TaxidSource::Placeholder)
    }

    pub fn write_json(&self, path: &Utf8Path) -> Result<(), AnnotateError> {
        let file = File::create(path).map_err(|err| AnnotateError::io(path, err))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)
            .map_err(|err| AnnotateError::Report(err.to_string()))?;
        writer
            .write_all(b"\n")
            .and_then(|()| writer.flush())
            .map_err(|err| AnnotateError::io(path, err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_json_shape() {
        let mut report = RunReport::new("viral");
        report.assemblies.push(AssemblyReport::new(
            "GCF_1.1_A".parse().unwrap(),
            Utf8PathBuf::from("a_genomic.fna.gz"),
            ResolvedTaxid::new("GCF_1", TaxidSource::Placeholder),
            3,
        ));
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["taxonomy_level"], "viral");
        assert_eq!(json["assemblies"][0]["assembly"], "GCF_1.1_A");
        assert_eq!(json["assemblies"][0]["source"], "placeholder");
        assert!(json.get("chunks").is_none());
        assert_eq!(report.placeholders().count(), 1);
        assert_eq!(report.records(), 3);
    }
}

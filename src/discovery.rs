use camino::{Utf8DirEntry, Utf8Path, Utf8PathBuf};

use crate::domain::AssemblyId;
use crate::error::AnnotateError;

const LATEST_VERSIONS_DIR: &str = "latest_assembly_versions";
const FASTA_SUFFIX: &str = "_genomic.fna.gz";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assembly {
    pub id: AssemblyId,
    pub fasta: Utf8PathBuf,
    pub genbank: Utf8PathBuf,
}

impl Assembly {
    pub fn from_fasta(fasta: Utf8PathBuf) -> Result<Self, AnnotateError> {
        let id = AssemblyId::from_fasta_path(&fasta)?;
        let stem = fasta
            .as_str()
            .strip_suffix(".fna.gz")
            .ok_or_else(|| AnnotateError::InvalidAssemblyPath(fasta.to_string()))?;
        let genbank = Utf8PathBuf::from(format!("{stem}.gbff.gz"));
        Ok(Self { id, fasta, genbank })
    }

    pub fn require_genbank(&self) -> Result<&Utf8Path, AnnotateError> {
        if !self.genbank.is_file() {
            return Err(AnnotateError::MissingGenBank(self.genbank.clone()));
        }
        Ok(&self.genbank)
    }
}

pub fn discover_assemblies(level_root: &Utf8Path) -> Result<Vec<Assembly>, AnnotateError> {
    let mut fastas = Vec::new();
    for species in visible_dirs(level_root)? {
        let latest = species.join(LATEST_VERSIONS_DIR);
        for assembly_dir in visible_dirs(&latest)? {
            for entry in read_dir(&assembly_dir)? {
                let name = entry.file_name();
                if name.starts_with('.') || !name.ends_with(FASTA_SUFFIX) {
                    continue;
                }
                fastas.push(entry.into_path());
            }
        }
    }
    fastas.sort();
    fastas.into_iter().map(Assembly::from_fasta).collect()
}

fn visible_dirs(dir: &Utf8Path) -> Result<Vec<Utf8PathBuf>, AnnotateError> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut dirs = Vec::new();
    for entry in read_dir(dir)? {
        let path = entry.into_path();
        if !path.file_name().is_some_and(|name| name.starts_with('.')) && path.is_dir() {
            dirs.push(path);
        }
    }
    Ok(dirs)
}

fn read_dir(dir: &Utf8Path) -> Result<Vec<Utf8DirEntry>, AnnotateError> {
    dir.read_dir_utf8()
        .map_err(|err| AnnotateError::io(dir, err))?
        .map(|entry| entry.map_err(|err| AnnotateError::io(dir, err)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn companion_genbank_path() {
        let assembly = Assembly::from_fasta(Utf8PathBuf::from(
            "refseq/viral/X/latest_assembly_versions/GCF_1.1_V/GCF_1.1_V_genomic.fna.gz",
        ))
        .unwrap();
        assert_eq!(assembly.id.as_str(), "GCF_1.1_V");
        assert_eq!(
            assembly.genbank,
            "refseq/viral/X/latest_assembly_versions/GCF_1.1_V/GCF_1.1_V_genomic.gbff.gz"
        );
    }

    #[test]
    fn missing_root_is_empty() {
        let found = discover_assemblies(Utf8Path::new("/nonexistent/refseq/bacteria")).unwrap();
        assert!(found.is_empty());
    }
}

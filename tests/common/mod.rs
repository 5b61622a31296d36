#![allow(dead_code)]

use std::fs::{self, File};
use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use flate2::Compression;
use flate2::write::GzEncoder;
use tempfile::TempDir;

pub fn write_gz(path: &Utf8Path, data: impl AsRef<[u8]>) {
    let file = File::create(path).unwrap();
    let mut encoder = GzEncoder::new(file, Compression::default());
    encoder.write_all(data.as_ref()).unwrap();
    encoder.finish().unwrap();
}

/// A throwaway `<root>/refseq/<level>/<species>/latest_assembly_versions/<id>/` tree.
pub struct Fixture {
    _temp: TempDir,
    pub root: Utf8PathBuf,
}

impl Fixture {
    pub fn new() -> Self {
        let temp = tempfile::tempdir().unwrap();
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).unwrap();
        Self { _temp: temp, root }
    }

    pub fn db(&self) -> Utf8PathBuf {
        self.root.join("refseq")
    }

    pub fn add_assembly(
        &self,
        level: &str,
        species: &str,
        assembly: &str,
        fasta: &str,
        genbank: Option<&str>,
    ) -> Utf8PathBuf {
        let dir = self
            .db()
            .join(level)
            .join(species)
            .join("latest_assembly_versions")
            .join(assembly);
        fs::create_dir_all(&dir).unwrap();
        let fasta_path = dir.join(format!("{assembly}_genomic.fna.gz"));
        write_gz(&fasta_path, fasta);
        if let Some(genbank) = genbank {
            write_gz(&dir.join(format!("{assembly}_genomic.gbff.gz")), genbank);
        }
        fasta_path
    }

    /// Writes an NCBI-style summary with one row per `(assembly, taxid)`.
    pub fn write_summary(&self, name: &str, rows: &[(&str, &str)]) -> Utf8PathBuf {
        let mut text = String::from(
            "##   See ftp://ftp.ncbi.nlm.nih.gov/genomes/README_assembly_summary.txt\n\
             # assembly_accession\ttaxid\torganism_name\tftp_path\n",
        );
        for (assembly, taxid) in rows {
            let accession = assembly.split('_').take(2).collect::<Vec<_>>().join("_");
            text.push_str(&format!(
                "{accession}\t{taxid}\tSome organism\tftp://ftp.ncbi.nlm.nih.gov/genomes/all/{assembly}\n"
            ));
        }
        let path = self.root.join(name);
        fs::write(&path, text).unwrap();
        path
    }
}

pub fn genbank_record(accession: &str, gi: &str, taxon: &str) -> String {
    genbank_record_with_xref(accession, gi, &format!("taxon:{taxon}"))
}

pub fn genbank_record_with_xref(accession: &str, gi: &str, xref: &str) -> String {
    format!(
        "LOCUS       {locus}               12 bp    DNA     linear   CON 01-JAN-2015\n\
         DEFINITION  Example organism chromosome, complete genome.\n\
         ACCESSION   {locus}\n\
         VERSION     {accession}  GI:{gi}\n\
         FEATURES             Location/Qualifiers\n\
         \x20    source          1..12\n\
         \x20                    /organism=\"Example organism\"\n\
         \x20                    /db_xref=\"{xref}\"\n\
         //\n",
        locus = accession.split('.').next().unwrap()
    )
}

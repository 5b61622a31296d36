use std::collections::HashMap;
use std::io::BufRead;
use std::sync::LazyLock;

use camino::Utf8Path;
use regex::Regex;

use crate::error::AnnotateError;
use crate::fs_util::{Lines, gz_lines};

static TAXON_XREF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^/db_xref="taxon:(\d+)""#).expect("taxon xref pattern is valid")
});

#[derive(Debug, Clone, Default)]
pub struct GiLookup {
    gis: HashMap<String, String>,
}

impl GiLookup {
    pub fn build(genbank: &Utf8Path) -> Result<Self, AnnotateError> {
        Self::from_lines(gz_lines(genbank)?.lossy(), genbank)
    }

    pub fn from_lines<I>(lines: I, path: &Utf8Path) -> Result<Self, AnnotateError>
    where
        I: IntoIterator<Item = Result<String, AnnotateError>>,
    {
        let mut gis = HashMap::new();
        for (index, line) in lines.into_iter().enumerate() {
            let line = line?;
            if !line.starts_with("VERSION") {
                continue;
            }
            let (accession, gi) =
                parse_version_line(&line).ok_or_else(|| AnnotateError::MalformedVersionLine {
                    path: path.to_path_buf(),
                    line: index + 1,
                    content: line.clone(),
                })?;
            gis.insert(accession.to_string(), gi.to_string());
        }
        Ok(Self { gis })
    }

    pub fn get(&self, accession: &str) -> Option<&str> {
        self.gis.get(accession).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.gis.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gis.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for GiLookup {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            gis: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

fn parse_version_line(line: &str) -> Option<(&str, &str)> {
    let mut tokens = line.split_whitespace();
    let (Some(_), Some(accession), Some(gi_token), None) =
        (tokens.next(), tokens.next(), tokens.next(), tokens.next())
    else {
        return None;
    };
    let gi = gi_token.split(':').nth(1)?;
    Some((accession, gi))
}

pub fn first_taxon(genbank: &Utf8Path) -> Result<Option<String>, AnnotateError> {
    scan_taxon(gz_lines(genbank)?)
}

pub fn scan_taxon<R: BufRead>(lines: Lines<R>) -> Result<Option<String>, AnnotateError> {
    for line in lines.lossy() {
        let line = line?;
        if let Some(captures) = TAXON_XREF.captures(line.trim()) {
            return Ok(Some(captures[1].to_string()));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use assert_matches::assert_matches;

    use super::*;

    fn lines(text: &str) -> Lines<Cursor<&str>> {
        Lines::new(Cursor::new(text), "test.gbff")
    }

    const EXCERPT: &str = "\
LOCUS       ABC123               5000 bp    DNA     circular CON 10-JUN-2013
DEFINITION  Example organism chromosome 1, complete genome.
ACCESSION   ABC123
VERSION     ABC123.1  GI:999
KEYWORDS    RefSeq.
FEATURES             Location/Qualifiers
     source          1..5000
                     /organism=\"Example organism\"
                     /db_xref=\"taxon:9606\"
//
LOCUS       ABC124               100 bp    DNA     linear CON 10-JUN-2013
VERSION     ABC124.2  GI:1000
                     /db_xref=\"taxon:10090\"
//
";

    #[test]
    fn version_lines_map_accession_to_gi() {
        let lookup =
            GiLookup::from_lines(lines(EXCERPT).lossy(), Utf8Path::new("test.gbff")).unwrap();
        assert_eq!(lookup.len(), 2);
        assert_eq!(lookup.get("ABC123.1"), Some("999"));
        assert_eq!(lookup.get("ABC124.2"), Some("1000"));
    }

    #[test]
    fn version_without_gi_is_malformed() {
        let err = GiLookup::from_lines(
            lines("LOCUS x\nVERSION     NC_000913.3\n").lossy(),
            Utf8Path::new("test.gbff"),
        )
        .unwrap_err();
        assert_matches!(err, AnnotateError::MalformedVersionLine { line: 2, .. });
    }

    #[test]
    fn gi_token_without_colon_is_malformed() {
        let err =
            GiLookup::from_lines(lines("VERSION A.1 999\n").lossy(), Utf8Path::new("test.gbff"))
                .unwrap_err();
        assert_matches!(err, AnnotateError::MalformedVersionLine { .. });
    }

    #[test]
    fn indented_version_is_not_a_version_line() {
        let lookup = GiLookup::from_lines(
            lines("  VERSION A B C D\n").lossy(),
            Utf8Path::new("test.gbff"),
        )
        .unwrap();
        assert!(lookup.is_empty());
    }

    #[test]
    fn latin1_author_line_does_not_abort() {
        let text: &[u8] = b"  AUTHORS   M\xfcller,A.\nVERSION     ABC123.1  GI:999\n";
        let lookup = GiLookup::from_lines(
            Lines::new(Cursor::new(text), "test.gbff").lossy(),
            Utf8Path::new("test.gbff"),
        )
        .unwrap();
        assert_eq!(lookup.get("ABC123.1"), Some("999"));
    }

    #[test]
    fn first_taxon_wins() {
        assert_eq!(scan_taxon(lines(EXCERPT)).unwrap().as_deref(), Some("9606"));
    }

    #[test]
    fn no_taxon_xref() {
        let text = "                     /db_xref=\"GeneID:12\"\n  note taxon:5\n";
        assert_eq!(scan_taxon(lines(text)).unwrap(), None);
    }
}

use std::collections::BTreeMap;
use std::io::BufRead;
use std::ops::Bound;

use camino::Utf8Path;

use crate::domain::AssemblyId;
use crate::error::AnnotateError;
use crate::fs_util::{Lines, open_text};

const FTP_PATH_COLUMN: &str = "ftp_path";
const TAXID_COLUMN: &str = "taxid";

#[derive(Debug, Clone, Default)]
pub struct AssemblySummary {
    taxids: BTreeMap<String, String>,
}

impl AssemblySummary {
    pub fn load(path: &Utf8Path) -> Result<Self, AnnotateError> {
        Self::from_reader(open_text(path)?, path)
    }

    pub fn from_reader<R: BufRead>(reader: R, path: &Utf8Path) -> Result<Self, AnnotateError> {
        let mut lines = Lines::new(reader, path).lossy().enumerate();

        let header = loop {
            match lines.next() {
                Some((_, line)) => {
                    let line = line?;
                    if !line.starts_with("##") {
                        break line;
                    }
                }
                None => return Err(AnnotateError::SummaryEmpty(path.to_path_buf())),
            }
        };
        let columns = split_row(&header);
        let ftp_index = column_index(&columns, FTP_PATH_COLUMN)?;
        let taxid_index = column_index(&columns, TAXID_COLUMN)?;

        let mut taxids = BTreeMap::new();
        for (index, line) in lines {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let fields = split_row(&line);
            let (Some(ftp_path), Some(taxid)) = (fields.get(ftp_index), fields.get(taxid_index))
            else {
                return Err(AnnotateError::SummaryRow {
                    path: path.to_path_buf(),
                    line: index + 1,
                    message: format!(
                        "expected at least {} columns, found {}",
                        ftp_index.max(taxid_index) + 1,
                        fields.len()
                    ),
                });
            };
            let assembly = AssemblyId::from_ftp_path(ftp_path);
            taxids.insert(assembly.as_str().to_string(), (*taxid).to_string());
        }
        Ok(Self { taxids })
    }

    pub fn get(&self, assembly_id: &str) -> Option<&str> {
        self.taxids.get(assembly_id).map(String::as_str)
    }

    pub fn starting_with<'a>(
        &'a self,
        prefix: &'a str,
    ) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
        self.taxids
            .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
            .take_while(move |(key, _)| key.starts_with(prefix))
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.taxids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.taxids.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AssemblySummary {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            taxids: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

fn split_row(line: &str) -> Vec<&str> {
    line.strip_suffix('\r').unwrap_or(line).split('\t').collect()
}

fn column_index(columns: &[&str], name: &str) -> Result<usize, AnnotateError> {
    columns
        .iter()
        .position(|column| column.trim_start_matches('#').trim() == name)
        .ok_or_else(|| AnnotateError::SummaryMissingColumn(name.to_string()))
}

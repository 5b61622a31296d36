use camino::{Utf8Path, Utf8PathBuf};

use crate::error::AnnotateError;
use crate::genbank::GiLookup;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnnotatedLine {
    Header(Vec<u8>),
    Sequence(Vec<u8>),
}

impl AnnotatedLine {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            AnnotatedLine::Header(line) | AnnotatedLine::Sequence(line) => line,
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            AnnotatedLine::Header(line) | AnnotatedLine::Sequence(line) => line,
        }
    }
}

#[derive(Debug)]
pub struct FastaAnnotator<'a> {
    taxid: &'a str,
    gis: &'a GiLookup,
    fasta: Utf8PathBuf,
}

impl<'a> FastaAnnotator<'a> {
    pub fn new(taxid: &'a str, gis: &'a GiLookup, fasta: &Utf8Path) -> Self {
        Self {
            taxid,
            gis,
            fasta: fasta.to_path_buf(),
        }
    }

    /// `>ACC desc words` -> `>ti|<taxid>|gi|<gi>|ref|ACC| desc words`, with the
    /// description re-joined by single spaces and its bytes otherwise untouched.
    pub fn rewrite_header(&self, line: &[u8]) -> Result<Vec<u8>, AnnotateError> {
        let mut tokens = line
            .split(u8::is_ascii_whitespace)
            .filter(|token| !token.is_empty());
        let first = String::from_utf8_lossy(tokens.next().unwrap_or_default());
        let accession = first.trim_matches('>');
        let gi = self
            .gis
            .get(accession)
            .ok_or_else(|| AnnotateError::MissingGi {
                accession: accession.to_string(),
                fasta: self.fasta.clone(),
            })?;

        let mut header =
            format!(">ti|{}|gi|{}|ref|{}| ", self.taxid, gi, accession).into_bytes();
        for (index, token) in tokens.enumerate() {
            if index > 0 {
                header.push(b' ');
            }
            header.extend_from_slice(token);
        }
        Ok(header)
    }

    pub fn annotate_line(&self, line: Vec<u8>) -> Result<AnnotatedLine, AnnotateError> {
        if line.starts_with(b">") {
            Ok(AnnotatedLine::Header(self.rewrite_header(&line)?))
        } else {
            Ok(AnnotatedLine::Sequence(line))
        }
    }

    pub fn annotate<I>(&self, lines: I) -> AnnotatedLines<'_, I::IntoIter>
    where
        I: IntoIterator<Item = Result<Vec<u8>, AnnotateError>>,
    {
        AnnotatedLines {
            annotator: self,
            lines: lines.into_iter(),
        }
    }
}

pub struct AnnotatedLines<'s, I> {
    annotator: &'s FastaAnnotator<'s>,
    lines: I,
}

impl<I> Iterator for AnnotatedLines<'_, I>
where
    I: Iterator<Item = Result<Vec<u8>, AnnotateError>>,
{
    type Item = Result<AnnotatedLine, AnnotateError>;

    fn next(&mut self) -> Option<Self::Item> {
        let line = self.lines.next()?;
        Some(line.and_then(|line| self.annotator.annotate_line(line)))
    }
}

/// `chars` counts sequence bytes only; headers are free.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FastaRecord {
    pub lines: Vec<Vec<u8>>,
    pub chars: u64,
}

impl FastaRecord {
    pub fn push(&mut self, line: AnnotatedLine) {
        if let AnnotatedLine::Sequence(sequence) = &line {
            self.chars += sequence.len() as u64;
        }
        self.lines.push(line.into_bytes());
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

pub struct Records<I> {
    lines: I,
    current: FastaRecord,
    done: bool,
}

impl<I> Records<I> {
    pub fn new(lines: I) -> Self {
        Self {
            lines,
            current: FastaRecord::default(),
            done: false,
        }
    }
}

impl<I> Iterator for Records<I>
where
    I: Iterator<Item = Result<AnnotatedLine, AnnotateError>>,
{
    type Item = Result<FastaRecord, AnnotateError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            match self.lines.next() {
                Some(Ok(line)) => {
                    let starts_record = matches!(line, AnnotatedLine::Header(_));
                    if starts_record && !self.current.is_empty() {
                        let finished = std::mem::take(&mut self.current);
                        self.current.push(line);
                        return Some(Ok(finished));
                    }
                    self.current.push(line);
                }
                Some(Err(err)) => {
                    self.done = true;
                    return Some(Err(err));
                }
                None => {
                    self.done = true;
                    if self.current.is_empty() {
                        return None;
                    }
                    return Some(Ok(std::mem::take(&mut self.current)));
                }
            }
        }
    }
}

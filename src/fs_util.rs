use std::fs::File;
use std::io::{BufRead, BufReader};

use camino::{Utf8Path, Utf8PathBuf};
use flate2::read::MultiGzDecoder;

use crate::error::AnnotateError;

pub fn open_text(path: &Utf8Path) -> Result<BufReader<File>, AnnotateError> {
    let file = File::open(path).map_err(|err| AnnotateError::io(path, err))?;
    Ok(BufReader::new(file))
}

pub fn open_gz(path: &Utf8Path) -> Result<BufReader<MultiGzDecoder<File>>, AnnotateError> {
    let file = File::open(path).map_err(|err| AnnotateError::io(path, err))?;
    Ok(BufReader::new(MultiGzDecoder::new(file)))
}

pub fn gz_lines(path: &Utf8Path) -> Result<Lines<BufReader<MultiGzDecoder<File>>>, AnnotateError> {
    Ok(Lines::new(open_gz(path)?, path))
}

/// Raw byte lines with only the trailing `\n` removed; `\r` is kept.
pub struct Lines<R> {
    reader: R,
    path: Utf8PathBuf,
}

impl<R: BufRead> Lines<R> {
    pub fn new(reader: R, path: impl Into<Utf8PathBuf>) -> Self {
        Self {
            reader,
            path: path.into(),
        }
    }

    pub fn lossy(self) -> impl Iterator<Item = Result<String, AnnotateError>> {
        self.map(|line| line.map(lossy_string))
    }
}

impl<R: BufRead> Iterator for Lines<R> {
    type Item = Result<Vec<u8>, AnnotateError>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut buf = Vec::new();
        match self.reader.read_until(b'\n', &mut buf) {
            Ok(0) => None,
            Ok(_) => {
                if buf.last() == Some(&b'\n') {
                    buf.pop();
                }
                Some(Ok(buf))
            }
            Err(err) => Some(Err(AnnotateError::io(self.path.clone(), err))),
        }
    }
}

fn lossy_string(bytes: Vec<u8>) -> String {
    String::from_utf8(bytes)
        .unwrap_or_else(|err| String::from_utf8_lossy(err.as_bytes()).into_owned())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn lines_keep_carriage_returns() {
        let lines = Lines::new(Cursor::new("a\r\nb\n\nc"), "mem")
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        assert_eq!(
            lines,
            vec![b"a\r".to_vec(), b"b".to_vec(), Vec::new(), b"c".to_vec()]
        );
    }

    #[test]
    fn latin1_bytes_are_kept_raw() {
        let lines = Lines::new(Cursor::new(&b"M\xfcller\nACGT\n"[..]), "mem")
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        assert_eq!(lines[0], b"M\xfcller");
        assert_eq!(lines[1], b"ACGT");
    }

    #[test]
    fn lossy_lines_replace_invalid_bytes() {
        let lines = Lines::new(Cursor::new(&b"M\xfcller\nok"[..]), "mem")
            .lossy()
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        assert_eq!(lines, vec!["M\u{fffd}ller", "ok"]);
    }
}

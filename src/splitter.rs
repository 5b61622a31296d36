use std::fs::File;
use std::io::{BufWriter, Write};

use camino::{Utf8Path, Utf8PathBuf};
use serde::Serialize;
use tracing::info;

use crate::config::SplitConfig;
use crate::error::AnnotateError;
use crate::fasta::FastaRecord;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChunkSummary {
    pub path: Utf8PathBuf,
    pub chars: u64,
    pub records: u64,
}

/// A file is only rotated once it holds a record, so an oversized first record
/// lands in `<prefix>.01.fna`. The legacy `split_seqs_with_ti.py` leaves an
/// empty `01` ahead of it and numbers every later file one higher.
pub struct OutputSplitter {
    config: SplitConfig,
    index: u32,
    path: Utf8PathBuf,
    writer: BufWriter<File>,
    file_chars: u64,
    file_records: u64,
    pending: Option<FastaRecord>,
    completed: Vec<ChunkSummary>,
}

impl OutputSplitter {
    pub fn create(config: SplitConfig) -> Result<Self, AnnotateError> {
        let index = 1;
        let path = config.chunk_path(index);
        let writer = create_chunk(&path)?;
        Ok(Self {
            config,
            index,
            path,
            writer,
            file_chars: 0,
            file_records: 0,
            pending: None,
            completed: Vec::new(),
        })
    }

    pub fn append(&mut self, record: FastaRecord) -> Result<(), AnnotateError> {
        if let Some(previous) = self.pending.replace(record) {
            self.admit(previous)?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), AnnotateError> {
        if let Some(record) = self.pending.take() {
            self.admit(record)?;
        }
        self.writer
            .flush()
            .map_err(|err| AnnotateError::io(self.path.clone(), err))
    }

    pub fn finish(mut self) -> Result<Vec<ChunkSummary>, AnnotateError> {
        self.flush()?;
        self.complete_current();
        Ok(self.completed)
    }

    pub fn current_path(&self) -> &Utf8Path {
        &self.path
    }

    fn admit(&mut self, record: FastaRecord) -> Result<(), AnnotateError> {
        let projected = (self.file_chars + record.chars) as f64;
        if self.file_records > 0 && projected > self.config.max_chars {
            self.rotate()?;
        }
        for line in &record.lines {
            self.writer
                .write_all(line)
                .and_then(|()| self.writer.write_all(b"\n"))
                .map_err(|err| AnnotateError::io(self.path.clone(), err))?;
        }
        self.file_chars += record.chars;
        self.file_records += 1;
        Ok(())
    }

    fn rotate(&mut self) -> Result<(), AnnotateError> {
        self.writer
            .flush()
            .map_err(|err| AnnotateError::io(self.path.clone(), err))?;
        self.complete_current();

        self.index += 1;
        self.path = self.config.chunk_path(self.index);
        self.writer = create_chunk(&self.path)?;
        self.file_chars = 0;
        self.file_records = 0;
        Ok(())
    }

    fn complete_current(&mut self) {
        info!("{} has {} characters", self.path, self.file_chars);
        self.completed.push(ChunkSummary {
            path: self.path.clone(),
            chars: self.file_chars,
            records: self.file_records,
        });
    }
}

fn create_chunk(path: &Utf8Path) -> Result<BufWriter<File>, AnnotateError> {
    let file = File::create(path).map_err(|err| AnnotateError::io(path, err))?;
    Ok(BufWriter::new(file))
}

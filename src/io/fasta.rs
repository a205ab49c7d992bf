use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;

use log::debug;

use super::SequenceSource;
use crate::error::{ChopError, Result};

#[derive(Debug, Clone)]
pub struct FastaRecord {
    pub id: String,
    pub desc: Option<String>,
    pub seq: Vec<u8>,
}

pub struct FastaReader<R: BufRead> {
    reader: R,
    buf: String,
    done: bool,
    peek_header: Option<String>,
}

impl<R: BufRead> FastaReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: String::new(),
            done: false,
            peek_header: None,
        }
    }

    pub fn next_record(&mut self) -> Result<Option<FastaRecord>> {
        if self.done {
            return Ok(None);
        }

        // Find header line
        let header = if let Some(h) = self.peek_header.take() {
            h
        } else {
            loop {
                self.buf.clear();
                let n = self.reader.read_line(&mut self.buf)?;
                if n == 0 {
                    self.done = true;
                    return Ok(None);
                }
                if let Some(rest) = self.buf.strip_prefix('>') {
                    break rest.trim().to_string();
                }
            }
        };

        let mut parts = header.splitn(2, char::is_whitespace);
        let id = parts.next().unwrap_or("").to_string();
        let desc = parts
            .next()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        // Sequence lines, uppercased
        let mut seq: Vec<u8> = Vec::new();
        loop {
            self.buf.clear();
            let n = self.reader.read_line(&mut self.buf)?;
            if n == 0 {
                self.done = true;
                break;
            }
            if let Some(rest) = self.buf.strip_prefix('>') {
                self.peek_header = Some(rest.trim().to_string());
                break;
            }
            for &b in self.buf.as_bytes() {
                match b {
                    b'\n' | b'\r' | b' ' | b'\t' => {}
                    _ => seq.push(b.to_ascii_uppercase()),
                }
            }
        }

        Ok(Some(FastaRecord { id, desc, seq }))
    }
}

/// Whole reference held in memory, looked up by contig name.
#[derive(Debug, Default)]
pub struct Reference {
    contigs: Vec<FastaRecord>,
    by_name: HashMap<String, usize>,
}

impl Reference {
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut fasta = FastaReader::new(reader);
        let mut reference = Reference::default();
        while let Some(rec) = fasta.next_record()? {
            debug!("loaded contig {} ({} bp)", rec.id, rec.seq.len());
            // first record wins on duplicate names
            reference
                .by_name
                .entry(rec.id.clone())
                .or_insert(reference.contigs.len());
            reference.contigs.push(rec);
        }
        Ok(reference)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let fh = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(fh))
    }

    fn record(&self, contig: &str) -> Result<&FastaRecord> {
        self.by_name
            .get(contig)
            .map(|&i| &self.contigs[i])
            .ok_or_else(|| ChopError::ContigNotFound {
                contig: contig.to_string(),
            })
    }
}

impl SequenceSource for Reference {
    fn length(&self, contig: &str) -> Result<usize> {
        Ok(self.record(contig)?.seq.len())
    }

    fn sequence(&self, contig: &str) -> Result<&[u8]> {
        Ok(&self.record(contig)?.seq)
    }
}

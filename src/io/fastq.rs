use std::io::{BufRead, Write};

use crate::align::TrimmedRecord;
use crate::error::{ChopError, Result};

/// Phred+33 offset used for both reading and writing.
pub const PHRED_OFFSET: u8 = 33;

#[derive(Debug, Clone)]
pub struct FastqRecord {
    pub id: String,
    pub desc: Option<String>,
    pub seq: Vec<u8>,
    /// decoded phred values
    pub qual: Vec<u8>,
}

pub struct FastqReader<R: BufRead> {
    reader: R,
    buf: String,
    done: bool,
    line: usize,
}

impl<R: BufRead> FastqReader<R> {
    pub fn new(reader: R) -> Self {
        Self { reader, buf: String::new(), done: false, line: 0 }
    }

    fn read_line(&mut self) -> Result<usize> {
        self.buf.clear();
        let n = self.reader.read_line(&mut self.buf)?;
        self.line += 1;
        Ok(n)
    }

    fn err(&self, msg: &str) -> ChopError {
        ChopError::Parse { line: self.line, msg: msg.to_string() }
    }

    pub fn next_record(&mut self) -> Result<Option<FastqRecord>> {
        if self.done { return Ok(None); }

        // header line starting with '@'
        if self.read_line()? == 0 { self.done = true; return Ok(None); }
        let Some(header) = self.buf.strip_prefix('@') else {
            return Err(self.err("FASTQ header not starting with '@'"));
        };
        let header = header.trim_end().to_string();
        let mut parts = header.splitn(2, char::is_whitespace);
        let id = parts.next().unwrap_or("").to_string();
        let desc = parts.next().map(|s| s.trim().to_string()).filter(|s| !s.is_empty());

        if self.read_line()? == 0 { return Err(self.err("unexpected EOF after header")); }
        let seq = self.buf.trim_end().as_bytes().to_vec();

        if self.read_line()? == 0 || !self.buf.starts_with('+') { return Err(self.err("missing '+' line")); }

        if self.read_line()? == 0 { return Err(self.err("missing quality line")); }
        let qual: Vec<u8> = self
            .buf
            .trim_end()
            .bytes()
            .map(|b| b.saturating_sub(PHRED_OFFSET))
            .collect();

        if qual.len() != seq.len() { return Err(self.err("seq/qual length mismatch")); }

        Ok(Some(FastqRecord { id, desc, seq, qual }))
    }
}

/// Output sink for trimmed reads.
pub struct FastqWriter<W: Write> {
    writer: W,
}

impl<W: Write> FastqWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn write_record(&mut self, rec: &TrimmedRecord) -> Result<()> {
        debug_assert_eq!(rec.sequence.len(), rec.quality.len());
        writeln!(self.writer, "@{}", rec.id)?;
        self.writer.write_all(&rec.sequence)?;
        self.writer.write_all(b"\n+\n")?;
        let encoded: Vec<u8> = rec
            .quality
            .iter()
            .map(|&q| q.min(93) + PHRED_OFFSET)
            .collect();
        self.writer.write_all(&encoded)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    pub fn write_all(&mut self, records: &[TrimmedRecord]) -> Result<()> {
        for rec in records {
            self.write_record(rec)?;
        }
        Ok(())
    }

    pub fn finish(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn record(id: &str, seq: &[u8], qual: Vec<u8>) -> TrimmedRecord {
        TrimmedRecord { id: id.to_string(), sequence: seq.to_vec(), quality: qual }
    }

    #[test]
    fn write_encodes_phred33() {
        let mut w = FastqWriter::new(Vec::new());
        w.write_record(&record("read1", b"ACGT", vec![40, 40, 0, 30])).unwrap();
        let out = w.finish().unwrap();
        assert_eq!(out, b"@read1\nACGT\n+\nII!?\n");
    }

    #[test]
    fn written_records_read_back() {
        let recs = vec![
            record("a", b"ACG", vec![10, 20, 30]),
            record("b", b"TTTTT", vec![40; 5]),
        ];
        let mut w = FastqWriter::new(Vec::new());
        w.write_all(&recs).unwrap();
        let bytes = w.finish().unwrap();

        let mut r = FastqReader::new(Cursor::new(bytes));
        let first = r.next_record().unwrap().unwrap();
        assert_eq!(first.id, "a");
        assert_eq!(first.qual, vec![10, 20, 30]);
        let second = r.next_record().unwrap().unwrap();
        assert_eq!(second.seq, b"TTTTT");
        assert!(r.next_record().unwrap().is_none());
    }

    #[test]
    fn reader_rejects_length_mismatch() {
        let data = b"@r\nACGT\n+\nII\n";
        let mut r = FastqReader::new(Cursor::new(&data[..]));
        assert!(matches!(r.next_record(), Err(ChopError::Parse { line: 4, .. })));
    }
}

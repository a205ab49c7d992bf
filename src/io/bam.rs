//! 坐标排序且带索引的 BAM 输入，按区间 fetch。
//!
//! 每条 htslib 记录在读出时转成自持的 [`BamAlignment`]：坐标对取自
//! `aligned_pairs_full()`（软剪切与插入给出 `(q, None)`，缺失与跳过给出 `(None, r)`），
//! 参考终点取自 `reference_end()`。htslib 的记录不能跨线程，转换后才交给 rayon。

use std::path::Path;

use log::debug;
use rust_htslib::bam::{self, ext::BamRecordExtensions, Read};

use crate::align::{AlignedPair, Alignment, AlignmentSource};
use crate::error::{ChopError, Result};

/// htslib 用 0xff 标记缺失的质量串
const MISSING_QUALITY: u8 = 0xff;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BamAlignment {
    name: String,
    unmapped: bool,
    start: usize,
    end: usize,
    seq: Vec<u8>,
    qual: Option<Vec<u8>>,
    pairs: Vec<AlignedPair>,
}

impl BamAlignment {
    pub fn from_record(record: &bam::Record) -> Self {
        let start = usize::try_from(record.pos()).unwrap_or(0);
        let end = usize::try_from(record.reference_end()).unwrap_or(start).max(start);

        let qual = record.qual();
        let qual = match qual.first() {
            None | Some(&MISSING_QUALITY) => None,
            Some(_) => Some(qual.to_vec()),
        };

        let pairs = record
            .aligned_pairs_full()
            .map(|[q, r]| {
                AlignedPair::new(
                    q.and_then(|q| usize::try_from(q).ok()),
                    r.and_then(|r| usize::try_from(r).ok()),
                )
            })
            .collect();

        Self {
            name: String::from_utf8_lossy(record.qname()).into_owned(),
            unmapped: record.is_unmapped(),
            start,
            end,
            seq: record.seq().as_bytes(),
            qual,
            pairs,
        }
    }
}

impl From<&bam::Record> for BamAlignment {
    fn from(record: &bam::Record) -> Self {
        Self::from_record(record)
    }
}

impl Alignment for BamAlignment {
    fn is_unmapped(&self) -> bool {
        self.unmapped
    }
    fn reference_start(&self) -> usize {
        self.start
    }
    fn reference_end(&self) -> usize {
        self.end
    }
    fn query_name(&self) -> &str {
        &self.name
    }
    fn query_sequence(&self) -> &[u8] {
        &self.seq
    }
    fn query_qualities(&self) -> Option<&[u8]> {
        self.qual.as_deref()
    }
    fn aligned_pairs(&self) -> Vec<AlignedPair> {
        self.pairs.clone()
    }
}

/// `.bai`/`.csi` 索引与 BAM 同目录
pub struct IndexedBam {
    reader: bam::IndexedReader,
}

impl IndexedBam {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = bam::IndexedReader::from_path(path.as_ref())?;
        Ok(Self { reader })
    }

    /// 解码 BGZF 块的额外线程数，0 表示只用调用线程
    pub fn set_threads(&mut self, threads: usize) -> Result<()> {
        if threads > 0 {
            self.reader.set_threads(threads)?;
        }
        Ok(())
    }

    fn tid(&self, contig: &str) -> Result<u32> {
        self.reader
            .header()
            .tid(contig.as_bytes())
            .ok_or_else(|| ChopError::ContigNotFound { contig: contig.to_string() })
    }
}

impl AlignmentSource for IndexedBam {
    type Record = BamAlignment;

    /// htslib 的区间重叠：已比对记录看 [pos, reference_end)，
    /// 有位置的未比对记录按长度 1 计，所以也会被取出（检查但不保留）。
    fn overlapping(&mut self, contig: &str, start: usize, end: usize) -> Result<Vec<BamAlignment>> {
        let tid = self.tid(contig)?;
        self.reader.fetch((tid as i32, start as i64, end as i64))?;

        let mut out = Vec::new();
        for result in self.reader.records() {
            let record = result?;
            out.push(BamAlignment::from_record(&record));
        }
        debug!("fetch {}:{}-{} -> {} record(s)", contig, start, end, out.len());
        Ok(out)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use rust_htslib::bam::record::{Cigar, CigarString};

    /// tid 0 上的一条记录；`qual == None` 时写入 htslib 的缺失标记
    pub(crate) fn record(name: &str, pos: i64, cigar: Vec<Cigar>, seq: &[u8], qual: Option<&[u8]>) -> bam::Record {
        let qual = qual.map_or_else(|| vec![MISSING_QUALITY; seq.len()], <[u8]>::to_vec);
        let mut rec = bam::Record::new();
        rec.set(name.as_bytes(), Some(&CigarString(cigar)), seq, &qual);
        rec.set_tid(0);
        rec.set_pos(pos);
        rec.set_mapq(60);
        rec.set_mtid(-1);
        rec.set_mpos(-1);
        rec
    }

    pub(crate) fn alignment(name: &str, pos: i64, cigar: Vec<Cigar>, seq: &[u8]) -> BamAlignment {
        BamAlignment::from_record(&record(name, pos, cigar, seq, None))
    }

    #[test]
    fn ungapped_record_converts() {
        let aln = alignment("r1", 10, vec![Cigar::Match(4)], b"ACGT");
        assert_eq!(aln.query_name(), "r1");
        assert!(!aln.is_unmapped());
        assert_eq!(aln.reference_start(), 10);
        assert_eq!(aln.reference_end(), 14);
        assert_eq!(aln.query_sequence(), b"ACGT");
        assert_eq!(aln.query_qualities(), None);
        assert_eq!(aln.aligned_pairs()[0], AlignedPair::new(Some(0), Some(10)));
        assert_eq!(aln.aligned_pairs()[3], AlignedPair::new(Some(3), Some(13)));
    }

    #[test]
    fn gaps_and_clips_become_one_sided_pairs() {
        // 2S 2M 1I 2M 1D 1M
        let cigar = vec![
            Cigar::SoftClip(2),
            Cigar::Match(2),
            Cigar::Ins(1),
            Cigar::Match(2),
            Cigar::Del(1),
            Cigar::Match(1),
        ];
        let aln = alignment("r1", 100, cigar, b"TTACGTAC");
        assert_eq!(aln.reference_end(), 106);
        assert_eq!(
            aln.aligned_pairs(),
            vec![
                AlignedPair::new(Some(0), None),
                AlignedPair::new(Some(1), None),
                AlignedPair::new(Some(2), Some(100)),
                AlignedPair::new(Some(3), Some(101)),
                AlignedPair::new(Some(4), None),
                AlignedPair::new(Some(5), Some(102)),
                AlignedPair::new(Some(6), Some(103)),
                AlignedPair::new(None, Some(104)),
                AlignedPair::new(Some(7), Some(105)),
            ]
        );
    }

    #[test]
    fn qualities_are_kept_when_present() {
        let rec = record("r1", 0, vec![Cigar::Match(3)], b"ACG", Some(&[10, 20, 30]));
        let aln = BamAlignment::from(&rec);
        assert_eq!(aln.query_qualities(), Some(&[10u8, 20, 30][..]));
    }

    #[test]
    fn unmapped_flag_is_carried() {
        let mut rec = record("r1", 5, vec![], b"ACGT", None);
        rec.set_unmapped();
        let aln = BamAlignment::from_record(&rec);
        assert!(aln.is_unmapped());
        assert_eq!(aln.reference_start(), 5);
        assert_eq!(aln.reference_end(), 5);
    }
}

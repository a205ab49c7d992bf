pub mod bam;
pub mod fasta;
pub mod fastq;

use crate::error::Result;

/// 按 contig 名取参考序列
pub trait SequenceSource {
    fn length(&self, contig: &str) -> Result<usize>;
    /// 整条 contig 的正向序列
    fn sequence(&self, contig: &str) -> Result<&[u8]>;
}

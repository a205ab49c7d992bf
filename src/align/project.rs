use super::Alignment;
use crate::window::Window;

/// 没有质量值的 read 统一补这个 phred 值
pub const DEFAULT_QUALITY: u8 = 40;

/// 裁剪后的 read，自持序列与质量缓冲区
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrimmedRecord {
    pub id: String,
    pub sequence: Vec<u8>,
    /// phred 值，与 sequence 等长
    pub quality: Vec<u8>,
}

/// 把参考窗口投影到 read 坐标并切出对应的序列和质量。
///
/// 窗口左端取第一个参考坐标等于 `window.start` 的坐标对，右端取最后一个等于
/// `window.end - 1` 的坐标对。任一端落在缺失里或比对范围外时返回 None（逐条跳过，非错误）。
pub fn project<A: Alignment + ?Sized>(aln: &A, window: &Window) -> Option<TrimmedRecord> {
    let last = window.end.checked_sub(1)?;

    let mut query_start: Option<usize> = None;
    let mut query_end: Option<usize> = None;
    for pair in aln.aligned_pairs() {
        if pair.reference == Some(window.start) && query_start.is_none() {
            query_start = pair.query;
        }
        if pair.reference == Some(last) {
            query_end = pair.query;
        }
    }

    let (mut qs, mut qe) = (query_start?, query_end?);
    if qs > qe {
        std::mem::swap(&mut qs, &mut qe);
    }

    let seq = aln.query_sequence();
    let qe = qe.min(seq.len().checked_sub(1)?);
    if qs > qe {
        return None;
    }

    let sequence = seq[qs..=qe].to_vec();
    let quality = match aln.query_qualities() {
        Some(q) if q.len() == seq.len() => q[qs..=qe].to_vec(),
        _ => vec![DEFAULT_QUALITY; sequence.len()],
    };

    Some(TrimmedRecord {
        id: aln.query_name().to_string(),
        sequence,
        quality,
    })
}

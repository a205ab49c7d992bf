use super::Strand;

/// 精确命中：正向坐标上的起点 + 链
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExactHit {
    pub position: usize,
    pub strand: Strand,
}

/// 全量扫描所有起点（允许重叠命中）。
/// 反向链使用 motif 的反向互补在正向序列上匹配，位置仍为正向坐标。
/// `seq`、`motif`、`motif_rc` 需已大写。
pub fn find_exact(seq: &[u8], motif: &[u8], motif_rc: &[u8]) -> Vec<ExactHit> {
    let mut hits = Vec::new();
    scan(seq, motif, Strand::Forward, &mut hits);
    scan(seq, motif_rc, Strand::Reverse, &mut hits);
    hits
}

fn scan(seq: &[u8], pat: &[u8], strand: Strand, hits: &mut Vec<ExactHit>) {
    if pat.is_empty() || pat.len() > seq.len() {
        return;
    }
    for (position, w) in seq.windows(pat.len()).enumerate() {
        if w == pat {
            hits.push(ExactHit { position, strand });
        }
    }
}

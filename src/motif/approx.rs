use super::Strand;

/// 近似命中：每个结束位置一条。position 为该结束位置最左的起点（正向坐标），end 不含。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApproxHit {
    pub position: usize,
    pub end: usize,
    pub edit_distance: u32,
    pub strand: Strand,
}

/// infix 搜索的一个结束列
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InfixMatch {
    pub start: usize,
    /// 不含
    pub end: usize,
    pub cost: u32,
}

/// 逐列 DP 的工作缓冲区，可跨调用复用
pub struct InfixBuffer {
    cost: Vec<u32>,
    prev_cost: Vec<u32>,
    start: Vec<usize>,
    prev_start: Vec<usize>,
}

impl Default for InfixBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl InfixBuffer {
    pub fn new() -> Self {
        Self {
            cost: Vec::new(),
            prev_cost: Vec::new(),
            start: Vec::new(),
            prev_start: Vec::new(),
        }
    }

    fn reset(&mut self, rows: usize) {
        self.cost.clear();
        self.cost.resize(rows, 0);
        self.start.clear();
        self.start.resize(rows, 0);
        self.prev_cost.clear();
        self.prev_cost.extend(0..rows as u32);
        self.prev_start.clear();
        self.prev_start.resize(rows, 0);
    }
}

/// 有界编辑距离的 infix（glocal）搜索：pattern 必须整体对齐，text 两端空位免罚。
/// 返回每个满足 cost <= max_distance 的结束列，按结束位置升序。
///
/// 同分的前驱取起点较小者，所以起点是该结束位置上所有最优对齐中最左的那个。
pub fn infix_search(pattern: &[u8], text: &[u8], max_distance: u32) -> Vec<InfixMatch> {
    infix_search_with_buf(pattern, text, max_distance, &mut InfixBuffer::new())
}

pub fn infix_search_with_buf(
    pattern: &[u8],
    text: &[u8],
    max_distance: u32,
    buf: &mut InfixBuffer,
) -> Vec<InfixMatch> {
    let m = pattern.len();
    let mut out = Vec::new();
    if m == 0 || text.is_empty() {
        return out;
    }

    buf.reset(m + 1);

    for (j, &t) in text.iter().enumerate() {
        // 第 0 行：空 pattern，匹配从下一个 text 位置开始，免罚
        buf.cost[0] = 0;
        buf.start[0] = j + 1;

        for i in 1..=m {
            let subst = u32::from(pattern[i - 1] != t);
            let mut best = buf.prev_cost[i - 1] + subst;
            let mut best_start = buf.prev_start[i - 1];

            let up = buf.cost[i - 1] + 1;
            if up < best {
                best = up;
                best_start = buf.start[i - 1];
            } else if up == best {
                best_start = best_start.min(buf.start[i - 1]);
            }

            let left = buf.prev_cost[i] + 1;
            if left < best {
                best = left;
                best_start = buf.prev_start[i];
            } else if left == best {
                best_start = best_start.min(buf.prev_start[i]);
            }

            buf.cost[i] = best;
            buf.start[i] = best_start;
        }

        if buf.cost[m] <= max_distance {
            out.push(InfixMatch {
                start: buf.start[m],
                end: j + 1,
                cost: buf.cost[m],
            });
        }

        std::mem::swap(&mut buf.cost, &mut buf.prev_cost);
        std::mem::swap(&mut buf.start, &mut buf.prev_start);
    }

    out
}

/// 双链近似搜索。每个结束位置各算一条命中，不按起点合并：
/// 末端错配的 motif 会在同一起点留下多个结束位置，它们都参与歧义计数。
pub fn find_approx(seq: &[u8], motif: &[u8], motif_rc: &[u8], max_distance: u32) -> Vec<ApproxHit> {
    let mut hits = Vec::new();
    let mut buf = InfixBuffer::new();

    for (strand, pat) in [(Strand::Forward, motif), (Strand::Reverse, motif_rc)] {
        hits.extend(
            infix_search_with_buf(pat, seq, max_distance, &mut buf)
                .into_iter()
                .map(|m| ApproxHit {
                    position: m.start,
                    end: m.end,
                    edit_distance: m.cost,
                    strand,
                }),
        );
    }

    hits
}

//! 比对记录的只读能力集合，以及窗口覆盖判断与 read 坐标投影。

pub mod coverage;
pub mod project;

use crate::error::Result;

pub use coverage::fully_spans;
pub use project::{project, TrimmedRecord, DEFAULT_QUALITY};

/// 一个 (query, reference) 坐标对；任一侧缺失表示空位。
///
/// `reference == None` 为插入（或软剪切），`query == None` 为缺失（或跳过区域）。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlignedPair {
    pub query: Option<usize>,
    pub reference: Option<usize>,
}

impl AlignedPair {
    pub fn new(query: Option<usize>, reference: Option<usize>) -> Self {
        Self { query, reference }
    }
}

/// read 到参考的比对记录。任何具体的比对库记录只需适配这几个只读访问器。
pub trait Alignment {
    fn is_unmapped(&self) -> bool;
    /// 0-based，含
    fn reference_start(&self) -> usize;
    /// 0-based，不含
    fn reference_end(&self) -> usize;
    fn query_name(&self) -> &str;
    fn query_sequence(&self) -> &[u8];
    /// phred 值（非 ASCII 编码）；缺失时为 None
    fn query_qualities(&self) -> Option<&[u8]>;
    /// 按参考坐标非递减排列的坐标对
    fn aligned_pairs(&self) -> Vec<AlignedPair>;
}

/// 按参考区间查询比对记录。索引读取器 fetch 时要移动文件游标，所以取 `&mut self`。
pub trait AlignmentSource {
    type Record: Alignment;

    /// 返回与半开区间 [start, end) 重叠的记录，按文件顺序
    fn overlapping(&mut self, contig: &str, start: usize, end: usize) -> Result<Vec<Self::Record>>;
}

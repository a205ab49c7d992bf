//! # motif-chop
//!
//! 在参考 contig 上定位一段短 motif，以其为中心取固定长度窗口，
//! 并把完整跨越该窗口的比对 read 裁剪到窗口对应的片段。
//!
//! 本 crate 提供：
//!
//! - **Motif 定位**：双链精确搜索；无精确命中时退回有界编辑距离的 infix 近似搜索
//! - **窗口计算**：以命中中点为中心，长度恒定并裁剪到序列边界
//! - **覆盖过滤**：只保留完整跨越窗口的已比对 read
//! - **坐标投影**：借助比对的 (query, reference) 坐标对把窗口映射到 read 坐标并切片
//!
//! ## 快速示例
//!
//! ```rust
//! use motif_chop::motif::{self, SearchMode};
//! use motif_chop::window::compute_window;
//!
//! let reference = b"AAACGTTTAAA";
//! let hit = motif::locate(reference, b"CGTTT", 0).unwrap();
//! assert_eq!(hit.position, 3);
//! assert_eq!(hit.mode, SearchMode::Exact);
//!
//! let window = compute_window(hit.position + 5 / 2, 4, reference.len()).unwrap();
//! assert_eq!((window.start, window.end), (3, 7));
//! ```
//!
//! ## 模块说明
//!
//! - [`motif`] — 精确 / 近似 motif 搜索与歧义裁决
//! - [`window`] — 窗口计算
//! - [`align`] — 比对记录抽象、覆盖判断、read 投影
//! - [`io`] — FASTA 参考、索引 BAM 区间读取、FASTQ 输出
//! - [`pipeline`] — 串联以上步骤并写出 FASTQ 与 JSON 汇总
//! - [`util`] — 大小写归一化、反向互补

pub mod align;
pub mod error;
pub mod io;
pub mod motif;
pub mod pipeline;
pub mod util;
pub mod window;

pub use error::{ChopError, Result};

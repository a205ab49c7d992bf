//! Motif 定位：双链精确搜索，失败后退回有界编辑距离的近似搜索。
//!
//! 优先级：精确层先于近似层；任何一层内出现并列最优即为歧义，直接失败。

pub mod approx;
pub mod exact;

use std::borrow::Cow;
use std::fmt;

use log::debug;
use serde::Serialize;

use crate::error::{ChopError, Result};
use crate::util::dna;

pub use approx::{find_approx, infix_search, ApproxHit, InfixMatch};
pub use exact::{find_exact, ExactHit};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Strand {
    #[serde(rename = "+")]
    Forward,
    #[serde(rename = "-")]
    Reverse,
}

impl Strand {
    pub fn symbol(self) -> char {
        match self {
            Strand::Forward => '+',
            Strand::Reverse => '-',
        }
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SearchMode {
    #[serde(rename = "exact")]
    Exact,
    #[serde(rename = "approx")]
    Approximate,
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchMode::Exact => write!(f, "exact"),
            SearchMode::Approximate => write!(f, "approx"),
        }
    }
}

/// 唯一存活的 motif 命中，position 为正向链坐标上的匹配起点
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotifHit {
    pub position: usize,
    pub strand: Strand,
    pub edit_distance: u32,
    pub mode: SearchMode,
}

/// 单层裁决结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TierResolution {
    Hit(MotifHit),
    NotFound,
    Ambiguous { count: usize, edit_distance: u32 },
}

impl TierResolution {
    fn into_result(self, mode: SearchMode, motif: &[u8]) -> Result<MotifHit> {
        match self {
            TierResolution::Hit(hit) => Ok(hit),
            TierResolution::NotFound => Err(ChopError::MotifNotFound {
                motif: String::from_utf8_lossy(motif).into_owned(),
            }),
            TierResolution::Ambiguous { count, edit_distance } => Err(ChopError::MotifAmbiguous {
                mode,
                count,
                edit_distance,
            }),
        }
    }
}

/// 精确层：恰好一个命中才算成功，多于一个即歧义。
pub fn resolve_exact_tier(hits: &[ExactHit]) -> TierResolution {
    match hits {
        [] => TierResolution::NotFound,
        [only] => TierResolution::Hit(MotifHit {
            position: only.position,
            strand: only.strand,
            edit_distance: 0,
            mode: SearchMode::Exact,
        }),
        _ => TierResolution::Ambiguous {
            count: hits.len(),
            edit_distance: 0,
        },
    }
}

/// 近似层：只保留最小编辑距离的命中，唯一则成功，并列则歧义。
/// 命中按结束位置计数，同一起点的多个结束位置算多条。
pub fn resolve_approximate_tier(hits: &[ApproxHit]) -> TierResolution {
    let Some(best_ed) = hits.iter().map(|h| h.edit_distance).min() else {
        return TierResolution::NotFound;
    };
    let best: Vec<&ApproxHit> = hits.iter().filter(|h| h.edit_distance == best_ed).collect();
    match best.as_slice() {
        [only] => TierResolution::Hit(MotifHit {
            position: only.position,
            strand: only.strand,
            edit_distance: best_ed,
            mode: SearchMode::Approximate,
        }),
        _ => TierResolution::Ambiguous {
            count: best.len(),
            edit_distance: best_ed,
        },
    }
}

/// 在 `sequence` 中定位 `motif`。
///
/// 精确层命中唯一时直接返回，不再尝试近似搜索；`max_distance == 0` 关闭近似层。
pub fn locate(sequence: &[u8], motif: &[u8], max_distance: u32) -> Result<MotifHit> {
    if motif.is_empty() {
        return Err(ChopError::InvalidMotif("motif is empty".to_string()));
    }

    let seq: Cow<'_, [u8]> = if sequence.iter().any(u8::is_ascii_lowercase) {
        Cow::Owned(dna::normalize_seq(sequence))
    } else {
        Cow::Borrowed(sequence)
    };
    let motif_u = dna::normalize_seq(motif);
    let motif_rc = dna::revcomp(&motif_u);

    let exact = find_exact(&seq, &motif_u, &motif_rc);
    debug!("exact tier: {} hit(s)", exact.len());
    match resolve_exact_tier(&exact) {
        TierResolution::NotFound => {}
        other => return other.into_result(SearchMode::Exact, &motif_u),
    }

    if max_distance == 0 {
        return TierResolution::NotFound.into_result(SearchMode::Exact, &motif_u);
    }

    let approx = find_approx(&seq, &motif_u, &motif_rc, max_distance);
    debug!("approximate tier (k={}): {} hit(s)", max_distance, approx.len());
    resolve_approximate_tier(&approx).into_result(SearchMode::Approximate, &motif_u)
}

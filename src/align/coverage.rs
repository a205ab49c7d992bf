use super::Alignment;
use crate::window::Window;

/// 比对是否完整跨越窗口：已比对，且 reference_start <= start、reference_end >= end。
pub fn fully_spans<A: Alignment + ?Sized>(aln: &A, window: &Window) -> bool {
    !aln.is_unmapped() && aln.reference_start() <= window.start && aln.reference_end() >= window.end
}

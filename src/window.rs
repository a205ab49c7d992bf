use crate::error::{ChopError, Result};

/// 参考坐标上的半开区间 [start, end)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub start: usize,
    pub end: usize,
}

/// 以 `midpoint` 为中心计算长度恰为 `window_size` 的窗口，并裁剪到 [0, sequence_length]。
///
/// 先左裁剪、后右裁剪，右裁剪结果覆盖左裁剪。窗口放不下时返回
/// [`ChopError::WindowUnderflow`]，不会产生负起点。
pub fn compute_window(midpoint: usize, window_size: usize, sequence_length: usize) -> Result<Window> {
    if window_size > sequence_length {
        return Err(ChopError::WindowUnderflow {
            window_size,
            sequence_length,
        });
    }

    let half = (window_size / 2) as i64;
    let mid = midpoint as i64;
    let size = window_size as i64;
    let len = sequence_length as i64;

    let mut start = mid - half;
    let mut end = mid + half;
    // 奇数长度时向下取整少了 1
    if end - start < size {
        end += 1;
    }

    if start < 0 {
        start = 0;
        end = size;
    }
    if end > len {
        end = len;
        start = len - size;
    }

    Ok(Window {
        start: start as usize,
        end: end as usize,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_even_window() {
        assert_eq!(compute_window(5, 4, 11).unwrap(), Window { start: 3, end: 7 });
    }

    #[test]
    fn odd_window_extends_right() {
        assert_eq!(compute_window(10, 5, 100).unwrap(), Window { start: 8, end: 13 });
    }

    #[test]
    fn clamps_left_edge() {
        assert_eq!(compute_window(1, 6, 20).unwrap(), Window { start: 0, end: 6 });
    }

    #[test]
    fn clamps_right_edge() {
        assert_eq!(compute_window(19, 6, 20).unwrap(), Window { start: 14, end: 20 });
    }

    #[test]
    fn window_equal_to_sequence() {
        assert_eq!(compute_window(3, 10, 10).unwrap(), Window { start: 0, end: 10 });
    }

    #[test]
    fn length_is_exact_everywhere() {
        for len in [7usize, 8, 31] {
            for size in 1..=len {
                for mid in 0..=len {
                    let w = compute_window(mid, size, len).unwrap();
                    assert_eq!(w.end - w.start, size, "mid={mid} size={size} len={len}");
                    assert!(w.end <= len);
                }
            }
        }
    }

    #[test]
    fn oversized_window_underflows() {
        let err = compute_window(2, 12, 11).unwrap_err();
        assert!(matches!(
            err,
            ChopError::WindowUnderflow { window_size: 12, sequence_length: 11 }
        ));
    }
}

//! Window plans over a depth-ordered operating set.
//!
//! Positions are dense `0..n` indices into the sorted operating set, not
//! depths; windows are contiguous by position even where depth sampling is
//! irregular.

use std::ops::Range;

use crate::error::GsaError;

/// Overlapping windows `[s, s + size)` for `s = 0, step, 2*step, ...` while
/// `s + size <= n`.
///
/// A trailing partial window is dropped: every window holds exactly `size`
/// positions.
pub fn sliding_windows(n: usize, size: usize, step: usize) -> Result<Vec<Range<usize>>, GsaError> {
    if size == 0 {
        return Err(GsaError::InvalidConfig("window size must be >= 1".into()));
    }
    if step == 0 {
        return Err(GsaError::InvalidConfig("window step must be >= 1".into()));
    }
    if n < size {
        return Ok(Vec::new());
    }

    Ok((0..=n - size)
        .step_by(step)
        .map(|start| start..start + size)
        .collect())
}

/// Non-overlapping windows of `size` positions. The last window may be short.
pub fn tumbling_windows(n: usize, size: usize) -> Result<Vec<Range<usize>>, GsaError> {
    if size == 0 {
        return Err(GsaError::InvalidConfig("window size must be >= 1".into()));
    }
    Ok((0..n)
        .step_by(size)
        .map(|start| start..(start + size).min(n))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sliding_windows_stop_at_last_full_window() {
        let w = sliding_windows(150, 100, 20).unwrap();
        assert_eq!(w, vec![0..100, 20..120, 40..140]);
    }

    #[test]
    fn sliding_windows_include_exact_fit_at_end() {
        let w = sliding_windows(140, 100, 20).unwrap();
        assert_eq!(w.last(), Some(&(40..140)));
        assert_eq!(sliding_windows(100, 100, 20).unwrap(), vec![0..100]);
    }

    #[test]
    fn too_few_positions_give_no_windows() {
        assert!(sliding_windows(95, 100, 20).unwrap().is_empty());
    }

    #[test]
    fn zero_step_is_rejected() {
        assert!(sliding_windows(500, 100, 0).is_err());
        assert!(tumbling_windows(500, 0).is_err());
    }

    #[test]
    fn tumbling_windows_keep_short_tail() {
        let w = tumbling_windows(450, 200).unwrap();
        assert_eq!(w, vec![0..200, 200..400, 400..450]);
    }
}

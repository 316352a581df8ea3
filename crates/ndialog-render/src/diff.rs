#![forbid(unsafe_code)]

//! Diff computation between composed frames.
//!
//! Row-major scan producing runs of changed cells on the same row, so the
//! presenter positions the cursor once per run instead of once per cell.

use crate::buffer::Buffer;

/// A horizontal run of changed cells: row `y`, columns `x0..=x1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeRun {
    pub y: u16,
    pub x0: u16,
    pub x1: u16,
}

/// Changed runs between two equally sized buffers.
///
/// Returns `None` when the sizes differ; the caller must repaint in full.
#[must_use]
pub fn changed_runs(old: &Buffer, new: &Buffer) -> Option<Vec<ChangeRun>> {
    if old.width() != new.width() || old.height() != new.height() {
        return None;
    }
    let mut runs = Vec::new();
    for y in 0..new.height() {
        let mut open: Option<(u16, u16)> = None;
        for x in 0..new.width() {
            let differs = old.get(i32::from(x), i32::from(y)) != new.get(i32::from(x), i32::from(y));
            match (differs, open) {
                (true, None) => open = Some((x, x)),
                (true, Some((x0, _))) => open = Some((x0, x)),
                (false, Some((x0, x1))) => {
                    runs.push(ChangeRun { y, x0, x1 });
                    open = None;
                }
                (false, None) => {}
            }
        }
        if let Some((x0, x1)) = open {
            runs.push(ChangeRun { y, x0, x1 });
        }
    }
    Some(runs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Style;

    #[test]
    fn identical_buffers_have_no_runs() {
        let a = Buffer::new(5, 2);
        assert_eq!(changed_runs(&a, &a.clone()), Some(vec![]));
    }

    #[test]
    fn adjacent_changes_coalesce() {
        let old = Buffer::new(6, 2);
        let mut new = old.clone();
        new.put_str(1, 1, "ab", Style::PLAIN);
        new.put_str(5, 1, "z", Style::PLAIN);
        assert_eq!(
            changed_runs(&old, &new),
            Some(vec![
                ChangeRun { y: 1, x0: 1, x1: 2 },
                ChangeRun { y: 1, x0: 5, x1: 5 },
            ])
        );
    }

    #[test]
    fn size_mismatch_forces_full_repaint() {
        assert_eq!(changed_runs(&Buffer::new(2, 2), &Buffer::new(3, 2)), None);
    }
}

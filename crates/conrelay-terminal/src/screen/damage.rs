//! Damage tracking: which columns of which rows changed since the last drain.

use super::core::Screen;
use super::types::RegionChange;

impl Screen {
    /// Widen the damaged span of `row` to include `[left, right]`.
    pub(crate) fn mark_cells(&mut self, row: usize, left: usize, right: usize) {
        if row >= self.rows || self.cols == 0 {
            return;
        }
        let right = right.min(self.cols - 1);
        if left > right {
            return;
        }
        let span = &mut self.damage[row];
        *span = Some(match *span {
            Some((l, r)) => (l.min(left), r.max(right)),
            None => (left, right),
        });
    }

    #[inline]
    pub(crate) fn mark_row(&mut self, row: usize) {
        self.mark_cells(row, 0, self.cols.saturating_sub(1));
    }

    pub(crate) fn mark_rows(&mut self, start: usize, end: usize) {
        for r in start..end.min(self.rows) {
            self.mark_row(r);
        }
    }

    /// Drain damaged spans in row order.
    pub fn take_damage(&mut self) -> Vec<RegionChange> {
        self.damage
            .iter_mut()
            .enumerate()
            .filter_map(|(row, span)| {
                span.take()
                    .map(|(left, right)| RegionChange { row, left, right })
            })
            .collect()
    }
}

//! Core types: Cell, CursorState, RegionChange.

// ---------------------------------------------------------------------------
// Cell
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    pub c: char,
    /// 1 = normal, 2 = wide CJK, 0 = continuation of a wide char.
    pub width: u8,
}

impl Default for Cell {
    fn default() -> Self {
        Self { c: ' ', width: 1 }
    }
}

// ---------------------------------------------------------------------------
// Cursor
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CursorState {
    pub row: usize,
    pub col: usize,
}

// ---------------------------------------------------------------------------
// RegionChange
// ---------------------------------------------------------------------------

/// "Row `row` changed in columns `[left, right]`" (both inclusive).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegionChange {
    pub row: usize,
    pub left: usize,
    pub right: usize,
}

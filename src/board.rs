//! Rendered board cells and the nearest-cell index over them.

use crate::common::Coord;
use crate::view::{CellMark, CellView, Point};

/// Cells of one board in document order.
pub struct Board<C: CellView> {
    cells: Vec<C>,
}

impl<C: CellView> Board<C> {
    pub fn new(cells: Vec<C>) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[C] {
        &self.cells
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cell whose center is closest to `pointer`.
    ///
    /// Scans every cell; on equal distances the first one in document order
    /// wins. Returns `None` only for a board without cells.
    pub fn nearest_cell(&self, pointer: Point) -> Option<&C> {
        let mut best: Option<(&C, f64)> = None;
        for cell in &self.cells {
            let d = pointer.distance(cell.bounds().center());
            match best {
                Some((_, min)) if d >= min => {}
                _ => best = Some((cell, d)),
            }
        }
        best.map(|(cell, _)| cell)
    }

    /// First cell with exactly this coordinate.
    pub fn cell(&self, coord: Coord) -> Option<&C> {
        self.cells.iter().find(|c| c.coord() == coord)
    }

    /// Paint every cell matching `coord`. Returns whether any matched.
    pub fn mark(&mut self, coord: Coord, mark: CellMark) -> bool {
        let mut found = false;
        for cell in self.cells.iter_mut().filter(|c| c.coord() == coord) {
            cell.paint(mark);
            found = true;
        }
        found
    }
}

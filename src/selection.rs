//! Selection: up to three chosen cards, referenced by cell.

use crate::card::Card;
use crate::grid::{CellPos, Grid};

pub const MAX_SELECTION: usize = 3;

/// Outcome of a toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionEvent {
    Selected,
    Deselected,
    /// Three cards already chosen; nothing changed.
    Rejected,
    /// The cell holds no card; nothing changed.
    Empty,
}

/// Cells of the chosen cards, in the order they were picked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    cells: Vec<CellPos>,
}

impl Selection {
    pub fn new() -> Self {
        Self {
            cells: Vec::with_capacity(MAX_SELECTION),
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[CellPos] {
        &self.cells
    }

    pub fn contains(&self, pos: CellPos) -> bool {
        self.cells.contains(&pos)
    }

    /// Cards behind the selected cells, in selection order.
    pub fn cards(&self, grid: &Grid) -> Vec<Card> {
        self.cells
            .iter()
            .filter_map(|&pos| grid.get(pos).map(|p| p.card))
            .collect()
    }

    pub fn toggle(&mut self, grid: &mut Grid, pos: CellPos) -> SelectionEvent {
        let Some(placed) = grid.get_mut(pos) else {
            return SelectionEvent::Empty;
        };
        if placed.selected {
            placed.selected = false;
            self.cells.retain(|&c| c != pos);
            return SelectionEvent::Deselected;
        }
        if self.cells.len() >= MAX_SELECTION {
            return SelectionEvent::Rejected;
        }
        placed.selected = true;
        self.cells.push(pos);
        SelectionEvent::Selected
    }

    /// Unflag every referenced card and empty the selection.
    pub fn clear(&mut self, grid: &mut Grid) {
        for pos in self.cells.drain(..) {
            if let Some(placed) = grid.get_mut(pos) {
                placed.selected = false;
            }
        }
    }

    /// Empty the selection and hand back the cells, leaving flags to the caller.
    pub fn take(&mut self) -> Vec<CellPos> {
        std::mem::take(&mut self.cells)
    }
}

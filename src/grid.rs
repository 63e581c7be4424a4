//! Grid: 8×4 card cells, free-cell spawning and the spawn interval schedule.

use crate::card::Card;
use crate::deck::Deck;
use crate::rng::RngState;

pub const GRID_COLS: usize = 8;
pub const GRID_ROWS: usize = 4;
pub const GRID_CAPACITY: usize = GRID_COLS * GRID_ROWS;

/// Starting spawn interval in steps.
pub const SPAWN_INTERVAL_START: u32 = 90;
/// Spawn interval never drops below this.
pub const SPAWN_INTERVAL_MIN: u32 = 30;

/// Cell coordinate; `col` 0..8, `row` 0..4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellPos {
    pub col: u8,
    pub row: u8,
}

impl CellPos {
    pub const fn new(col: u8, row: u8) -> Self {
        Self { col, row }
    }

    #[inline]
    pub fn in_bounds(self) -> bool {
        (self.col as usize) < GRID_COLS && (self.row as usize) < GRID_ROWS
    }

    /// Row-major iteration over every cell.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..GRID_ROWS as u8).flat_map(|row| (0..GRID_COLS as u8).map(move |col| Self { col, row }))
    }

    #[inline]
    fn slot(self) -> usize {
        self.row as usize * GRID_COLS + self.col as usize
    }
}

/// A card on the grid. Identity is the cell it occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedCard {
    pub card: Card,
    pub cell: CellPos,
    pub selected: bool,
}

/// Owns every placed card; one slot per cell, so two cards can never share a cell.
#[derive(Debug, Clone)]
pub struct Grid {
    cells: [Option<PlacedCard>; GRID_CAPACITY],
    occupied: usize,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Grid {
    pub fn new() -> Self {
        Self {
            cells: [None; GRID_CAPACITY],
            occupied: 0,
        }
    }

    #[inline]
    pub fn get(&self, pos: CellPos) -> Option<&PlacedCard> {
        if !pos.in_bounds() {
            return None;
        }
        self.cells[pos.slot()].as_ref()
    }

    #[inline]
    pub fn get_mut(&mut self, pos: CellPos) -> Option<&mut PlacedCard> {
        if !pos.in_bounds() {
            return None;
        }
        self.cells[pos.slot()].as_mut()
    }

    pub fn occupied(&self) -> usize {
        self.occupied
    }

    pub fn is_full(&self) -> bool {
        self.occupied == GRID_CAPACITY
    }

    pub fn free_cells(&self) -> Vec<CellPos> {
        CellPos::all().filter(|p| self.get(*p).is_none()).collect()
    }

    /// Occupied cells in row-major order.
    pub fn cards(&self) -> impl Iterator<Item = &PlacedCard> {
        self.cells.iter().flatten()
    }

    /// Put `card` at `pos`. Returns false (and changes nothing) if the cell is taken or out of bounds.
    pub fn place(&mut self, card: Card, pos: CellPos) -> bool {
        if !pos.in_bounds() || self.cells[pos.slot()].is_some() {
            return false;
        }
        self.cells[pos.slot()] = Some(PlacedCard {
            card,
            cell: pos,
            selected: false,
        });
        self.occupied += 1;
        true
    }

    pub fn remove(&mut self, pos: CellPos) -> Option<PlacedCard> {
        if !pos.in_bounds() {
            return None;
        }
        let taken = self.cells[pos.slot()].take();
        if taken.is_some() {
            self.occupied -= 1;
        }
        taken
    }

    /// Draw and place a card in a uniformly chosen free cell once `elapsed >= interval`.
    /// `None` when not due yet or when no free cell exists (the round-over signal).
    pub fn try_spawn(
        &mut self,
        deck: &mut Deck,
        rng: &mut RngState,
        interval: u32,
        elapsed: u32,
    ) -> Option<PlacedCard> {
        if elapsed < interval {
            return None;
        }
        let free = self.free_cells();
        let pos = *rng.choose(&free)?;
        let card = deck.draw(rng);
        let placed = self.place(card, pos);
        debug_assert!(placed, "free cell ({}, {}) was taken", pos.col, pos.row);
        self.get(pos).copied()
    }
}

/// Spawn timer with the decaying interval.
#[derive(Debug, Clone)]
pub struct Spawner {
    interval: u32,
    min_interval: u32,
    elapsed: u32,
}

impl Default for Spawner {
    fn default() -> Self {
        Self::new(SPAWN_INTERVAL_START, SPAWN_INTERVAL_MIN)
    }
}

impl Spawner {
    pub fn new(start_interval: u32, min_interval: u32) -> Self {
        let min_interval = min_interval.max(1);
        Self {
            interval: start_interval.max(min_interval),
            min_interval,
            elapsed: 0,
        }
    }

    pub fn interval(&self) -> u32 {
        self.interval
    }

    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    /// Advance one step and spawn if due. The interval shrinks by one per spawn, down to the floor.
    pub fn tick(&mut self, grid: &mut Grid, deck: &mut Deck, rng: &mut RngState) -> Option<PlacedCard> {
        self.elapsed = self.elapsed.saturating_add(1);
        let placed = grid.try_spawn(deck, rng, self.interval, self.elapsed)?;
        self.elapsed = 0;
        self.interval = self.interval.saturating_sub(1).max(self.min_interval);
        Some(placed)
    }
}

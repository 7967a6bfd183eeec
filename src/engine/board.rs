//! Board: the grid plus the live tiles sitting on it.
//!
//! Every change to a cell/tile link goes through [`Board::attach`] and
//! [`Board::detach`], which update both sides together.

use crate::engine::{CellId, Coord, Direction, Grid, Tile, TileArena, TileId};

/// The grid and its live tiles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    grid: Grid,
    tiles: TileArena,
    /// Live tiles in spawn order.
    live: Vec<TileId>,
}

impl Board {
    /// Create an empty board.
    ///
    /// Returns `None` if width or height is zero.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Option<Self> {
        let grid = Grid::new(width, height)?;
        let live = Vec::with_capacity(grid.size());
        Some(Self {
            grid,
            tiles: TileArena::default(),
            live,
        })
    }

    /// Build a board from row-major values, `0` meaning an empty cell.
    ///
    /// Returns `None` if a dimension is zero or `values` does not cover the
    /// grid exactly.
    #[must_use]
    pub fn from_values(width: u16, height: u16, values: &[u32]) -> Option<Self> {
        let mut board = Self::new(width, height)?;
        if values.len() != board.grid.size() {
            return None;
        }

        let cells: Vec<CellId> = board.grid.cells().map(|(id, _)| id).collect();
        for (cell, &value) in cells.into_iter().zip(values) {
            if value != 0 {
                board.place_in(cell, value)?;
            }
        }
        Some(board)
    }

    /// The underlying grid.
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Width of the board.
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.grid.width()
    }

    /// Height of the board.
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.grid.height()
    }

    /// Look up a live tile.
    #[must_use]
    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(id)
    }

    /// Handle of the tile at `coord`, if any.
    #[must_use]
    pub fn tile_id_at(&self, coord: Coord) -> Option<TileId> {
        self.grid
            .cell_at(coord)
            .and_then(|cell| self.grid.cell(cell).occupant())
    }

    /// The tile at `coord`, if any.
    #[must_use]
    pub fn tile_at(&self, coord: Coord) -> Option<&Tile> {
        self.tile_id_at(coord).and_then(|id| self.tiles.get(id))
    }

    /// Live tiles in spawn order.
    #[must_use]
    pub fn live_tiles(&self) -> &[TileId] {
        &self.live
    }

    /// Number of live tiles.
    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.live.len()
    }

    /// Whether every cell holds a tile.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.live.len() == self.grid.size()
    }

    /// Row-major snapshot of cell values, `0` for empty cells.
    #[must_use]
    pub fn values(&self) -> Vec<u32> {
        self.grid
            .cells()
            .map(|(_, cell)| {
                cell.occupant()
                    .and_then(|id| self.tiles.get(id))
                    .map_or(0, Tile::value)
            })
            .collect()
    }

    /// Sum of all tile values.
    #[must_use]
    pub fn total_value(&self) -> u64 {
        self.live_values().map(u64::from).sum()
    }

    /// Largest tile value, or 0 on an empty board.
    #[must_use]
    pub fn max_value(&self) -> u32 {
        self.live_values().max().unwrap_or(0)
    }

    fn live_values(&self) -> impl Iterator<Item = u32> + '_ {
        self.live
            .iter()
            .filter_map(|&id| self.tiles.get(id))
            .map(Tile::value)
    }

    /// Place a new tile with `value` at `coord`.
    ///
    /// Returns `None` if the coordinate is outside the grid, the cell is
    /// occupied, or `value` is not a power of two of at least 2.
    pub fn place(&mut self, coord: Coord, value: u32) -> Option<TileId> {
        let cell = self.grid.cell_at(coord)?;
        self.place_in(cell, value)
    }

    pub(crate) fn place_in(&mut self, cell: CellId, value: u32) -> Option<TileId> {
        if value < 2 || !value.is_power_of_two() || self.grid.cell(cell).is_occupied() {
            return None;
        }
        let id = self.tiles.insert(value);
        self.attach(id, cell);
        self.live.push(id);
        Some(id)
    }

    /// Detach every occupant and discard every tile.
    pub fn clear(&mut self) {
        let occupied: Vec<CellId> = self
            .grid
            .cells()
            .filter(|(_, cell)| cell.is_occupied())
            .map(|(id, _)| id)
            .collect();
        for cell in occupied {
            self.grid.cell_mut(cell).set_occupant(None);
        }
        self.tiles.clear();
        self.live.clear();
    }

    /// Reset the lock flag on every live tile.
    pub fn unlock_all(&mut self) {
        for &id in &self.live {
            if let Some(tile) = self.tiles.get_mut(id) {
                tile.unlock();
            }
        }
    }

    /// Whether `mover` may merge into `other`: equal values, `other` not
    /// locked, and the doubled value still fits in a `u32`.
    #[must_use]
    pub fn can_merge(&self, mover: TileId, other: TileId) -> bool {
        match (self.tiles.get(mover), self.tiles.get(other)) {
            (Some(a), Some(b)) => {
                mover != other
                    && a.value() == b.value()
                    && !b.is_locked()
                    && a.value().checked_mul(2).is_some()
            }
            _ => false,
        }
    }

    /// True iff the board is full and no tile has an adjacent tile it could
    /// merge with.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        if !self.is_full() {
            return false;
        }

        for &id in &self.live {
            let Some(cell) = self.tiles.get(id).and_then(Tile::cell) else {
                continue;
            };
            for direction in Direction::ALL {
                let neighbour = self
                    .grid
                    .adjacent_cell(cell, direction)
                    .and_then(|adj| self.grid.cell(adj).occupant());
                if let Some(other) = neighbour
                    && self.can_merge(id, other)
                {
                    return false;
                }
            }
        }

        true
    }

    /// Move a tile to an empty cell.
    pub(crate) fn relocate(&mut self, id: TileId, to: CellId) {
        debug_assert!(self.grid.cell(to).is_empty(), "relocating onto an occupied cell");
        self.detach(id);
        self.attach(id, to);
    }

    /// Merge `mover` into `survivor`, discarding `mover`.
    ///
    /// Returns the survivor's new value, or `None` if either handle is stale.
    pub(crate) fn merge(&mut self, survivor: TileId, mover: TileId) -> Option<u32> {
        self.tiles.get(mover)?;
        self.tiles.get(survivor)?;

        self.live.retain(|&id| id != mover);
        self.detach(mover);
        self.tiles.remove(mover);

        self.tiles.get_mut(survivor).map(Tile::absorb)
    }

    fn attach(&mut self, id: TileId, cell: CellId) {
        debug_assert!(self.grid.cell(cell).is_empty(), "cell already occupied");
        if let Some(tile) = self.tiles.get_mut(id) {
            debug_assert!(tile.cell().is_none(), "tile already attached");
            tile.set_cell(Some(cell));
            self.grid.cell_mut(cell).set_occupant(Some(id));
        }
    }

    fn detach(&mut self, id: TileId) -> Option<CellId> {
        let tile = self.tiles.get_mut(id)?;
        let cell = tile.cell()?;
        tile.set_cell(None);

        let slot = self.grid.cell_mut(cell);
        debug_assert_eq!(slot.occupant(), Some(id), "cell/tile link mismatch");
        slot.set_occupant(None);
        Some(cell)
    }

    #[cfg(test)]
    pub(crate) fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }
}

//! Grid, cell and coordinate types.

use rand::Rng;

use crate::engine::TileId;

/// A coordinate on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    /// X coordinate (column).
    pub x: u16,
    /// Y coordinate (row, 0 is the top row).
    pub y: u16,
}

impl Coord {
    /// Create a new coordinate.
    #[must_use]
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    /// The coordinate one step along `direction`.
    ///
    /// Returns `None` on underflow/overflow; the result is not bounds-checked
    /// against any grid.
    #[must_use]
    #[inline]
    pub fn step(self, direction: Direction) -> Option<Self> {
        let Self { x, y } = self;
        match direction {
            Direction::Up => y.checked_sub(1).map(|y| Self::new(x, y)),
            Direction::Down => y.checked_add(1).map(|y| Self::new(x, y)),
            Direction::Left => x.checked_sub(1).map(|x| Self::new(x, y)),
            Direction::Right => x.checked_add(1).map(|x| Self::new(x, y)),
        }
    }
}

/// One of the four slide directions.
///
/// `Up` moves toward row 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Direction {
    /// Toward row 0.
    Up = 0,
    /// Toward the last row.
    Down = 1,
    /// Toward column 0.
    Left = 2,
    /// Toward the last column.
    Right = 3,
}

impl Direction {
    /// All four directions.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Convert a raw byte into a direction (0=Up, 1=Down, 2=Left, 3=Right).
    #[must_use]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Direction::Up),
            1 => Some(Direction::Down),
            2 => Some(Direction::Left),
            3 => Some(Direction::Right),
            _ => None,
        }
    }

    /// The direction pointing the other way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Stable handle to a cell of a [`Grid`].
///
/// Handles are row-major indices assigned once when the grid is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId(usize);

impl CellId {
    /// Row-major index of this cell.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// A single addressable board position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    coord: Coord,
    occupant: Option<TileId>,
}

impl Cell {
    /// Coordinates of this cell.
    #[must_use]
    pub const fn coord(&self) -> Coord {
        self.coord
    }

    /// The tile occupying this cell, if any.
    #[must_use]
    pub const fn occupant(&self) -> Option<TileId> {
        self.occupant
    }

    /// Whether a tile occupies this cell.
    #[must_use]
    pub const fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }

    /// Whether this cell is free.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.occupant.is_none()
    }

    pub(crate) fn set_occupant(&mut self, occupant: Option<TileId>) {
        self.occupant = occupant;
    }
}

/// The board's cells with coordinate and adjacency queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    /// Width in cells.
    width: u16,
    /// Height in cells.
    height: u16,
    /// Cells stored in row-major order.
    cells: Vec<Cell>,
}

impl Grid {
    /// Create an empty grid.
    ///
    /// Returns `None` if width or height is zero.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }

        let cells = (0..height)
            .flat_map(|y| (0..width).map(move |x| Coord::new(x, y)))
            .map(|coord| Cell {
                coord,
                occupant: None,
            })
            .collect();

        Some(Self {
            width,
            height,
            cells,
        })
    }

    /// Width of the grid.
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Height of the grid.
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Total number of cells.
    #[must_use]
    pub fn size(&self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    /// Check if a coordinate is within the grid bounds.
    #[must_use]
    pub const fn in_bounds(&self, coord: Coord) -> bool {
        coord.x < self.width && coord.y < self.height
    }

    fn coord_to_index(&self, coord: Coord) -> Option<usize> {
        if self.in_bounds(coord) {
            Some(usize::from(coord.y) * usize::from(self.width) + usize::from(coord.x))
        } else {
            None
        }
    }

    /// Look up the cell at `(x, y)`.
    ///
    /// Out-of-bounds coordinates yield `None`.
    #[must_use]
    pub fn cell_at(&self, coord: Coord) -> Option<CellId> {
        self.coord_to_index(coord).map(CellId)
    }

    /// Borrow a cell by handle.
    ///
    /// Handles are only ever produced by this grid, so indexing is total.
    #[must_use]
    #[inline]
    pub fn cell(&self, id: CellId) -> &Cell {
        &self.cells[id.0]
    }

    pub(crate) fn cell_mut(&mut self, id: CellId) -> &mut Cell {
        &mut self.cells[id.0]
    }

    /// The cell one step from `id` along `direction`, or `None` at the edge.
    #[must_use]
    #[inline]
    pub fn adjacent_cell(&self, id: CellId, direction: Direction) -> Option<CellId> {
        self.cell(id)
            .coord
            .step(direction)
            .and_then(|coord| self.cell_at(coord))
    }

    /// Iterate over all cells with their handles, row-major.
    pub fn cells(&self) -> impl Iterator<Item = (CellId, &Cell)> {
        self.cells.iter().enumerate().map(|(idx, cell)| (CellId(idx), cell))
    }

    /// Number of unoccupied cells.
    #[must_use]
    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_empty()).count()
    }

    /// Pick an unoccupied cell uniformly at random.
    ///
    /// Returns `None` when the grid is full.
    pub fn random_empty_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<CellId> {
        let empty: Vec<CellId> = self
            .cells()
            .filter(|(_, cell)| cell.is_empty())
            .map(|(id, _)| id)
            .collect();

        if empty.is_empty() {
            return None;
        }

        Some(empty[rng.random_range(0..empty.len())])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_grid_creation() {
        let grid = Grid::new(4, 3).unwrap();
        assert_eq!(grid.width(), 4);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.size(), 12);
        assert_eq!(grid.empty_count(), 12);
    }

    #[test]
    fn test_grid_zero_size() {
        assert!(Grid::new(0, 4).is_none());
        assert!(Grid::new(4, 0).is_none());
    }

    #[test]
    fn test_coordinates_assigned_row_major() {
        let grid = Grid::new(3, 2).unwrap();
        for (id, cell) in grid.cells() {
            let coord = cell.coord();
            assert_eq!(id.index(), usize::from(coord.y) * 3 + usize::from(coord.x));
            assert_eq!(grid.cell_at(coord), Some(id));
        }
    }

    #[test]
    fn test_cell_at_bounds() {
        let grid = Grid::new(4, 4).unwrap();
        assert!(grid.cell_at(Coord::new(0, 0)).is_some());
        assert!(grid.cell_at(Coord::new(3, 3)).is_some());
        assert!(grid.cell_at(Coord::new(4, 0)).is_none());
        assert!(grid.cell_at(Coord::new(0, 4)).is_none());
    }

    #[test]
    fn test_adjacent_cell_up_decreases_row() {
        let grid = Grid::new(4, 4).unwrap();
        let center = grid.cell_at(Coord::new(1, 1)).unwrap();

        let coord_of = |dir| grid.cell(grid.adjacent_cell(center, dir).unwrap()).coord();
        assert_eq!(coord_of(Direction::Up), Coord::new(1, 0));
        assert_eq!(coord_of(Direction::Down), Coord::new(1, 2));
        assert_eq!(coord_of(Direction::Left), Coord::new(0, 1));
        assert_eq!(coord_of(Direction::Right), Coord::new(2, 1));
    }

    #[test]
    fn test_adjacent_cell_at_edges() {
        let grid = Grid::new(4, 4).unwrap();
        let top_left = grid.cell_at(Coord::new(0, 0)).unwrap();
        let bottom_right = grid.cell_at(Coord::new(3, 3)).unwrap();

        assert!(grid.adjacent_cell(top_left, Direction::Up).is_none());
        assert!(grid.adjacent_cell(top_left, Direction::Left).is_none());
        assert!(grid.adjacent_cell(bottom_right, Direction::Down).is_none());
        assert!(grid.adjacent_cell(bottom_right, Direction::Right).is_none());
    }

    #[test]
    fn test_random_empty_cell_skips_occupied() {
        let mut grid = Grid::new(2, 2).unwrap();
        let free = grid.cell_at(Coord::new(1, 1)).unwrap();
        let ids: Vec<CellId> = grid.cells().map(|(id, _)| id).collect();
        for id in ids {
            if id != free {
                grid.cell_mut(id).set_occupant(Some(TileId::from_raw(0, 0)));
            }
        }

        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            assert_eq!(grid.random_empty_cell(&mut rng), Some(free));
        }
    }

    #[test]
    fn test_random_empty_cell_full_grid() {
        let mut grid = Grid::new(1, 1).unwrap();
        let only = grid.cell_at(Coord::new(0, 0)).unwrap();
        grid.cell_mut(only).set_occupant(Some(TileId::from_raw(0, 0)));

        let mut rng = StdRng::seed_from_u64(7);
        assert!(grid.random_empty_cell(&mut rng).is_none());
    }

    #[test]
    fn test_random_empty_cell_is_uniform() {
        let grid = Grid::new(4, 4).unwrap();
        let mut rng = StdRng::seed_from_u64(99);
        let mut counts = [0u32; 16];
        for _ in 0..16_000 {
            let id = grid.random_empty_cell(&mut rng).unwrap();
            counts[id.index()] += 1;
        }
        // Expected 1000 per cell; allow generous slack.
        assert!(counts.iter().all(|&c| (800..1200).contains(&c)), "{counts:?}");
    }

    #[test]
    fn test_direction_roundtrip() {
        for dir in Direction::ALL {
            assert_eq!(Direction::from_u8(dir as u8), Some(dir));
            assert_eq!(dir.opposite().opposite(), dir);
        }
        assert!(Direction::from_u8(4).is_none());
    }
}

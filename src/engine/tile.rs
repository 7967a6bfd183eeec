//! Tiles and the generational arena that owns them.

use crate::engine::CellId;

/// Handle to a tile in a [`Board`](crate::engine::Board).
///
/// The generation makes a handle to a discarded tile stale instead of
/// silently aliasing whichever tile later reuses its slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileId {
    index: u32,
    generation: u32,
}

impl TileId {
    #[cfg(test)]
    pub(crate) const fn from_raw(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }
}

/// A value-bearing token on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    value: u32,
    locked: bool,
    cell: Option<CellId>,
}

impl Tile {
    /// Current value (2, 4, 8, ...).
    #[must_use]
    pub const fn value(&self) -> u32 {
        self.value
    }

    /// Whether this tile already survived a merge during the current move.
    #[must_use]
    pub const fn is_locked(&self) -> bool {
        self.locked
    }

    /// The cell this tile sits on.
    #[must_use]
    pub const fn cell(&self) -> Option<CellId> {
        self.cell
    }

    pub(crate) fn set_cell(&mut self, cell: Option<CellId>) {
        self.cell = cell;
    }

    pub(crate) fn unlock(&mut self) {
        self.locked = false;
    }

    /// Double the value in place and lock the tile. Returns the new value.
    ///
    /// `Board::can_merge` keeps this below `u32::MAX`.
    pub(crate) fn absorb(&mut self) -> u32 {
        self.value = self.value.saturating_mul(2);
        self.locked = true;
        self.value
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Slot {
    generation: u32,
    tile: Option<Tile>,
}

/// Slot storage for tiles with free-list reuse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct TileArena {
    slots: Vec<Slot>,
    free: Vec<u32>,
}

impl TileArena {
    /// Store a fresh, unlocked, detached tile.
    pub(crate) fn insert(&mut self, value: u32) -> TileId {
        let tile = Tile {
            value,
            locked: false,
            cell: None,
        };

        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.tile = Some(tile);
            return TileId {
                index,
                generation: slot.generation,
            };
        }

        let index = u32::try_from(self.slots.len()).unwrap_or(u32::MAX);
        self.slots.push(Slot {
            generation: 0,
            tile: Some(tile),
        });
        TileId {
            index,
            generation: 0,
        }
    }

    /// Discard a tile, invalidating its handle.
    pub(crate) fn remove(&mut self, id: TileId) -> Option<Tile> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        let tile = slot.tile.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        Some(tile)
    }

    pub(crate) fn get(&self, id: TileId) -> Option<&Tile> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.tile.as_ref())
    }

    pub(crate) fn get_mut(&mut self, id: TileId) -> Option<&mut Tile> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.tile.as_mut())
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut arena = TileArena::default();
        let id = arena.insert(2);
        let tile = arena.get(id).unwrap();
        assert_eq!(tile.value(), 2);
        assert!(!tile.is_locked());
        assert!(tile.cell().is_none());
    }

    #[test]
    fn test_removed_handle_is_stale() {
        let mut arena = TileArena::default();
        let first = arena.insert(2);
        assert!(arena.remove(first).is_some());
        assert!(arena.get(first).is_none());

        // The slot is reused but the old handle stays dead.
        let second = arena.insert(4);
        assert_ne!(first, second);
        assert!(arena.get(first).is_none());
        assert_eq!(arena.get(second).unwrap().value(), 4);
        assert!(arena.remove(first).is_none());
    }

    #[test]
    fn test_absorb_doubles_and_locks() {
        let mut arena = TileArena::default();
        let id = arena.insert(8);
        let tile = arena.get_mut(id).unwrap();
        assert_eq!(tile.absorb(), 16);
        assert!(tile.is_locked());
        tile.unlock();
        assert!(!tile.is_locked());
        assert_eq!(tile.value(), 16);
    }
}

use crate::api::types::{Material, SimError};

/// The static collision geometry: a fixed square grid of optional block
/// materials.
///
/// Cells are stored in row-major order: index = row * size + col.
/// Dimensions are immutable after construction; only cell contents change,
/// and only through the editor-facing `paint`/`erase`/`clear` calls; the
/// physics stepper reads `is_solid` and nothing else. Edits take effect on
/// the next tick that reads the grid.
#[derive(Debug, Clone)]
pub struct TileGrid {
    size: usize,
    cells: Vec<Option<Material>>,
}

impl TileGrid {
    /// Create an empty size×size grid.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![None; size * size],
        }
    }

    /// Grid dimension in tiles.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether the cell at (row, col) blocks movement.
    /// Any out-of-range index, including negative, is non-solid; falling
    /// past the bottom edge is handled as out-of-world, not as collision.
    pub fn is_solid(&self, row: i32, col: i32) -> bool {
        self.material(row, col).is_some()
    }

    /// Material lookup for the editor/renderer. None for empty or
    /// out-of-range cells.
    pub fn material(&self, row: i32, col: i32) -> Option<Material> {
        if !self.contains(row, col) {
            return None;
        }
        self.cells[row as usize * self.size + col as usize]
    }

    /// Whether (row, col) is a valid cell index.
    pub fn contains(&self, row: i32, col: i32) -> bool {
        row >= 0 && col >= 0 && row < self.size as i32 && col < self.size as i32
    }

    /// Place a block. Fails on out-of-range indices so editor bugs surface
    /// instead of silently no-oping.
    pub fn paint(&mut self, material: Material, row: i32, col: i32) -> Result<(), SimError> {
        let idx = self.index(row, col)?;
        self.cells[idx] = Some(material);
        Ok(())
    }

    /// Remove a block. Erasing an already-empty in-range cell is fine.
    pub fn erase(&mut self, row: i32, col: i32) -> Result<(), SimError> {
        let idx = self.index(row, col)?;
        self.cells[idx] = None;
        Ok(())
    }

    /// Empty every cell. Dimensions are unchanged.
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Count of occupied cells.
    pub fn block_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    fn index(&self, row: i32, col: i32) -> Result<usize, SimError> {
        if !self.contains(row, col) {
            return Err(SimError::OutOfBounds { row, col });
        }
        Ok(row as usize * self.size + col as usize)
    }
}

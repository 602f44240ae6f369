//! Grid partitioning of an image and projection of detector boxes onto it.

use serde::Serialize;

use crate::geometry::GridCell;
use crate::types::{DetectedObject, GridError, GridResult, MatchVector};

/// Largest number of cells a partition may hold (a 1024 x 1024 grid).
pub const MAX_CELLS: usize = 1 << 20;

/// An image of `width` x `height` pixels split into `grid_size²` cells.
///
/// Cells are stored row-major: the top row left to right, then the next row.
#[derive(Debug, Clone, Serialize)]
pub struct GridPartition {
    width: u32,
    height: u32,
    grid_size: u32,
    cells: Vec<GridCell>,
}

impl GridPartition {
    /// Split the image plane into a `grid_size` x `grid_size` grid.
    ///
    /// Cell dimensions use floor division, and the last row and column are
    /// not stretched to reach the image edge. When `width` or `height` is not
    /// a multiple of `grid_size`, a sliver along the right or bottom edge is
    /// covered by no cell.
    ///
    /// Grids with more than [`MAX_CELLS`] cells are rejected.
    pub fn new(width: u32, height: u32, grid_size: u32) -> GridResult<Self> {
        if grid_size < 1 {
            return Err(GridError::Precondition(format!(
                "grid_size must be at least 1, got {grid_size}"
            )));
        }

        let count = (grid_size as usize)
            .checked_mul(grid_size as usize)
            .filter(|&n| n <= MAX_CELLS)
            .ok_or_else(|| {
                GridError::Precondition(format!(
                    "grid_size {grid_size} exceeds the limit of {MAX_CELLS} cells"
                ))
            })?;

        let cell_width = width / grid_size;
        let cell_height = height / grid_size;

        let mut cells = Vec::with_capacity(count);
        for y in 0..grid_size {
            for x in 0..grid_size {
                cells.push(GridCell::new(
                    (x * cell_width) as f64,
                    ((x + 1) * cell_width) as f64,
                    (y * cell_height) as f64,
                    ((y + 1) * cell_height) as f64,
                ));
            }
        }

        tracing::debug!(
            "Partitioned {width}x{height} image into {} cells of {cell_width}x{cell_height}",
            cells.len()
        );

        Ok(Self {
            width,
            height,
            grid_size,
            cells,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn grid_size(&self) -> u32 {
        self.grid_size
    }

    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    /// Number of cells, always `grid_size²`.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Index of the first cell (in partition order) strictly containing the point.
    pub fn locate(&self, x: f64, y: f64) -> Option<usize> {
        self.cells.iter().position(|cell| cell.is_point_inside(x, y))
    }
}

/// Shorthand for [`GridPartition::new`].
pub fn partition(width: u32, height: u32, grid_size: u32) -> GridResult<GridPartition> {
    GridPartition::new(width, height, grid_size)
}

/// Flag every cell that contains the center of at least one detected object.
///
/// Boxes are scaled by the partition's image size. Each object marks only
/// the first cell containing its center. Centers that fall on a cell
/// boundary, in the uncovered sliver, or that are NaN mark nothing.
pub fn map_objects_to_cells(objects: &[DetectedObject], partition: &GridPartition) -> MatchVector {
    let mut matches = MatchVector::all_false(partition.len());
    let width = partition.width() as f64;
    let height = partition.height() as f64;

    for (object_index, object) in objects.iter().enumerate() {
        let (cx, cy) = object.to_cell(width, height).center();
        match partition.locate(cx, cy) {
            Some(cell_index) => {
                tracing::debug!("Object {object_index} center ({cx}, {cy}) -> cell {cell_index}");
                matches.set(cell_index);
            }
            None => {
                tracing::debug!("Object {object_index} center ({cx}, {cy}) matched no cell");
            }
        }
    }

    matches
}

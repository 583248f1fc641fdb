use crate::{error::ClusterError, primitives::Scalar};

/// Position of a single cell within a [`Grid`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coordinate {
    pub row: usize,
    pub col: usize,
}
impl Coordinate {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}
impl From<(usize, usize)> for Coordinate {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

/// Owned, rectangular `height x width` grid of scalar values.
///
/// Values are stored row-major: `[<row0>,<row1>,<row2>,...]`. A grid always contains at least
/// one cell, constructors reject empty and ragged inputs.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid<T: Scalar> {
    height: usize,
    width: usize,
    cells: Vec<T>,
}
impl<T: Scalar> Grid<T> {
    /// Create a grid from a vector of rows.
    ///
    /// ## Arguments
    /// - **rows**: Vector of rows, each containing **width** values
    /// - **height**: Amount of rows the grid is expected to have
    /// - **width**: Amount of values each row is expected to have
    ///
    /// ## Errors
    /// [`ClusterError::InvalidDimensions`] if the grid is empty, or its shape differs from `height x width`.
    pub fn from_rows(rows: Vec<Vec<T>>, height: usize, width: usize) -> Result<Self, ClusterError> {
        check_not_empty(height, width)?;
        if rows.len() != height {
            return Err(ClusterError::InvalidDimensions(format!(
                "Expected {} rows, got {}",
                height,
                rows.len()
            )));
        }
        if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(ClusterError::InvalidDimensions(format!(
                "Expected {} values in row {}, got {}",
                width,
                row,
                r.len()
            )));
        }

        Ok(Self {
            height,
            width,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    /// Create a grid from a row-major vector of `height * width` values.
    ///
    /// ## Errors
    /// [`ClusterError::InvalidDimensions`] if the grid is empty, or **cells** does not contain
    /// exactly `height * width` values.
    pub fn from_vec(cells: Vec<T>, height: usize, width: usize) -> Result<Self, ClusterError> {
        check_not_empty(height, width)?;
        let len = height.checked_mul(width).ok_or_else(|| {
            ClusterError::InvalidDimensions(format!("A {}x{} grid is too large", height, width))
        })?;
        if cells.len() != len {
            return Err(ClusterError::InvalidDimensions(format!(
                "Expected {} values for a {}x{} grid, got {}",
                len,
                height,
                width,
                cells.len()
            )));
        }
        Ok(Self { height, width, cells })
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Amount of cells (`height * width`).
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Row-major view onto all values.
    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    /// Value at the given coordinate, `None` if it lies outside of the grid.
    pub fn get(&self, coord: Coordinate) -> Option<T> {
        if coord.row < self.height && coord.col < self.width {
            Some(self.cells[self.index(coord)])
        } else {
            None
        }
    }

    /// All coordinates of this grid, in row-major order.
    pub fn coordinates(&self) -> impl Iterator<Item = Coordinate> {
        let width = self.width;
        (0..self.height).flat_map(move |row| (0..width).map(move |col| Coordinate { row, col }))
    }

    /// All `(coordinate, value)` pairs of this grid, in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coordinate, T)> + '_ {
        self.coordinates().zip(self.cells.iter().cloned())
    }

    /// Smallest value of the grid (full scan).
    pub fn min_value(&self) -> Option<T> {
        let mut values = self.cells.iter().cloned();
        let first = values.next()?;
        Some(values.fold(first, |min, v| if v < min { v } else { min }))
    }

    /// Biggest value of the grid (full scan).
    pub fn max_value(&self) -> Option<T> {
        let mut values = self.cells.iter().cloned();
        let first = values.next()?;
        Some(values.fold(first, |max, v| if v > max { v } else { max }))
    }

    #[inline(always)]
    pub(crate) fn index(&self, coord: Coordinate) -> usize {
        coord.row * self.width + coord.col
    }

    #[inline(always)]
    pub(crate) fn coordinate(&self, index: usize) -> Coordinate {
        Coordinate { row: index / self.width, col: index % self.width }
    }
}

fn check_not_empty(height: usize, width: usize) -> Result<(), ClusterError> {
    if height == 0 || width == 0 {
        return Err(ClusterError::InvalidDimensions(format!(
            "Grid has to contain at least one cell, got {}x{}",
            height, width
        )));
    }
    Ok(())
}

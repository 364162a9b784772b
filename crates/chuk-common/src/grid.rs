//! N-dimensional grids stored in row-major order.
//!
//! CHUK variables have leading spatial axes `(y, x)` and may carry extra
//! axes (typically `time`). Values are kept in a flat `Vec` with the last
//! axis varying fastest, which is how NetCDF hands them back.

use std::ops::Not;

use serde::{Deserialize, Serialize};

use crate::error::{ChukError, ChukResult};

/// A dense grid of values with an arbitrary number of dimensions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid<T> {
    shape: Vec<usize>,
    data: Vec<T>,
}

/// Boolean grid produced by mask evaluation.
pub type BoolGrid = Grid<bool>;

impl<T> Grid<T> {
    /// Create a grid from a shape and row-major data.
    pub fn new(shape: Vec<usize>, data: Vec<T>) -> ChukResult<Self> {
        let expected = cell_count(&shape);
        if data.len() != expected {
            return Err(ChukError::DataLength {
                shape,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { shape, data })
    }

    /// Create a 2D grid from rows. All rows must have the same length.
    pub fn from_rows(rows: Vec<Vec<T>>) -> ChukResult<Self> {
        let ny = rows.len();
        let nx = rows.first().map(|r| r.len()).unwrap_or(0);
        let mut data = Vec::with_capacity(ny * nx);
        for row in rows {
            if row.len() != nx {
                return Err(ChukError::ShapeMismatch {
                    expected: vec![nx],
                    actual: vec![row.len()],
                });
            }
            data.extend(row);
        }
        Self::new(vec![ny, nx], data)
    }

    /// Size of each dimension.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Number of dimensions.
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Total number of cells (product of every dimension size).
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if grid has no cells.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Row-major cell values.
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Consume the grid, returning its row-major values.
    pub fn into_data(self) -> Vec<T> {
        self.data
    }

    /// Get the flat index for a multi-dimensional index.
    pub fn flat_index(&self, index: &[usize]) -> Option<usize> {
        if index.len() != self.shape.len() {
            return None;
        }
        let mut flat = 0;
        for (&i, &n) in index.iter().zip(&self.shape) {
            if i >= n {
                return None;
            }
            flat = flat * n + i;
        }
        Some(flat)
    }

    /// Get the value at a multi-dimensional index.
    pub fn get(&self, index: &[usize]) -> Option<&T> {
        self.flat_index(index).map(|i| &self.data[i])
    }

    /// Apply a function to every cell, keeping the shape.
    pub fn map<U, F>(&self, f: F) -> Grid<U>
    where
        F: FnMut(&T) -> U,
    {
        Grid {
            shape: self.shape.clone(),
            data: self.data.iter().map(f).collect(),
        }
    }

    /// Check that another grid has the same shape as this one.
    pub fn ensure_same_shape<U>(&self, other: &Grid<U>) -> ChukResult<()> {
        if self.shape != other.shape {
            return Err(ChukError::ShapeMismatch {
                expected: self.shape.clone(),
                actual: other.shape.clone(),
            });
        }
        Ok(())
    }
}

impl<T: Clone> Grid<T> {
    /// Create a grid with every cell set to `value`.
    pub fn filled(shape: Vec<usize>, value: T) -> Self {
        let n = cell_count(&shape);
        Self {
            shape,
            data: vec![value; n],
        }
    }
}

impl BoolGrid {
    /// Number of `true` cells.
    pub fn count_true(&self) -> usize {
        self.data.iter().filter(|&&v| v).count()
    }

    /// Elementwise logical AND with another grid of the same shape.
    pub fn try_and(&self, other: &BoolGrid) -> ChukResult<BoolGrid> {
        self.zip_with(other, |a, b| a && b)
    }

    /// Elementwise logical OR with another grid of the same shape.
    pub fn try_or(&self, other: &BoolGrid) -> ChukResult<BoolGrid> {
        self.zip_with(other, |a, b| a || b)
    }

    fn zip_with<F>(&self, other: &BoolGrid, f: F) -> ChukResult<BoolGrid>
    where
        F: Fn(bool, bool) -> bool,
    {
        self.ensure_same_shape(other)?;
        Ok(Grid {
            shape: self.shape.clone(),
            data: self
                .data
                .iter()
                .zip(&other.data)
                .map(|(&a, &b)| f(a, b))
                .collect(),
        })
    }
}

/// Elementwise logical complement.
impl Not for &BoolGrid {
    type Output = BoolGrid;

    fn not(self) -> BoolGrid {
        self.map(|&v| !v)
    }
}

/// Product of all dimension sizes.
pub fn cell_count(shape: &[usize]) -> usize {
    shape.iter().product()
}

//! Grid structure: which cells can hold letters.

use std::str::FromStr;

use crate::{Direction, Variable};

/// Character marking an open cell in the structure text format.
pub const OPEN_CELL: char = '_';

/// Errors returned when parsing a [`Structure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum StructureError {
    /// The text contains no rows.
    #[display("structure has no rows")]
    Empty,
}

/// The shape of a crossword: a `width x height` grid of open and blocked cells.
///
/// # Text format
///
/// One line per row. [`OPEN_CELL`] (`_`) marks a cell that takes a letter;
/// any other character blocks the cell. Rows shorter than the longest one are
/// padded with blocked cells.
///
/// # Examples
///
/// ```
/// use crossfill_core::{Direction, Structure, Variable};
///
/// let structure: Structure = "#___#\n#_##_\n#_##_\n#_##_\n#____".parse()?;
/// assert_eq!((structure.width(), structure.height()), (5, 5));
///
/// let variables = structure.variables();
/// assert_eq!(variables.len(), 4);
/// assert!(variables.contains(&Variable::new(0, 1, Direction::Down, 5)));
/// # Ok::<(), crossfill_core::StructureError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Structure {
    width: usize,
    height: usize,
    open: Vec<bool>,
}

impl Structure {
    /// Creates a structure from rows of open (`true`) / blocked (`false`) flags.
    ///
    /// Short rows are padded with blocked cells.
    #[must_use]
    pub fn from_rows<R>(rows: &[R]) -> Self
    where
        R: AsRef<[bool]>,
    {
        let height = rows.len();
        let width = rows.iter().map(|row| row.as_ref().len()).max().unwrap_or(0);
        let mut open = vec![false; width * height];
        for (i, row) in rows.iter().enumerate() {
            for (j, &cell) in row.as_ref().iter().enumerate() {
                open[i * width + j] = cell;
            }
        }
        Self {
            width,
            height,
            open,
        }
    }

    /// Number of columns.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns `true` if the cell exists and takes a letter.
    #[must_use]
    pub fn is_open(&self, row: usize, col: usize) -> bool {
        row < self.height && col < self.width && self.open[row * self.width + col]
    }

    /// Extracts every slot of the grid.
    ///
    /// A slot is a maximal horizontal or vertical run of open cells that is at
    /// least two cells long. Slots are returned in row-major order of their
    /// first cell, with the across slot before the down slot when both start in
    /// the same cell.
    #[must_use]
    pub fn variables(&self) -> Vec<Variable> {
        let mut variables = vec![];
        for row in 0..self.height {
            for col in 0..self.width {
                if !self.is_open(row, col) {
                    continue;
                }
                for direction in Direction::ALL {
                    let (dr, dc) = direction.step();
                    // only start a run at its first cell
                    if row >= dr && col >= dc && self.is_open(row - dr, col - dc) {
                        continue;
                    }
                    let length = (0..)
                        .take_while(|&k| self.is_open(row + dr * k, col + dc * k))
                        .count();
                    if length > 1 {
                        variables.push(Variable::new(row, col, direction, length));
                    }
                }
            }
        }
        variables
    }
}

impl FromStr for Structure {
    type Err = StructureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows = s
            .lines()
            .map(|line| line.chars().map(|c| c == OPEN_CELL).collect::<Vec<_>>())
            .collect::<Vec<_>>();
        if rows.is_empty() {
            return Err(StructureError::Empty);
        }
        Ok(Self::from_rows(&rows))
    }
}

//! Crossword slots.

use std::iter::FusedIterator;

/// Orientation of a slot in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
pub enum Direction {
    /// Left to right along a row.
    #[display("across")]
    Across,
    /// Top to bottom along a column.
    #[display("down")]
    Down,
}

impl Direction {
    /// Both directions, across first.
    pub const ALL: [Self; 2] = [Self::Across, Self::Down];

    /// Returns the `(row, col)` step taken from one letter to the next.
    #[must_use]
    pub const fn step(self) -> (usize, usize) {
        match self {
            Self::Across => (0, 1),
            Self::Down => (1, 0),
        }
    }
}

/// A fillable slot: a run of open cells that must hold exactly one word.
///
/// Variables are plain values. Two variables are equal when their position,
/// direction and length all match, so a slot rebuilt from the same geometry
/// refers to the same variable.
///
/// # Examples
///
/// ```
/// use crossfill_core::{Direction, Variable};
///
/// let var = Variable::new(1, 2, Direction::Down, 3);
/// let cells = var.cells().collect::<Vec<_>>();
/// assert_eq!(cells, [(1, 2), (2, 2), (3, 2)]);
/// assert_eq!(var.to_string(), "(1, 2) down : 3");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
#[display("({row}, {col}) {direction} : {length}")]
pub struct Variable {
    row: usize,
    col: usize,
    direction: Direction,
    length: usize,
}

impl Variable {
    /// Creates a variable starting at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if `length` is zero.
    #[must_use]
    pub const fn new(row: usize, col: usize, direction: Direction, length: usize) -> Self {
        assert!(length > 0, "variable length must be positive");
        Self {
            row,
            col,
            direction,
            length,
        }
    }

    /// Row of the first letter.
    #[must_use]
    pub const fn row(&self) -> usize {
        self.row
    }

    /// Column of the first letter.
    #[must_use]
    pub const fn col(&self) -> usize {
        self.col
    }

    /// Orientation of the slot.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Number of letters the slot holds.
    #[must_use]
    pub const fn length(&self) -> usize {
        self.length
    }

    /// Returns the cell holding the letter at `offset`.
    ///
    /// # Panics
    ///
    /// Panics if `offset` is not smaller than the variable length.
    #[must_use]
    pub const fn cell(&self, offset: usize) -> (usize, usize) {
        assert!(offset < self.length);
        let (dr, dc) = self.direction.step();
        (self.row + dr * offset, self.col + dc * offset)
    }

    /// Returns the offset of `cell` within this slot, if the slot covers it.
    #[must_use]
    pub fn offset_of(&self, (row, col): (usize, usize)) -> Option<usize> {
        let offset = match self.direction {
            Direction::Across if row == self.row && col >= self.col => col - self.col,
            Direction::Down if col == self.col && row >= self.row => row - self.row,
            _ => return None,
        };
        (offset < self.length).then_some(offset)
    }

    /// Returns an iterator over the cells covered by the slot, first letter first.
    #[must_use]
    pub fn cells(&self) -> Cells {
        Cells {
            variable: *self,
            front: 0,
        }
    }
}

/// Iterator over the cells of a [`Variable`].
///
/// Created by [`Variable::cells`].
#[derive(Debug, Clone)]
pub struct Cells {
    variable: Variable,
    front: usize,
}

impl Iterator for Cells {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.variable.length {
            return None;
        }
        let cell = self.variable.cell(self.front);
        self.front += 1;
        Some(cell)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.variable.length - self.front;
        (len, Some(len))
    }
}

impl ExactSizeIterator for Cells {}
impl FusedIterator for Cells {}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_equality_is_structural() {
        let a = Variable::new(0, 1, Direction::Across, 3);
        let b = Variable::new(0, 1, Direction::Across, 3);
        assert_eq!(a, b);
        assert_ne!(a, Variable::new(0, 1, Direction::Down, 3));
        assert_ne!(a, Variable::new(0, 1, Direction::Across, 4));

        let set = HashSet::from([a]);
        assert!(set.contains(&b));
    }

    #[test]
    fn test_cells() {
        let across = Variable::new(2, 1, Direction::Across, 3);
        assert_eq!(across.cells().collect::<Vec<_>>(), [(2, 1), (2, 2), (2, 3)]);
        assert_eq!(across.cells().len(), 3);

        let down = Variable::new(0, 4, Direction::Down, 2);
        assert_eq!(down.cells().collect::<Vec<_>>(), [(0, 4), (1, 4)]);
    }

    #[test]
    fn test_offset_of() {
        let across = Variable::new(2, 1, Direction::Across, 3);
        assert_eq!(across.offset_of((2, 1)), Some(0));
        assert_eq!(across.offset_of((2, 3)), Some(2));
        assert_eq!(across.offset_of((2, 4)), None);
        assert_eq!(across.offset_of((2, 0)), None);
        assert_eq!(across.offset_of((1, 2)), None);

        let down = Variable::new(0, 4, Direction::Down, 2);
        assert_eq!(down.offset_of((1, 4)), Some(1));
        assert_eq!(down.offset_of((2, 4)), None);
    }

    #[test]
    fn test_ordering_is_row_major() {
        let mut vars = vec![
            Variable::new(1, 0, Direction::Across, 3),
            Variable::new(0, 2, Direction::Down, 3),
            Variable::new(0, 2, Direction::Across, 2),
        ];
        vars.sort();
        assert_eq!(
            vars,
            [
                Variable::new(0, 2, Direction::Across, 2),
                Variable::new(0, 2, Direction::Down, 3),
                Variable::new(1, 0, Direction::Across, 3),
            ]
        );
    }

    #[test]
    #[should_panic(expected = "variable length must be positive")]
    fn test_zero_length_panics() {
        let _ = Variable::new(0, 0, Direction::Across, 0);
    }
}

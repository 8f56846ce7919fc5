//! Text rendering of a (partially) filled crossword.

use std::fmt::{self, Display};

use crate::{Structure, Variable};

/// Character printed for blocked cells.
pub const BLOCK: char = '█';

/// Letters placed on a crossword grid.
///
/// Open cells with no letter render as a space and blocked cells as
/// [`BLOCK`]. Each row ends with a newline.
///
/// # Examples
///
/// ```
/// use crossfill_core::{Direction, LetterGrid, Structure, Variable};
///
/// let structure: Structure = "#_#\n___".parse()?;
/// let mut grid = LetterGrid::new(&structure);
/// grid.place(&Variable::new(1, 0, Direction::Across, 3), "CAT");
/// assert_eq!(grid.to_string(), "█ █\nCAT\n");
/// # Ok::<(), crossfill_core::StructureError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LetterGrid {
    width: usize,
    cells: Vec<Option<Cell>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cell {
    Empty,
    Letter(char),
}

impl LetterGrid {
    /// Creates an empty grid with the shape of `structure`.
    #[must_use]
    pub fn new(structure: &Structure) -> Self {
        let width = structure.width();
        let cells = (0..structure.height())
            .flat_map(|row| (0..width).map(move |col| (row, col)))
            .map(|(row, col)| structure.is_open(row, col).then_some(Cell::Empty))
            .collect();
        Self { width, cells }
    }

    /// Builds a grid from `(slot, word)` pairs.
    #[must_use]
    pub fn filled<'a, I>(structure: &Structure, words: I) -> Self
    where
        I: IntoIterator<Item = (&'a Variable, &'a str)>,
    {
        let mut grid = Self::new(structure);
        for (variable, word) in words {
            grid.place(variable, word);
        }
        grid
    }

    /// Writes `word` into the cells of `variable`.
    ///
    /// Letters beyond the slot length and cells outside the grid or blocked
    /// are ignored.
    pub fn place(&mut self, variable: &Variable, word: &str) {
        for ((row, col), letter) in variable.cells().zip(word.chars()) {
            if col >= self.width {
                continue;
            }
            if let Some(Some(cell)) = self.cells.get_mut(row * self.width + col) {
                *cell = Cell::Letter(letter);
            }
        }
    }

    /// Returns the letter at `(row, col)`, if one was placed.
    #[must_use]
    pub fn letter(&self, row: usize, col: usize) -> Option<char> {
        if col >= self.width {
            return None;
        }
        match self.cells.get(row * self.width + col) {
            Some(Some(Cell::Letter(c))) => Some(*c),
            _ => None,
        }
    }
}

impl Display for LetterGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.width == 0 {
            return Ok(());
        }
        for row in self.cells.chunks(self.width) {
            for cell in row {
                let c = match cell {
                    None => BLOCK,
                    Some(Cell::Empty) => ' ',
                    Some(Cell::Letter(c)) => *c,
                };
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

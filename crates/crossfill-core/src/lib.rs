//! Puzzle description for crossword filling.
//!
//! This crate describes *what* has to be filled; solving lives in
//! `crossfill-solver`.
//!
//! # Overview
//!
//! - [`Structure`]: the grid shape, parsed from text (`_` is an open cell).
//! - [`Variable`]: a slot, identified by position, [`Direction`] and length.
//! - [`Vocabulary`]: the de-duplicated candidate words, addressed by [`WordId`].
//! - [`Crossword`]: slots, [`Overlap`]s between crossing slots and neighbor
//!   lists, addressed by [`VariableId`].
//! - [`LetterGrid`]: renders placed words as text.
//!
//! # Examples
//!
//! ```
//! use crossfill_core::{Crossword, Structure, Vocabulary};
//!
//! let structure: Structure = "#___#\n#_##_\n#_##_\n#_##_\n#____".parse()?;
//! let vocabulary = Vocabulary::parse("one\ntwo\nsix\nseven\nfive\nnine\n");
//! let crossword = Crossword::new(structure, vocabulary);
//!
//! assert_eq!(crossword.variables().len(), 4);
//! assert_eq!(crossword.vocabulary().len(), 6);
//! # Ok::<(), crossfill_core::StructureError>(())
//! ```

pub use self::{
    crossword::{Crossword, Overlap, VariableId},
    letter_grid::{BLOCK, LetterGrid},
    structure::{OPEN_CELL, Structure, StructureError},
    variable::{Cells, Direction, Variable},
    vocabulary::{Vocabulary, WordId},
};

mod crossword;
mod letter_grid;
mod structure;
mod variable;
mod vocabulary;

//! The puzzle description: slots, their crossings and the vocabulary.

use std::collections::HashMap;

use crate::{Structure, Variable, Vocabulary};

/// Dense index of a [`Variable`] within a [`Crossword`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
#[display("v{_0}")]
pub struct VariableId(usize);

impl VariableId {
    /// Returns the position of the variable in [`Crossword::variables`].
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Character offsets at which two crossing slots share a cell.
///
/// For the ordered pair `(x, y)`, `x_offset` indexes the word in `x` and
/// `y_offset` the word in `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Overlap {
    /// Offset of the shared cell in the first slot.
    pub x_offset: usize,
    /// Offset of the shared cell in the second slot.
    pub y_offset: usize,
}

impl Overlap {
    /// Creates an overlap from the two offsets.
    #[must_use]
    pub const fn new(x_offset: usize, y_offset: usize) -> Self {
        Self { x_offset, y_offset }
    }

    /// Returns the same overlap seen from the other slot.
    #[must_use]
    pub const fn reversed(self) -> Self {
        Self::new(self.y_offset, self.x_offset)
    }

    /// Returns `true` if the two words agree on the shared letter.
    ///
    /// Words too short to reach the shared cell never agree.
    #[must_use]
    pub fn agrees(self, x_letters: &[char], y_letters: &[char]) -> bool {
        match (x_letters.get(self.x_offset), y_letters.get(self.y_offset)) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

/// A crossword puzzle ready to be solved.
///
/// Holds the [`Structure`], the slots extracted from it, the overlap relation
/// between every pair of crossing slots, the derived neighbor lists and the
/// [`Vocabulary`]. Everything is computed once at construction and is
/// read-only afterwards.
///
/// # Examples
///
/// ```
/// use crossfill_core::{Crossword, Direction, Overlap, Structure, Variable, Vocabulary};
///
/// let structure: Structure = "#_#\n___\n#_#".parse()?;
/// let crossword = Crossword::new(structure, Vocabulary::new(["CAT", "CAR", "DOG"]));
///
/// let down = crossword.id_of(&Variable::new(0, 1, Direction::Down, 3)).unwrap();
/// let across = crossword.id_of(&Variable::new(1, 0, Direction::Across, 3)).unwrap();
/// assert_eq!(crossword.overlap(down, across), Some(Overlap::new(1, 1)));
/// assert_eq!(crossword.neighbors(down), [across]);
/// # Ok::<(), crossfill_core::StructureError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Crossword {
    structure: Structure,
    variables: Vec<Variable>,
    ids: HashMap<Variable, VariableId>,
    overlaps: HashMap<(VariableId, VariableId), Overlap>,
    neighbors: Vec<Vec<VariableId>>,
    vocabulary: Vocabulary,
}

impl Crossword {
    /// Builds the puzzle description from a structure and a vocabulary.
    ///
    /// Variables are numbered in the order returned by
    /// [`Structure::variables`].
    #[must_use]
    pub fn new(structure: Structure, vocabulary: Vocabulary) -> Self {
        let variables = structure.variables();
        let ids = variables
            .iter()
            .enumerate()
            .map(|(i, var)| (*var, VariableId(i)))
            .collect::<HashMap<_, _>>();

        // two slots of different directions share at most one cell
        let mut owners: HashMap<(usize, usize), Vec<(VariableId, usize)>> = HashMap::new();
        for (i, var) in variables.iter().enumerate() {
            for (offset, cell) in var.cells().enumerate() {
                owners.entry(cell).or_default().push((VariableId(i), offset));
            }
        }
        let mut overlaps = HashMap::new();
        let mut neighbors = vec![vec![]; variables.len()];
        for slots in owners.values() {
            for &(x, x_offset) in slots {
                for &(y, y_offset) in slots {
                    if x != y {
                        overlaps.insert((x, y), Overlap::new(x_offset, y_offset));
                        neighbors[x.0].push(y);
                    }
                }
            }
        }
        for list in &mut neighbors {
            list.sort_unstable();
            list.dedup();
        }

        Self {
            structure,
            variables,
            ids,
            overlaps,
            neighbors,
            vocabulary,
        }
    }

    /// The grid shape.
    #[must_use]
    pub fn structure(&self) -> &Structure {
        &self.structure
    }

    /// The candidate words.
    #[must_use]
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// All slots, indexed by [`VariableId`].
    #[must_use]
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// Returns all variable ids in order.
    pub fn ids(&self) -> impl ExactSizeIterator<Item = VariableId> + Clone + use<> {
        (0..self.variables.len()).map(VariableId)
    }

    /// Returns the slot with the given id.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this crossword.
    #[must_use]
    pub fn variable(&self, id: VariableId) -> Variable {
        self.variables[id.0]
    }

    /// Resolves a slot to its id, or `None` if the crossword has no such slot.
    #[must_use]
    pub fn id_of(&self, variable: &Variable) -> Option<VariableId> {
        self.ids.get(variable).copied()
    }

    /// Returns where `x` and `y` cross, or `None` if they do not.
    #[must_use]
    pub fn overlap(&self, x: VariableId, y: VariableId) -> Option<Overlap> {
        self.overlaps.get(&(x, y)).copied()
    }

    /// Returns the slots crossing `id`, in id order.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this crossword.
    #[must_use]
    pub fn neighbors(&self, id: VariableId) -> &[VariableId] {
        &self.neighbors[id.0]
    }

    /// Number of slots crossing `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this crossword.
    #[must_use]
    pub fn degree(&self, id: VariableId) -> usize {
        self.neighbors[id.0].len()
    }
}

use super::{BoxedPropagator, Propagation, Propagator};
use crate::{DomainStore, SolverError};

const NAME: &str = "node consistency";

/// Removes every candidate whose length differs from its slot's length.
///
/// A single pass is enough: the constraint involves one variable only.
///
/// # Examples
///
/// ```
/// use crossfill_core::{Crossword, Vocabulary};
/// use crossfill_solver::{DomainStore, consistency::{NodeConsistency, Propagator}};
///
/// let crossword = Crossword::new("____".parse()?, Vocabulary::new(["WORD", "CAT"]));
/// let mut store = DomainStore::new(&crossword);
///
/// let propagation = NodeConsistency::new().apply(&mut store)?;
/// assert_eq!(propagation.removed(), 1);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct NodeConsistency;

impl NodeConsistency {
    /// Creates a new `NodeConsistency` propagator.
    #[must_use]
    pub const fn new() -> Self {
        NodeConsistency
    }
}

impl Propagator for NodeConsistency {
    fn name(&self) -> &'static str {
        NAME
    }

    fn clone_box(&self) -> BoxedPropagator {
        Box::new(*self)
    }

    fn apply(&self, store: &mut DomainStore<'_>) -> Result<Propagation, SolverError> {
        Ok(enforce_node_consistency(store))
    }
}

/// Makes every domain node consistent.
///
/// Returns [`Propagation::Wipeout`] for the first variable (in id order) left
/// without candidates; every variable is still filtered.
pub fn enforce_node_consistency(store: &mut DomainStore<'_>) -> Propagation {
    let crossword = store.crossword();
    let vocabulary = crossword.vocabulary();

    let mut removed = 0;
    let mut wipeout = None;
    for var in crossword.ids() {
        let length = crossword.variable(var).length();
        let mismatched = store
            .candidates(var)
            .iter()
            .copied()
            .filter(|&word| vocabulary.word_len(word) != length)
            .collect::<Vec<_>>();
        for &word in &mismatched {
            store.remove(var, word);
        }
        removed += mismatched.len();
        if wipeout.is_none() && store.size(var) == 0 {
            wipeout = Some(crossword.variable(var));
        }
    }

    match wipeout {
        Some(variable) => Propagation::Wipeout { variable },
        None => Propagation::from_removed(removed),
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::testing;

    #[test]
    fn test_keeps_only_matching_lengths() {
        let crossword = testing::crossword(testing::STRUCTURE0, testing::WORDS0.lines());
        let mut store = DomainStore::new(&crossword);
        enforce_node_consistency(&mut store);

        for var in crossword.ids() {
            let length = crossword.variable(var).length();
            assert!(store.size(var) > 0);
            assert!(store.words(var).all(|word| word.chars().count() == length));
        }
        let top = crossword.ids().next().unwrap();
        let mut words = store.words(top).collect::<Vec<_>>();
        words.sort_unstable();
        assert_eq!(words, ["ONE", "SIX", "TEN", "TWO"]);
    }

    #[test]
    fn test_is_idempotent() {
        let crossword = testing::crossword(testing::STRUCTURE0, testing::WORDS0.lines());
        let mut store = DomainStore::new(&crossword);
        assert!(enforce_node_consistency(&mut store).is_narrowed());
        let after = testing::snapshot(&store);
        assert_eq!(enforce_node_consistency(&mut store), Propagation::Unchanged);
        assert_eq!(testing::snapshot(&store), after);
    }

    #[test]
    fn test_wipeout_names_first_empty_variable() {
        // across slot of length 2, down slot of length 3
        let crossword = testing::crossword("__\n_#\n_#", ["AB"]);
        let mut store = DomainStore::new(&crossword);
        let down = crossword
            .variables()
            .iter()
            .copied()
            .find(|variable| variable.length() == 3)
            .unwrap();
        assert_eq!(
            enforce_node_consistency(&mut store),
            Propagation::Wipeout { variable: down }
        );
        // the across slot is still filtered
        let across = crossword.ids().find(|&var| crossword.variable(var) != down).unwrap();
        assert_eq!(store.size(across), 1);
    }

    #[test]
    fn test_counts_multibyte_letters() {
        let crossword = testing::crossword("___", ["ÅÄÖ", "AB"]);
        let mut store = DomainStore::new(&crossword);
        let var = crossword.ids().next().unwrap();
        assert_eq!(enforce_node_consistency(&mut store).removed(), 1);
        assert_eq!(store.words(var).collect::<Vec<_>>(), ["ÅÄÖ"]);
    }

    proptest! {
        #[test]
        fn test_idempotent_on_mixed_lengths(
            words in prop::collection::vec(proptest::string::string_regex("[A-C]{1,5}").unwrap(), 0..24),
        ) {
            let crossword = testing::crossword(testing::STRUCTURE0, &words);
            let mut store = DomainStore::new(&crossword);
            let first = enforce_node_consistency(&mut store);
            let after = testing::snapshot(&store);

            let second = enforce_node_consistency(&mut store);
            prop_assert_eq!(testing::snapshot(&store), after);
            if first.is_wipeout() {
                prop_assert_eq!(second, first);
            } else {
                prop_assert_eq!(second, Propagation::Unchanged);
            }
        }
    }
}

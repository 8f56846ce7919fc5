//! Candidate words.

use std::collections::{BTreeSet, HashMap};

/// Stable index of a word in a [`Vocabulary`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
#[display("#{_0}")]
pub struct WordId(u32);

impl WordId {
    /// Returns the position of the word in its vocabulary.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// The set of words a crossword may be filled with.
///
/// Words are de-duplicated and kept in sorted order, so a [`WordId`] is stable
/// for a given set of words. Letters are compared as `char`s; the vocabulary
/// does not change case, callers normalize before building it (or use
/// [`Vocabulary::parse`], which upper-cases).
///
/// # Examples
///
/// ```
/// use crossfill_core::Vocabulary;
///
/// let vocabulary = Vocabulary::parse("dog\ncat\n\nCat\n");
/// assert_eq!(vocabulary.len(), 2);
///
/// let cat = vocabulary.id_of("CAT").unwrap();
/// assert_eq!(vocabulary.word(cat), "CAT");
/// assert_eq!(vocabulary.letters(cat), ['C', 'A', 'T']);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    words: Vec<Box<str>>,
    letters: Vec<Box<[char]>>,
    ids: HashMap<Box<str>, WordId>,
}

impl Vocabulary {
    /// Builds a vocabulary from words taken verbatim.
    ///
    /// Empty words are dropped.
    ///
    /// # Panics
    ///
    /// Panics if there are more than `u32::MAX` distinct words.
    #[must_use]
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .filter(|word| !word.as_ref().is_empty())
            .map(|word| Box::<str>::from(word.as_ref()))
            .collect::<BTreeSet<_>>();

        let words = words.into_iter().collect::<Vec<_>>();
        let letters = words
            .iter()
            .map(|word| word.chars().collect::<Box<[_]>>())
            .collect();
        let ids = words
            .iter()
            .enumerate()
            .map(|(i, word)| {
                let id = u32::try_from(i).expect("vocabulary too large");
                (word.clone(), WordId(id))
            })
            .collect();
        Self {
            words,
            letters,
            ids,
        }
    }

    /// Parses a word list: one word per line.
    ///
    /// Surrounding whitespace is trimmed, blank lines are skipped and every
    /// word is upper-cased.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        Self::new(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_uppercase),
        )
    }

    /// Number of distinct words.
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns `true` if the vocabulary has no words.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Returns the word with the given id.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this vocabulary.
    #[must_use]
    pub fn word(&self, id: WordId) -> &str {
        &self.words[id.index()]
    }

    /// Returns the letters of the word with the given id.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this vocabulary.
    #[must_use]
    pub fn letters(&self, id: WordId) -> &[char] {
        &self.letters[id.index()]
    }

    /// Number of letters (not bytes) in the word.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this vocabulary.
    #[must_use]
    pub fn word_len(&self, id: WordId) -> usize {
        self.letters[id.index()].len()
    }

    /// Looks a word up by its text.
    #[must_use]
    pub fn id_of(&self, word: &str) -> Option<WordId> {
        self.ids.get(word).copied()
    }

    /// Returns all word ids in vocabulary order.
    // `new` guarantees every index fits in a `u32`
    #[allow(clippy::cast_possible_truncation)]
    pub fn ids(&self) -> impl ExactSizeIterator<Item = WordId> + Clone + use<> {
        (0..self.words.len()).map(|i| WordId(i as u32))
    }

    /// Returns `(id, word)` pairs in vocabulary order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (WordId, &str)> {
        self.ids().zip(self.words.iter().map(|word| &**word))
    }
}

use alloc::string::String;
use hashbrown::HashMap;

/// Word validity and scoring capability consulted by the engine.
///
/// Lookups are case-insensitive; the engine always asks with lowercase words.
pub trait WordOracle {
    fn is_valid(&self, word: &str) -> bool;

    fn base_score(&self, word: &str) -> u32;

    /// Candidate words to seed a new grid with.
    fn seed_words(&self) -> impl Iterator<Item = &str>;
}

/// Score of a word that was not given one explicitly: ten points per letter past the second, at least ten.
pub fn length_score(word: &str) -> u32 {
    let letters = word.chars().count().saturating_sub(2).max(1);
    u32::try_from(letters).unwrap_or(u32::MAX).saturating_mul(10)
}

/// In-memory word list.
#[derive(Clone, Debug, Default)]
pub struct WordList {
    words: HashMap<String, u32>,
}

impl WordList {
    /// Builds a list where every word is scored with [`length_score`].
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::with_scores(words.into_iter().map(|word| {
            let score = length_score(word.as_ref().trim());
            (word, score)
        }))
    }

    pub fn with_scores<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, u32)>,
        S: AsRef<str>,
    {
        let words = entries
            .into_iter()
            .map(|(word, score)| (word.as_ref().trim().to_lowercase(), score))
            .filter(|(word, _)| !word.is_empty())
            .collect();
        Self { words }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl WordOracle for WordList {
    fn is_valid(&self, word: &str) -> bool {
        self.words.contains_key(word.to_lowercase().as_str())
    }

    fn base_score(&self, word: &str) -> u32 {
        self.words
            .get(word.to_lowercase().as_str())
            .copied()
            .unwrap_or(0)
    }

    fn seed_words(&self) -> impl Iterator<Item = &str> {
        self.words.keys().map(String::as_str)
    }
}

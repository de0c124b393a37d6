//! In-memory word-embedding table.
//!
//! A dense row-major `f32` matrix with an insertion-ordered word index on
//! top. Insertion order is load order, and every downstream tie-break in the
//! engine falls back to it, which keeps whole-pipeline output deterministic
//! for a given embedding file.

use anyhow::{Result, bail};
use indexmap::IndexMap;

/// Read-only word → vector table with a fixed dimension.
///
/// Built once (by the loader or by hand in tests), then shared by any number
/// of concurrent solve calls. The engine never mutates it.
#[derive(Debug, Clone)]
pub struct EmbeddingTable {
    /// Vector dimension, identical for every row
    dim: usize,

    /// Word → row index, iteration in insertion order
    index: IndexMap<String, usize>,

    /// Row-major storage, `index.len() * dim` entries
    matrix: Vec<f32>,
}

impl EmbeddingTable {
    /// Create an empty table for vectors of `dim` components.
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            index: IndexMap::new(),
            matrix: Vec::new(),
        }
    }

    /// Build a table from `(word, vector)` pairs. Dimension is taken from
    /// the first pair. Convenient for tests and embedded fixtures.
    pub fn from_pairs<W, I>(pairs: I) -> Result<Self>
    where
        W: Into<String>,
        I: IntoIterator<Item = (W, Vec<f32>)>,
    {
        let mut iter = pairs.into_iter();
        let Some((word, vector)) = iter.next() else {
            bail!("cannot build an embedding table from zero rows");
        };

        let mut table = Self::new(vector.len());
        table.insert(word.into(), &vector)?;
        for (word, vector) in iter {
            table.insert(word.into(), &vector)?;
        }
        Ok(table)
    }

    /// Insert a row. The word is lowercased; re-inserting an existing word
    /// overwrites its vector but keeps its original position.
    pub fn insert(&mut self, word: String, vector: &[f32]) -> Result<()> {
        if vector.len() != self.dim {
            bail!(
                "embedding for '{}' has {} components, table dimension is {}",
                word,
                vector.len(),
                self.dim
            );
        }

        let word = word.to_lowercase();
        match self.index.get(&word) {
            Some(&row) => {
                let start = row * self.dim;
                self.matrix[start..start + self.dim].copy_from_slice(vector);
            }
            None => {
                let row = self.index.len();
                self.index.insert(word, row);
                self.matrix.extend_from_slice(vector);
            }
        }
        Ok(())
    }

    /// Vector dimension of every row.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of words in the table.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Whether `word` (lowercased) has a vector.
    pub fn contains(&self, word: &str) -> bool {
        self.index.contains_key(&word.to_lowercase())
    }

    /// Vector for `word`, or `None` when the word is out of vocabulary.
    ///
    /// The engine converts `None` into a typed error instead of substituting
    /// a placeholder; a silent zero vector would corrupt every mean/sum it
    /// participates in.
    pub fn vector(&self, word: &str) -> Option<&[f32]> {
        let &row = self.index.get(&word.to_lowercase())?;
        Some(self.row(row))
    }

    /// Row by index. Panics on out-of-range `row` like a slice would.
    pub fn row(&self, row: usize) -> &[f32] {
        let start = row * self.dim;
        &self.matrix[start..start + self.dim]
    }

    /// Word at `row`, in insertion order.
    pub fn word_at(&self, row: usize) -> &str {
        self.index
            .get_index(row)
            .map(|(w, _)| w.as_str())
            .expect("row within bounds")
    }

    /// Iterate `(word, vector)` in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[f32])> {
        self.index
            .iter()
            .map(|(word, &row)| (word.as_str(), self.row(row)))
    }

    /// Iterate words in insertion order.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.index.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_lookup_lowercases() {
        let mut t = EmbeddingTable::new(2);
        t.insert("Cat".to_string(), &[1.0, 0.0]).unwrap();

        assert!(t.contains("cat"));
        assert!(t.contains("CAT"));
        assert_eq!(t.vector("cat"), Some(&[1.0, 0.0][..]));
        assert_eq!(t.vector("dog"), None);
    }

    #[test]
    fn dimension_mismatch_is_rejected() {
        let mut t = EmbeddingTable::new(3);
        assert!(t.insert("cat".to_string(), &[1.0, 0.0]).is_err());
    }

    #[test]
    fn reinsert_overwrites_in_place() {
        let mut t = EmbeddingTable::new(1);
        t.insert("a".to_string(), &[1.0]).unwrap();
        t.insert("b".to_string(), &[2.0]).unwrap();
        t.insert("a".to_string(), &[9.0]).unwrap();

        assert_eq!(t.len(), 2);
        assert_eq!(t.vector("a"), Some(&[9.0][..]));
        // position preserved: "a" still iterates first
        assert_eq!(t.words().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn iteration_is_insertion_ordered() {
        let t = EmbeddingTable::from_pairs([
            ("zebra", vec![0.0]),
            ("ant", vec![1.0]),
            ("mole", vec![2.0]),
        ])
        .unwrap();

        let words: Vec<_> = t.words().collect();
        assert_eq!(words, vec!["zebra", "ant", "mole"]);
        assert_eq!(t.word_at(1), "ant");
    }
}

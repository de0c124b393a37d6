//! Word list loading for board deals.

use anyhow::{Context, Result, bail};
use std::path::Path;
use tracing::debug;

use crate::core::embedding::EmbeddingTable;

/// Load a whitespace-separated word list, lowercased, keeping only words
/// present in `table`'s vocabulary.
///
/// The engine refuses out-of-vocabulary words, so the board deal filters
/// them here — this is the upstream pre-filter the solve contract assumes.
pub fn load_wordlist<P: AsRef<Path>>(path: P, table: &EmbeddingTable) -> Result<Vec<String>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read word list {}", path.display()))?;

    let mut words: Vec<String> = Vec::new();
    let mut skipped = 0usize;
    for token in content.split_whitespace() {
        let word = token.to_lowercase();
        if table.contains(&word) {
            words.push(word);
        } else {
            skipped += 1;
        }
    }

    debug!(kept = words.len(), skipped, "word list filtered to vocabulary");

    if words.is_empty() {
        bail!(
            "no word in {} is covered by the embedding vocabulary",
            path.display()
        );
    }
    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_to_vocabulary_and_lowercases() {
        let table = EmbeddingTable::from_pairs([
            ("cat", vec![1.0, 0.0]),
            ("dog", vec![0.9, 0.1]),
        ])
        .unwrap();

        let dir = std::env::temp_dir().join("clueword-wordlist-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("words.txt");
        std::fs::write(&path, "Cat dog unicorn\n").unwrap();

        let words = load_wordlist(&path, &table).unwrap();
        assert_eq!(words, vec!["cat".to_string(), "dog".to_string()]);
    }
}

//! Embedding file parsing.
//!
//! Whitespace-delimited `word v1 v2 … vD` text, one row per line, as
//! published for GloVe and friends. The post-specialized variants prefix
//! every word with a language tag (`en_cat`); for those we keep English
//! rows and strip the tag. Words are lowercased, matching the engine's
//! case normalization.

use anyhow::{Context, Result, bail};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use tracing::info;

use crate::core::embedding::EmbeddingTable;
use crate::infra::io::read_text_smart;

/// On-disk layout of an embedding file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmbeddingFormat {
    /// `word v1 v2 … vD`
    #[default]
    Plain,

    /// `en_word v1 v2 … vD`; rows with a non-`en` tag are skipped
    Prefixed,
}

/// Parse `path` into an [`EmbeddingTable`].
///
/// The first accepted row fixes the dimension; any later row with a
/// different component count is an error (a truncated download corrupts
/// every similarity downstream, better to refuse it up front). Shows a
/// progress spinner unless `quiet`.
pub fn load_embeddings<P: AsRef<Path>>(
    path: P,
    format: EmbeddingFormat,
    quiet: bool,
) -> Result<EmbeddingTable> {
    let path = path.as_ref();
    let content = read_text_smart(path)?;

    let pb = if quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::with_template("{spinner} {msg} ({pos} rows)")
                .expect("static template"),
        );
        pb.set_message(format!("Loading embeddings from {}", path.display()));
        pb
    };

    let mut table: Option<EmbeddingTable> = None;
    let mut components: Vec<f32> = Vec::new();

    for (lineno, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let mut fields = line.split_whitespace();
        let token = fields
            .next()
            .expect("non-empty line has at least one field");

        let word = match format {
            EmbeddingFormat::Plain => token,
            EmbeddingFormat::Prefixed => match token.split_once('_') {
                Some(("en", rest)) if !rest.is_empty() => rest,
                _ => continue,
            },
        };

        components.clear();
        for field in fields {
            let value: f32 = field.parse().with_context(|| {
                format!(
                    "{}:{}: non-numeric component '{}'",
                    path.display(),
                    lineno + 1,
                    field
                )
            })?;
            components.push(value);
        }
        if components.is_empty() {
            bail!("{}:{}: row '{}' has no components", path.display(), lineno + 1, word);
        }

        let table = table.get_or_insert_with(|| EmbeddingTable::new(components.len()));
        table
            .insert(word.to_string(), &components)
            .with_context(|| format!("{}:{}", path.display(), lineno + 1))?;

        pb.inc(1);
    }
    pb.finish_and_clear();

    let Some(table) = table else {
        bail!("{} contains no embedding rows", path.display());
    };

    info!(
        words = table.len(),
        dim = table.dim(),
        "embedding table loaded"
    );
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_fixture(name: &str, content: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join("clueword-loader-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn plain_format_parses_and_lowercases() {
        let path = write_fixture("plain.txt", "Cat 1.0 0.0\ndog 0.9 0.1\n");
        let table = load_embeddings(&path, EmbeddingFormat::Plain, true).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.dim(), 2);
        assert_eq!(table.vector("cat"), Some(&[1.0, 0.0][..]));
    }

    #[test]
    fn prefixed_format_strips_tag_and_skips_other_languages() {
        let path = write_fixture(
            "prefixed.txt",
            "en_cat 1.0 0.0\nde_katze 0.8 0.2\nen_dog 0.9 0.1\n",
        );
        let table = load_embeddings(&path, EmbeddingFormat::Prefixed, true).unwrap();

        assert_eq!(table.len(), 2);
        assert!(table.contains("cat"));
        assert!(table.contains("dog"));
        assert!(!table.contains("katze"));
        assert!(!table.contains("de_katze"));
    }

    #[test]
    fn dimension_mismatch_is_a_load_error() {
        let path = write_fixture("mismatch.txt", "cat 1.0 0.0\ndog 0.9\n");
        let err = load_embeddings(&path, EmbeddingFormat::Plain, true).unwrap_err();
        assert!(err.to_string().contains(":2"));
    }

    #[test]
    fn non_numeric_component_is_a_load_error() {
        let path = write_fixture("garbage.txt", "cat 1.0 zero\n");
        assert!(load_embeddings(&path, EmbeddingFormat::Plain, true).is_err());
    }

    #[test]
    fn empty_file_is_a_load_error() {
        let path = write_fixture("empty.txt", "\n\n");
        assert!(load_embeddings(&path, EmbeddingFormat::Plain, true).is_err());
    }
}

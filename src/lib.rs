//! **clueword** - Embedding-driven clue generator for Codenames-style word games
//!
//! Given a static word-embedding table, a set of target words and a set of
//! forbidden words, the engine enumerates target subsets, scores every
//! vocabulary word against each subset by vector similarity, filters
//! illegal/unsafe candidates, and returns a ranked top-N clue list.

/// Command-line interface with clap integration
pub mod cli;

/// Shell completion generation
pub mod completion;

/// Clue-ranking engine - pure, synchronous, deterministic
pub mod core {
    /// Target-word subset enumeration (2^K − 1 combinations)
    pub mod combinations;
    pub use combinations::word_combinations;

    /// Insertion-ordered word → vector table
    pub mod embedding;
    pub use embedding::EmbeddingTable;

    /// Candidate clue record
    pub mod guess;
    pub use guess::Guess;

    /// Similarity metrics (cosine, dot product)
    pub mod metric;
    pub use metric::Metric;

    /// Safety filtering and final ranking
    pub mod ranker;

    /// Per-subset candidate scoring policies
    pub mod scorer;
    pub use scorer::ScoringPolicy;

    /// The solve pipeline and its request/error types
    pub mod solve;
    pub use solve::{SolveError, SolveRequest, solve};

    /// Threshold strategy tiers and resolution
    pub mod threshold;
    pub use threshold::{DEFAULT_THRESHOLD, Strategy, ThresholdRow, resolve_threshold};
}

/// Toy board simulation - wordlist sampling and colour deals
pub mod game {
    /// 5×5 board with red/blue/grey/black colour assignment
    pub mod board;
    pub use board::{Board, BoardBuilder, Colour};

    /// Word list loading, vocabulary filtering, seeded sampling
    pub mod wordlist;
    pub use wordlist::load_wordlist;
}

/// Command runners wired to the CLI
pub mod cli_ext {
    /// `clue board` - deal and solve a demo board
    pub mod board_cmd;

    /// `clue solve` - rank clues for explicit targets
    pub mod solve_cmd;
}

/// Infrastructure - configuration, I/O, embedding loading
pub mod infra {
    /// Configuration management with TOML support and threshold tables
    pub mod config;
    pub use config::{Config, init as config_init, load_config};

    /// Memory-mapped file I/O for large embedding files
    pub mod io;
    pub use io::{FileContent, read_text_smart};

    /// Whitespace-delimited embedding file parsing
    pub mod loader;
    pub use loader::{EmbeddingFormat, load_embeddings};
}

// Strategic re-exports for clean CLI interface
pub use cli::{AppContext, Cli, Commands};
pub use core::{EmbeddingTable, Guess, Metric, ScoringPolicy, SolveRequest, Strategy, solve};
pub use infra::{Config, load_config};

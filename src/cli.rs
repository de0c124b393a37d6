use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::core::metric::Metric;
use crate::core::scorer::ScoringPolicy;
use crate::core::threshold::Strategy;
use crate::infra::loader::EmbeddingFormat;

/// Shared application context for global flags
#[derive(Clone, Debug)]
pub struct AppContext {
    pub quiet: bool,    // global --quiet
    pub no_color: bool, // global --no-color
}

#[derive(Parser)]
#[command(name = "clueword")]
#[command(about = "A fast, embedding-driven clue generator for Codenames-style word games")]
#[command(version, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Suppress progress output
    #[arg(long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rank clue candidates for a set of target words
    Solve(SolveArgs),

    /// Deal a demo board and solve it for the red team
    Board(BoardArgs),

    /// Initialize a clueword.toml config file
    Init(InitArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Parser, Debug)]
pub struct SolveArgs {
    /// Target words the clue should connect
    #[arg(value_name = "WORD", required = true)]
    pub targets: Vec<String>,

    /// Words the clue must stay away from (repeatable)
    #[arg(short, long, value_name = "WORD")]
    pub avoid: Vec<String>,

    /// Path to a whitespace-delimited embedding file (~ and $VAR expanded)
    #[arg(short, long, value_name = "PATH")]
    pub embeddings: String,

    /// Embedding file layout
    #[arg(long, value_enum, default_value = "plain")]
    pub format: FormatArg,

    /// Embedding source name for threshold calibration lookups
    #[arg(long, default_value = "glove")]
    pub source: String,

    /// Number of clues to return
    #[arg(short, long, default_value_t = 10)]
    pub num_results: usize,

    /// Similarity metric
    #[arg(long, value_enum, default_value = "cosine")]
    pub metric: MetricArg,

    /// Per-subset scoring policy
    #[arg(long, value_enum, default_value = "mean-individual")]
    pub policy: PolicyArg,

    /// Risk tier controlling how tightly a clue must connect
    #[arg(long, value_enum, default_value = "moderate")]
    pub strategy: StrategyArg,

    /// Explicit threshold; bypasses strategy resolution
    #[arg(long, conflicts_with = "strategy")]
    pub threshold: Option<f32>,

    /// Over-selection factor applied before safety filtering
    #[arg(long, default_value_t = 10)]
    pub multiplier: usize,

    /// Avoid words are rejected above threshold * margin
    #[arg(long, default_value_t = 2.0)]
    pub avoid_margin: f32,

    /// Emit JSON output (single document)
    #[arg(long)]
    pub json: bool,

    /// Copy the rendered result to the clipboard
    #[arg(long)]
    pub clipboard: bool,
}

#[derive(Parser, Debug)]
pub struct BoardArgs {
    /// Path to a whitespace-delimited embedding file (~ and $VAR expanded)
    #[arg(short, long, value_name = "PATH")]
    pub embeddings: String,

    /// Embedding file layout
    #[arg(long, value_enum, default_value = "plain")]
    pub format: FormatArg,

    /// Word list to deal the board from (one word per whitespace run)
    #[arg(short, long, value_name = "PATH")]
    pub wordlist: String,

    /// RNG seed for a reproducible deal
    #[arg(long)]
    pub seed: Option<u64>,

    /// Red (target) words on the board
    #[arg(long, default_value_t = 9)]
    pub red: usize,

    /// Blue (enemy) words on the board
    #[arg(long, default_value_t = 8)]
    pub blue: usize,

    /// Grey (bystander) words on the board
    #[arg(long, default_value_t = 7)]
    pub grey: usize,

    /// Black (assassin) words on the board
    #[arg(long, default_value_t = 1)]
    pub black: usize,

    /// Number of clues to return
    #[arg(short, long, default_value_t = 5)]
    pub num_results: usize,

    /// Risk tier controlling how tightly a clue must connect
    #[arg(long, value_enum, default_value = "moderate")]
    pub strategy: StrategyArg,
}

#[derive(Parser)]
pub struct InitArgs {
    /// Directory to initialize config in
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Overwrite existing config file
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[derive(Parser)]
pub struct CompletionsArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,

    /// Output directory; if omitted and --stdout not set, prints error
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// Print completion script to stdout instead of a file
    #[arg(long)]
    pub stdout: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FormatArg {
    /// `word v1 v2 … vD` per line (GloVe-style)
    Plain,
    /// `en_word v1 v2 … vD`; the language tag is stripped, other tags skipped
    Prefixed,
}

impl From<FormatArg> for EmbeddingFormat {
    fn from(f: FormatArg) -> Self {
        match f {
            FormatArg::Plain => EmbeddingFormat::Plain,
            FormatArg::Prefixed => EmbeddingFormat::Prefixed,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum MetricArg {
    /// Normalized dot product (exact ranking)
    Cosine,
    /// Plain dot product (faster, scale-sensitive)
    Dot,
}

impl From<MetricArg> for Metric {
    fn from(m: MetricArg) -> Self {
        match m {
            MetricArg::Cosine => Metric::Cosine,
            MetricArg::Dot => Metric::Dot,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PolicyArg {
    /// Average per-word similarity (keeps per-word resolution)
    MeanIndividual,
    /// One aggregated target vector per subset (cheaper)
    SummedNeighbour,
}

impl From<PolicyArg> for ScoringPolicy {
    fn from(p: PolicyArg) -> Self {
        match p {
            PolicyArg::MeanIndividual => ScoringPolicy::MeanIndividualDistance,
            PolicyArg::SummedNeighbour => ScoringPolicy::SummedNearestNeighbour,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StrategyArg {
    Risky,
    QuiteRisky,
    Moderate,
    QuiteConservative,
    Conservative,
}

impl From<StrategyArg> for Strategy {
    fn from(s: StrategyArg) -> Self {
        match s {
            StrategyArg::Risky => Strategy::Risky,
            StrategyArg::QuiteRisky => Strategy::QuiteRisky,
            StrategyArg::Moderate => Strategy::Moderate,
            StrategyArg::QuiteConservative => Strategy::QuiteConservative,
            StrategyArg::Conservative => Strategy::Conservative,
        }
    }
}

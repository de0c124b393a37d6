//! CLI handler for `clue solve`.
//!
//! Plumbing only: expand the embedding path, load config and table, resolve
//! the threshold, run the engine, render. The engine itself stays pure.

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use tabled::{Table, Tabled, settings::Style};
use tracing::warn;

use crate::cli::{AppContext, SolveArgs};
use crate::core::guess::Guess;
use crate::core::solve::{SolveRequest, solve};
use crate::core::threshold::resolve_threshold;
use crate::infra::config::load_config;
use crate::infra::loader::load_embeddings;

pub fn run(args: SolveArgs, ctx: &AppContext) -> Result<()> {
    // Persisted config is best-effort; defaults if missing
    let cfg = load_config().unwrap_or_default();

    let embedding_path = shellexpand::full(&args.embeddings)
        .with_context(|| format!("Failed to expand path '{}'", args.embeddings))?
        .into_owned();
    let table = load_embeddings(&embedding_path, args.format.into(), ctx.quiet)?;

    // Explicit --threshold wins; otherwise resolve the strategy tier
    // against the calibration rows in config.
    let threshold = match args.threshold {
        Some(value) => value,
        None => resolve_threshold(
            Some(&cfg.thresholds),
            &args.source,
            args.metric.into(),
            args.policy.into(),
            args.strategy.into(),
        ),
    };

    let req = SolveRequest {
        table: &table,
        targets: &args.targets,
        avoid: &args.avoid,
        n: args.num_results,
        metric: args.metric.into(),
        policy: args.policy.into(),
        threshold,
        search_space_multiplier: args.multiplier,
        avoid_margin: args.avoid_margin,
    };
    let guesses = solve(&req)?;

    let rendered = if args.json {
        render_json(&guesses, threshold)?
    } else {
        render_table(&guesses, ctx)
    };
    println!("{rendered}");

    if args.clipboard {
        copy_to_clipboard(&rendered);
    }
    Ok(())
}

fn render_json(guesses: &[Guess], threshold: f32) -> Result<String> {
    let doc = serde_json::json!({
        "threshold": threshold,
        "guesses": guesses,
    });
    serde_json::to_string(&doc).context("serialize guesses")
}

#[derive(Tabled)]
struct GuessRow {
    #[tabled(rename = "Clue")]
    clue: String,

    #[tabled(rename = "Score")]
    score: String,

    #[tabled(rename = "Similarity")]
    similarity: String,

    #[tabled(rename = "Linked Words")]
    linked: String,
}

fn render_table(guesses: &[Guess], ctx: &AppContext) -> String {
    if guesses.is_empty() {
        let msg = "No clue cleared the filters; try a riskier strategy or fewer targets.";
        return if ctx.no_color {
            msg.to_string()
        } else {
            msg.yellow().to_string()
        };
    }

    let rows: Vec<GuessRow> = guesses
        .iter()
        .map(|g| GuessRow {
            clue: if ctx.no_color {
                g.clue.clone()
            } else {
                g.clue.green().bold().to_string()
            },
            score: format!("{:.3}", g.score),
            similarity: format!("{:.3}", g.similarity),
            linked: g.linked_words.join(", "),
        })
        .collect();

    Table::new(rows).with(Style::sharp()).to_string()
}

fn copy_to_clipboard(text: &str) {
    // Headless environments have no clipboard; that is not worth failing
    // the whole run over.
    let copied = arboard::Clipboard::new().and_then(|mut cb| cb.set_text(text.to_string()));
    if let Err(e) = copied {
        warn!("clipboard copy failed: {e}");
    }
}

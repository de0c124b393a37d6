//! CLI handler for `clue board`.
//!
//! Deals a demo board from a word list (pre-filtered to the embedding
//! vocabulary), prints it, then solves the red team's turn: targets are the
//! red words, avoid is everything else on the board.

use anyhow::{Context, Result};
use owo_colors::OwoColorize;

use crate::cli::{AppContext, BoardArgs};
use crate::core::metric::Metric;
use crate::core::scorer::ScoringPolicy;
use crate::core::solve::{SolveRequest, solve};
use crate::core::threshold::resolve_threshold;
use crate::game::board::{Board, BoardBuilder, Colour};
use crate::game::wordlist::load_wordlist;
use crate::infra::config::load_config;
use crate::infra::loader::load_embeddings;

pub fn run(args: BoardArgs, ctx: &AppContext) -> Result<()> {
    let cfg = load_config().unwrap_or_default();

    let embedding_path = shellexpand::full(&args.embeddings)
        .with_context(|| format!("Failed to expand path '{}'", args.embeddings))?
        .into_owned();
    let wordlist_path = shellexpand::full(&args.wordlist)
        .with_context(|| format!("Failed to expand path '{}'", args.wordlist))?
        .into_owned();

    let table = load_embeddings(&embedding_path, args.format.into(), ctx.quiet)?;
    let pool = load_wordlist(&wordlist_path, &table)?;

    let builder = BoardBuilder {
        red: args.red,
        blue: args.blue,
        grey: args.grey,
        black: args.black,
        seed: args.seed,
        ..BoardBuilder::default()
    };
    let board = builder.deal(&pool)?;

    print_board(&board, ctx);

    let targets = board.words_for(Colour::Red);
    let avoid = board.words_except(Colour::Red);
    let threshold = resolve_threshold(
        Some(&cfg.thresholds),
        "glove",
        Metric::Cosine,
        ScoringPolicy::MeanIndividualDistance,
        args.strategy.into(),
    );

    let req = SolveRequest {
        n: args.num_results,
        threshold,
        search_space_multiplier: cfg.solver.search_space_multiplier,
        avoid_margin: cfg.solver.avoid_margin,
        ..SolveRequest::new(&table, &targets, &avoid)
    };
    let guesses = solve(&req)?;

    if guesses.is_empty() {
        println!("No clue cleared the filters for this board.");
        return Ok(());
    }

    println!("Clues for the red team:");
    for g in &guesses {
        let clue = if ctx.no_color {
            g.clue.clone()
        } else {
            g.clue.green().bold().to_string()
        };
        println!(
            "  {} ({:.3}) -> {}",
            clue,
            g.score,
            g.linked_words.join(", ")
        );
    }
    Ok(())
}

fn print_board(board: &Board, ctx: &AppContext) {
    let width = board
        .words
        .iter()
        .map(String::len)
        .max()
        .unwrap_or(0)
        .max(6);

    for (i, (word, colour)) in board.words.iter().zip(&board.colours).enumerate() {
        let cell = format!("{word:width$}");
        let cell = if ctx.no_color {
            cell
        } else {
            match colour {
                Colour::Red => cell.red().to_string(),
                Colour::Blue => cell.blue().to_string(),
                Colour::Grey => cell.dimmed().to_string(),
                Colour::Black => cell.on_white().black().to_string(),
            }
        };
        print!("{cell} ");
        if (i + 1) % board.cols == 0 {
            println!();
        }
    }
    println!();
}

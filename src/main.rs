use anyhow::Result;
use clap::Parser;
use clueword::cli::{AppContext, Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // CLUEWORD_LOG=debug for filter statistics and threshold resolution
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("CLUEWORD_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    // Build a context once, pass everywhere
    let ctx = AppContext {
        quiet: cli.quiet,
        no_color: cli.no_color,
    };

    match cli.command {
        Commands::Solve(args) => clueword::cli_ext::solve_cmd::run(args, &ctx),
        Commands::Board(args) => clueword::cli_ext::board_cmd::run(args, &ctx),
        Commands::Init(args) => clueword::infra::config::init(args, &ctx),
        Commands::Completions(args) => clueword::completion::run(args, &ctx),
    }
}

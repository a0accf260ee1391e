mod app;
mod commands;
mod render;

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use commands::study::Flag;

#[derive(Parser)]
#[command(name = "medflash-cli", about = "Medical terms flashcards from the command line", version)]
struct Cli {
    /// Use a specific data directory (default: platform data dir)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// List terms, optionally filtered by a search query
    Terms {
        /// Matches term name or definition (case-insensitive)
        query: Option<String>,
        /// Only show terms in this category
        #[arg(long)]
        category: Option<String>,
    },

    /// Show a term and its progress
    Show {
        /// Term id or name (case-insensitive prefix match)
        term: String,
    },

    /// Record a study answer for a term
    Study {
        /// Term id or name
        term: String,
        /// The answer was correct
        #[arg(long, conflicts_with = "incorrect", required_unless_present = "incorrect")]
        correct: bool,
        /// The answer was incorrect
        #[arg(long)]
        incorrect: bool,
    },

    /// Toggle the favorite flag on a term
    Favorite {
        /// Term id or name
        term: String,
    },

    /// Toggle the bookmark flag on a term
    Bookmark {
        /// Term id or name
        term: String,
    },

    /// Count terms per mastery level
    Summary,

    /// Show the current and longest streak and this week's progress
    Streak,

    /// Record a study session for today
    Record,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let use_color = !cli.no_color && std::io::stdout().is_terminal();
    let mut app = app::App::open(cli.data_dir).await?;

    let result = match cli.command {
        Command::Terms { query, category } => commands::terms::run_list(
            &app,
            query.as_deref(),
            category.as_deref(),
            &cli.format,
            use_color,
        ),
        Command::Show { term } => commands::terms::run_show(&app, &term, &cli.format, use_color),
        Command::Study { term, correct, .. } => {
            commands::study::run_study(&mut app, &term, correct, &cli.format, use_color)
        }
        Command::Favorite { term } => {
            commands::study::run_toggle(&mut app, &term, Flag::Favorite, &cli.format)
        }
        Command::Bookmark { term } => {
            commands::study::run_toggle(&mut app, &term, Flag::Bookmark, &cli.format)
        }
        Command::Summary => commands::terms::run_summary(&app, &cli.format, use_color),
        Command::Streak => commands::streak::run(&mut app, false, &cli.format, use_color),
        Command::Record => commands::streak::run(&mut app, true, &cli.format, use_color),
    };

    // Pending writes must land before exit
    app.close().await;
    result
}

mod commands;
mod render;
mod utils;

use std::path::PathBuf;

use anyhow::Result;
use calboard_core::config::CalboardConfig;
use calboard_core::{EventColor, ViewMode};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "calboard")]
#[command(about = "Filter, navigate and edit your calboard events")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List events, narrowed like the filter drawer
    Events {
        /// Only show events of this color, by name or hex (repeatable)
        #[arg(short, long)]
        color: Vec<EventColor>,

        /// Show events starting on or after this date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// Show events ending on or before this date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
    },
    /// Create an event through the event dialog
    New {
        title: String,

        /// Start date or date/time (e.g., "2025-03-20" or "2025-03-20T15:00")
        #[arg(short, long)]
        start: String,

        /// End date or date/time
        #[arg(short, long, conflicts_with = "duration")]
        end: Option<String>,

        /// Duration instead of an end (e.g., "30m", "2h")
        #[arg(short, long)]
        duration: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(short, long)]
        color: Option<EventColor>,
    },
    /// Edit an event through the event dialog
    Update {
        id: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(short, long)]
        start: Option<String>,

        #[arg(short, long)]
        end: Option<String>,

        /// New description; an empty string removes it
        #[arg(long)]
        description: Option<String>,

        #[arg(short, long)]
        color: Option<EventColor>,
    },
    /// Move an event, as dragging it on the calendar does
    Move {
        id: String,

        #[arg(short, long)]
        start: String,

        /// New end; defaults to keeping the event's length
        #[arg(short, long)]
        end: Option<String>,
    },
    /// Delete an event
    Delete {
        id: String,
    },
    /// Show the calendar toolbar state and the events in view
    View {
        /// Month, Week, Day, Agenda or Timeline
        #[arg(short, long)]
        view: Option<ViewMode>,

        /// Date to open the calendar on (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,

        /// Jump to today before stepping
        #[arg(long)]
        today: bool,

        /// Step forward this many periods
        #[arg(long, default_value_t = 0)]
        next: u32,

        /// Step back this many periods
        #[arg(long, default_value_t = 0)]
        prev: u32,

        /// Render as a narrow display
        #[arg(long)]
        narrow: bool,
    },
    /// Journal abstract submissions
    Abstract {
        #[command(subcommand)]
        command: AbstractCommand,
    },
    /// Show the resolved configuration
    Config,
}

#[derive(Subcommand)]
enum AbstractCommand {
    /// Submit a new abstract from a JSON file
    New { file: PathBuf },
    /// Replace a submission (by id or journal slug) with a JSON file
    Edit { id: String, file: PathBuf },
    /// Show one submission, or list all of them
    Show { id: Option<String> },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = CalboardConfig::load().unwrap_or_else(|e| {
        eprintln!("Failed to load config, using defaults: {e}");
        CalboardConfig::default()
    });

    init_tracing(&config);

    match cli.command {
        Commands::Events { color, from, to } => {
            commands::events::run(&config, color, from, to).await
        }
        Commands::New {
            title,
            start,
            end,
            duration,
            description,
            color,
        } => commands::new::run(&config, title, start, end, duration, description, color).await,
        Commands::Update {
            id,
            title,
            start,
            end,
            description,
            color,
        } => {
            let changes = commands::update::Changes {
                title,
                start,
                end,
                description,
                color,
            };
            commands::update::run(&config, &id, changes).await
        }
        Commands::Move { id, start, end } => {
            commands::move_event::run(&config, &id, &start, end.as_deref()).await
        }
        Commands::Delete { id } => commands::delete::run(&config, &id).await,
        Commands::View {
            view,
            date,
            today,
            next,
            prev,
            narrow,
        } => {
            let nav = commands::view::Navigation {
                view,
                date,
                today,
                next,
                prev,
                narrow,
            };
            commands::view::run(&config, nav).await
        }
        Commands::Abstract { command } => match command {
            AbstractCommand::New { file } => commands::abstracts::create(&config, &file).await,
            AbstractCommand::Edit { id, file } => {
                commands::abstracts::edit(&config, &id, &file).await
            }
            AbstractCommand::Show { id } => commands::abstracts::show(&config, id.as_deref()).await,
        },
        Commands::Config => commands::config::run(&config),
    }
}

/// Logs go to stderr; RUST_LOG wins over the configured level.
fn init_tracing(config: &CalboardConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

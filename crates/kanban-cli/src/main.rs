mod cli;

use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
use kanban_core::AppConfig;
use kanban_domain::ColumnKind;
use kanban_tui::App;
use tracing_subscriber::EnvFilter;

fn init_tracing() -> anyhow::Result<()> {
    if let Ok(log_path) = std::env::var("KANBAN_DEBUG_LOG") {
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
            )
            .with_writer(log_file)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
            )
            .with_writer(std::io::stderr)
            .init();
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::Completions { shell }) = cli.command {
        clap_complete::generate(shell, &mut Cli::command(), "kanban", &mut std::io::stdout());
        return Ok(());
    }

    init_tracing()?;

    let mut config = match cli.config {
        Some(ref path) => AppConfig::load_from(path)?,
        None => AppConfig::load(),
    };
    if let Some(theme) = cli.theme {
        config.theme = theme.into();
    }
    tracing::debug!(?config, "starting board");

    let mut app = App::new(config);
    app.seed(ColumnKind::Todo, &cli.todo);
    app.seed(ColumnKind::InProgress, &cli.in_progress);
    app.seed(ColumnKind::Done, &cli.done);
    app.run().await?;

    Ok(())
}

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use kanban_core::ThemeMode;

#[derive(Parser)]
#[command(name = "kanban")]
#[command(about = "A three-column kanban board for the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a config file (defaults to the platform config dir)
    #[arg(long, value_name = "PATH", env = "KANBAN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Colour theme, overriding the config file
    #[arg(long, value_enum)]
    pub theme: Option<ThemeArg>,

    /// Card to start in "To Do" (repeatable)
    #[arg(long = "todo", value_name = "TEXT")]
    pub todo: Vec<String>,

    /// Card to start in "In Progress" (repeatable)
    #[arg(long = "in-progress", value_name = "TEXT")]
    pub in_progress: Vec<String>,

    /// Card to start in "Done" (repeatable)
    #[arg(long = "done", value_name = "TEXT")]
    pub done: Vec<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ThemeArg {
    Dark,
    Light,
}

impl From<ThemeArg> for ThemeMode {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Dark => ThemeMode::Dark,
            ThemeArg::Light => ThemeMode::Light,
        }
    }
}

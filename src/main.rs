use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use fintrack::cli::{handle_backup_command, run_shell, BackupCommands};
use fintrack::config::{paths::FintrackPaths, settings::Settings};

#[derive(Parser)]
#[command(
    name = "fintrack",
    author = "Kaylee Beyene",
    version,
    about = "Terminal-based personal finance tracker",
    long_about = "fintrack is a terminal-based personal finance tracker. It keeps \
                  per-user income and expense records and monthly category budgets \
                  in a local SQLite database, behind a simple interactive shell."
)]
struct Cli {
    /// Override the data directory
    #[arg(long, global = true, env = "FINTRACK_DATA_DIR", value_name = "DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive shell (the default when no command is given)
    Shell,

    /// Backup management commands
    #[command(subcommand)]
    Backup(BackupCommands),

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing();

    let paths = match cli.data_dir {
        Some(dir) => FintrackPaths::with_base_dir(dir),
        None => FintrackPaths::new()?,
    };
    paths.ensure_directories()?;

    let settings = Settings::load_or_create(&paths)?;
    if !paths.is_initialized() {
        settings.save(&paths)?;
    }

    match cli.command {
        Some(Commands::Shell) | None => {
            run_shell(&paths, &settings)?;
        }
        Some(Commands::Backup(cmd)) => {
            handle_backup_command(&paths, &settings, cmd)?;
        }
        Some(Commands::Config) => {
            println!("fintrack Configuration");
            println!("======================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Database file:    {}", paths.database_file().display());
            println!("Backup directory: {}", paths.backup_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Date format:     {}", settings.date_format);
            println!("  Backups kept:    {}", settings.backup_retention.keep_last);
        }
    }

    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("fintrack=info"));
    fmt().with_env_filter(filter).init();
}

//! Backup CLI commands
//!
//! Implements CLI commands for backup management.

use clap::Subcommand;
use std::path::PathBuf;

use crate::backup::{BackupManager, RestoreManager};
use crate::config::paths::FintrackPaths;
use crate::config::settings::Settings;
use crate::error::{FinError, FinResult};

/// Backup subcommands
#[derive(Subcommand)]
pub enum BackupCommands {
    /// Create a new backup
    Create,

    /// List all available backups
    List {
        /// Show detailed information
        #[arg(short, long)]
        verbose: bool,
    },

    /// Restore from a backup
    Restore {
        /// Backup filename or path (use 'latest' for most recent)
        backup: String,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Delete old backups according to retention policy
    Prune {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle a backup command
pub fn handle_backup_command(
    paths: &FintrackPaths,
    settings: &Settings,
    cmd: BackupCommands,
) -> FinResult<()> {
    let retention = settings.backup_retention.clone();
    let manager = BackupManager::new(paths.clone(), retention.clone());

    match cmd {
        BackupCommands::Create => {
            println!("Creating backup...");
            let backup_path = manager.create_backup()?;
            let filename = backup_path
                .file_name()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_else(|| backup_path.display().to_string());
            println!("Backup created: {}", filename);
            println!("Location: {}", backup_path.display());
        }

        BackupCommands::List { verbose } => {
            let backups = manager.list_backups()?;

            if backups.is_empty() {
                println!("No backups found.");
                println!("Create one with: fintrack backup create");
                return Ok(());
            }

            println!("Available Backups");
            println!("=================");
            println!();

            for (i, backup) in backups.iter().enumerate() {
                let age = chrono::Utc::now().signed_duration_since(backup.created_at);
                let age_str = format_duration(age);

                if verbose {
                    println!(
                        "{}. {}\n   Created: {}\n   Size: {}\n   Age: {}\n",
                        i + 1,
                        backup.filename,
                        backup.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
                        format_size(backup.size_bytes),
                        age_str,
                    );
                } else {
                    println!(
                        "  {}. {} ({} ago, {})",
                        i + 1,
                        backup.filename,
                        age_str,
                        format_size(backup.size_bytes),
                    );
                }
            }

            println!();
            println!("Total: {} backup(s)", backups.len());
        }

        BackupCommands::Restore { backup, force } => {
            let backup_path = resolve_backup_path(&manager, paths, &backup)?;

            // Validate the backup first
            let restore_manager = RestoreManager::new(paths.clone());
            restore_manager.validate_backup(&backup_path)?;

            println!("Backup Information");
            println!("==================");
            println!("File: {}", backup_path.display());
            if let Some(info) = manager.get_backup(
                &backup_path
                    .file_name()
                    .map(|s| s.to_string_lossy().to_string())
                    .unwrap_or_default(),
            )? {
                println!(
                    "Created: {}",
                    info.created_at.format("%Y-%m-%d %H:%M:%S UTC")
                );
                println!("Size: {}", format_size(info.size_bytes));
            }
            println!();

            if !force {
                println!("WARNING: This will overwrite ALL current data!");
                println!("To proceed, run again with --force flag:");
                println!("  fintrack backup restore {} --force", backup);
                return Ok(());
            }

            // Keep a copy of the current database before overwriting it
            if paths.database_file().exists() {
                println!("Creating backup of current data before restore...");
                let pre_restore_backup = manager.create_backup()?;
                let name = pre_restore_backup
                    .file_name()
                    .map(|s| s.to_string_lossy().to_string())
                    .unwrap_or_default();
                println!("Pre-restore backup saved: {}", name);
                println!();
            }

            println!("Restoring from backup...");
            let bytes = restore_manager.restore_from_file(&backup_path)?;

            println!("Restore complete! ({} restored)", format_size(bytes));
        }

        BackupCommands::Prune { force } => {
            let backups = manager.list_backups()?;
            let to_delete = backups.len().saturating_sub(retention.keep_last as usize);

            if to_delete == 0 {
                println!("No backups to prune.");
                println!(
                    "Current retention policy keeps the last {} backup(s); you have {}.",
                    retention.keep_last,
                    backups.len()
                );
                return Ok(());
            }

            println!("Prune Summary");
            println!("=============");
            println!("Retention policy: keep last {}", retention.keep_last);
            println!("Current backups: {}", backups.len());
            println!("To be deleted: {}", to_delete);
            println!();

            if !force {
                println!("To delete old backups, run again with --force flag:");
                println!("  fintrack backup prune --force");
                return Ok(());
            }

            let deleted = manager.enforce_retention()?;
            println!("Deleted {} backup(s).", deleted.len());
        }
    }

    Ok(())
}

/// Resolve a backup identifier to a full path
fn resolve_backup_path(
    manager: &BackupManager,
    paths: &FintrackPaths,
    backup: &str,
) -> FinResult<PathBuf> {
    // Handle "latest" keyword
    if backup.eq_ignore_ascii_case("latest") {
        return manager
            .get_latest_backup()?
            .map(|b| b.path)
            .ok_or_else(|| FinError::backup_not_found("latest"));
    }

    // Check if it's a full path
    let path = PathBuf::from(backup);
    if path.exists() {
        return Ok(path);
    }

    // Check if it's a filename in the backup directory
    let backup_path = paths.backup_dir().join(backup);
    if backup_path.exists() {
        return Ok(backup_path);
    }

    // Try with the backup extension added
    let with_ext = paths.backup_dir().join(format!("{}.db", backup));
    if with_ext.exists() {
        return Ok(with_ext);
    }

    Err(FinError::backup_not_found(backup))
}

/// Format a duration in human-readable form
fn format_duration(duration: chrono::Duration) -> String {
    let seconds = duration.num_seconds();
    let minutes = seconds / 60;
    let hours = minutes / 60;
    let days = hours / 24;

    if seconds < 60 {
        format!("{}s", seconds)
    } else if minutes < 60 {
        format!("{}m", minutes)
    } else if hours < 24 {
        format!("{}h", hours)
    } else if days < 30 {
        format!("{}d", days)
    } else {
        format!("{}mo", days / 30)
    }
}

/// Format a file size in human-readable form
fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    match bytes {
        b if b >= MB => format!("{:.1} MB", b as f64 / MB as f64),
        b if b >= KB => format!("{:.1} KB", b as f64 / KB as f64),
        b => format!("{} B", b),
    }
}

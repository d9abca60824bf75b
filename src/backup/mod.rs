//! Backup system for fintrack
//!
//! Provides rolling backups of the database file with a configurable
//! keep-last retention policy, and restore functionality.
//!
//! # Architecture
//!
//! The backup system consists of two main components:
//!
//! - `BackupManager`: Creates and manages backups with retention
//! - `RestoreManager`: Validates and restores backups
//!
//! # Backup Format
//!
//! A backup is a byte-for-byte copy of the SQLite database file, named
//! `fintrack-YYYYMMDD-HHMMSS-mmm.db`. The creation time is parsed back
//! out of the filename when listing.
//!
//! # Example
//!
//! ```rust,ignore
//! use fintrack::backup::{BackupManager, RestoreManager};
//! use fintrack::config::{paths::FintrackPaths, settings::BackupRetention};
//!
//! // Create a backup
//! let paths = FintrackPaths::new()?;
//! let retention = BackupRetention::default();
//! let backup_manager = BackupManager::new(paths.clone(), retention);
//!
//! let backup_path = backup_manager.create_backup()?;
//! backup_manager.enforce_retention()?;
//!
//! // Later, restore from backup
//! let restore_manager = RestoreManager::new(paths);
//! restore_manager.restore_from_file(&backup_path)?;
//! ```

pub mod manager;
pub mod restore;

pub use manager::{BackupInfo, BackupManager};
pub use restore::RestoreManager;

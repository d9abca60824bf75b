//! Backup manager for fintrack
//!
//! Backups are plain copies of the database file, named by creation time.
//! A keep-last retention policy prunes the oldest copies.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::paths::FintrackPaths;
use crate::config::settings::BackupRetention;
use crate::error::{FinError, FinResult};

/// Filename prefix for backup files
const BACKUP_PREFIX: &str = "fintrack-";
/// Filename extension for backup files
const BACKUP_EXT: &str = "db";

/// Metadata about a backup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupInfo {
    /// Backup filename
    pub filename: String,
    /// Full path to backup
    pub path: PathBuf,
    /// When the backup was created
    pub created_at: DateTime<Utc>,
    /// Size in bytes
    pub size_bytes: u64,
}

/// Manages backup creation and retention
pub struct BackupManager {
    /// Path to backup directory
    backup_dir: PathBuf,
    /// Paths to data files
    paths: FintrackPaths,
    /// Retention policy
    retention: BackupRetention,
}

impl BackupManager {
    /// Create a new BackupManager
    pub fn new(paths: FintrackPaths, retention: BackupRetention) -> Self {
        let backup_dir = paths.backup_dir();
        Self {
            backup_dir,
            paths,
            retention,
        }
    }

    /// Copy the database file into the backup directory
    ///
    /// Returns the path to the created backup file. The caller must not
    /// hold the store open during the copy.
    pub fn create_backup(&self) -> FinResult<PathBuf> {
        let database = self.paths.database_file();
        if !database.exists() {
            return Err(FinError::NotFound {
                entity_type: "Database",
                identifier: database.display().to_string(),
            });
        }

        fs::create_dir_all(&self.backup_dir)
            .map_err(|e| FinError::Io(format!("Failed to create backup directory: {}", e)))?;

        let now = Utc::now();
        let filename = format!(
            "{}{}-{:03}.{}",
            BACKUP_PREFIX,
            now.format("%Y%m%d-%H%M%S"),
            now.timestamp_subsec_millis(),
            BACKUP_EXT,
        );
        let backup_path = self.backup_dir.join(&filename);

        fs::copy(&database, &backup_path)
            .map_err(|e| FinError::Io(format!("Failed to write backup file: {}", e)))?;
        info!(backup = %filename, "database backed up");

        Ok(backup_path)
    }

    /// List all available backups, newest first
    pub fn list_backups(&self) -> FinResult<Vec<BackupInfo>> {
        if !self.backup_dir.exists() {
            return Ok(Vec::new());
        }

        let mut backups = Vec::new();

        for entry in fs::read_dir(&self.backup_dir)
            .map_err(|e| FinError::Io(format!("Failed to read backup directory: {}", e)))?
        {
            let entry = entry
                .map_err(|e| FinError::Io(format!("Failed to read directory entry: {}", e)))?;

            let path = entry.path();
            if path.extension().map_or(false, |ext| ext == BACKUP_EXT) {
                if let Some(info) = parse_backup_info(&path) {
                    backups.push(info);
                }
            }
        }

        backups.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(backups)
    }

    /// Enforce retention policy by deleting old backups
    pub fn enforce_retention(&self) -> FinResult<Vec<PathBuf>> {
        let backups = self.list_backups()?;
        let mut deleted = Vec::new();

        for backup in backups.into_iter().skip(self.retention.keep_last as usize) {
            fs::remove_file(&backup.path)
                .map_err(|e| FinError::Io(format!("Failed to delete old backup: {}", e)))?;
            deleted.push(backup.path);
        }

        Ok(deleted)
    }

    /// Create a backup and then enforce retention policy
    pub fn create_backup_with_retention(&self) -> FinResult<(PathBuf, Vec<PathBuf>)> {
        let backup_path = self.create_backup()?;
        let deleted = self.enforce_retention()?;
        Ok((backup_path, deleted))
    }

    /// Get backup directory path
    pub fn backup_dir(&self) -> &PathBuf {
        &self.backup_dir
    }

    /// Get a specific backup by filename
    pub fn get_backup(&self, filename: &str) -> FinResult<Option<BackupInfo>> {
        let path = self.backup_dir.join(filename);
        if path.exists() {
            Ok(parse_backup_info(&path))
        } else {
            Ok(None)
        }
    }

    /// Get the most recent backup
    pub fn get_latest_backup(&self) -> FinResult<Option<BackupInfo>> {
        let backups = self.list_backups()?;
        Ok(backups.into_iter().next())
    }
}

/// Parse backup info from a backup file path
fn parse_backup_info(path: &Path) -> Option<BackupInfo> {
    let filename = path.file_name()?.to_string_lossy().to_string();

    // Parse date from filename: fintrack-YYYYMMDD-HHMMSS-mmm.db
    let date_part = filename
        .strip_prefix(BACKUP_PREFIX)?
        .strip_suffix(&format!(".{}", BACKUP_EXT))?;
    let created_at = parse_backup_timestamp(date_part)?;

    let metadata = fs::metadata(path).ok()?;

    Some(BackupInfo {
        filename,
        path: path.to_path_buf(),
        created_at,
        size_bytes: metadata.len(),
    })
}

/// Parse a backup timestamp from the filename date part
fn parse_backup_timestamp(date_str: &str) -> Option<DateTime<Utc>> {
    // Expected format: YYYYMMDD-HHMMSS or YYYYMMDD-HHMMSS-mmm
    let parts: Vec<&str> = date_str.split('-').collect();
    if parts.len() < 2 || parts.len() > 3 {
        return None;
    }

    let date_part = parts[0];
    let time_part = parts[1];
    let millis: u32 = if parts.len() == 3 {
        parts[2].parse().ok()?
    } else {
        0
    };

    if date_part.len() != 8 || time_part.len() != 6 {
        return None;
    }

    let year: i32 = date_part[0..4].parse().ok()?;
    let month: u32 = date_part[4..6].parse().ok()?;
    let day: u32 = date_part[6..8].parse().ok()?;
    let hour: u32 = time_part[0..2].parse().ok()?;
    let minute: u32 = time_part[2..4].parse().ok()?;
    let second: u32 = time_part[4..6].parse().ok()?;

    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    let time = chrono::NaiveTime::from_hms_milli_opt(hour, minute, second, millis)?;
    let datetime = chrono::NaiveDateTime::new(date, time);

    Some(DateTime::from_naive_utc_and_offset(datetime, Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;
    use tempfile::TempDir;

    fn create_test_manager() -> (BackupManager, FintrackPaths, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let paths = FintrackPaths::with_base_dir(temp_dir.path().to_path_buf());
        paths.ensure_directories().unwrap();

        // A stand-in database file; backups only copy bytes.
        std::fs::write(paths.database_file(), b"SQLite format 3\0stub").unwrap();

        let retention = BackupRetention { keep_last: 3 };
        let manager = BackupManager::new(paths.clone(), retention);
        (manager, paths, temp_dir)
    }

    #[test]
    fn test_create_backup_copies_database() {
        let (manager, paths, _temp) = create_test_manager();

        let backup_path = manager.create_backup().unwrap();
        assert!(backup_path.exists());
        assert!(backup_path.to_string_lossy().contains(BACKUP_PREFIX));

        let original = std::fs::read(paths.database_file()).unwrap();
        let copied = std::fs::read(&backup_path).unwrap();
        assert_eq!(original, copied);
    }

    #[test]
    fn test_create_backup_without_database_fails() {
        let (manager, paths, _temp) = create_test_manager();
        std::fs::remove_file(paths.database_file()).unwrap();

        let err = manager.create_backup().unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_list_backups_newest_first() {
        let (manager, _paths, _temp) = create_test_manager();

        manager.create_backup().unwrap();
        std::thread::sleep(std::time::Duration::from_millis(20));
        manager.create_backup().unwrap();

        let backups = manager.list_backups().unwrap();
        assert_eq!(backups.len(), 2);
        assert!(backups[0].created_at >= backups[1].created_at);
    }

    #[test]
    fn test_retention_policy() {
        let (manager, _paths, _temp) = create_test_manager();

        for _ in 0..5 {
            manager.create_backup().unwrap();
            std::thread::sleep(std::time::Duration::from_millis(20));
        }

        let deleted = manager.enforce_retention().unwrap();
        assert_eq!(deleted.len(), 2); // 5 - 3 = 2 deleted

        let remaining = manager.list_backups().unwrap();
        assert_eq!(remaining.len(), 3);
    }

    #[test]
    fn test_retention_deletes_oldest() {
        let (manager, _paths, _temp) = create_test_manager();

        let first = manager.create_backup().unwrap();
        for _ in 0..3 {
            std::thread::sleep(std::time::Duration::from_millis(20));
            manager.create_backup().unwrap();
        }

        manager.enforce_retention().unwrap();
        assert!(!first.exists());
    }

    #[test]
    fn test_get_latest_backup() {
        let (manager, _paths, _temp) = create_test_manager();

        assert!(manager.get_latest_backup().unwrap().is_none());

        manager.create_backup().unwrap();
        std::thread::sleep(std::time::Duration::from_millis(20));
        let newest = manager.create_backup().unwrap();

        let latest = manager.get_latest_backup().unwrap().unwrap();
        assert_eq!(latest.path, newest);
    }

    #[test]
    fn test_get_backup_by_filename() {
        let (manager, _paths, _temp) = create_test_manager();

        let path = manager.create_backup().unwrap();
        let filename = path.file_name().unwrap().to_string_lossy().to_string();

        let info = manager.get_backup(&filename).unwrap().unwrap();
        assert_eq!(info.path, path);

        assert!(manager.get_backup("fintrack-nope.db").unwrap().is_none());
    }

    #[test]
    fn test_parse_backup_timestamp() {
        let timestamp = parse_backup_timestamp("20241205-143022").unwrap();
        assert_eq!(timestamp.year(), 2024);
        assert_eq!(timestamp.month(), 12);
        assert_eq!(timestamp.day(), 5);

        let timestamp = parse_backup_timestamp("20241205-143022-456").unwrap();
        assert_eq!(timestamp.timestamp_subsec_millis(), 456);

        assert!(parse_backup_timestamp("junk").is_none());
    }

    #[test]
    fn test_empty_backup_dir() {
        let (manager, _paths, _temp) = create_test_manager();

        let backups = manager.list_backups().unwrap();
        assert!(backups.is_empty());
    }

    #[test]
    fn test_create_backup_with_retention() {
        let (manager, _paths, _temp) = create_test_manager();

        for _ in 0..5 {
            manager.create_backup().unwrap();
            std::thread::sleep(std::time::Duration::from_millis(20));
        }

        let (new_backup, deleted) = manager.create_backup_with_retention().unwrap();

        assert!(new_backup.exists());
        assert!(!deleted.is_empty());
        assert_eq!(manager.list_backups().unwrap().len(), 3);
    }
}

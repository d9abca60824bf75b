//! Backup restoration for fintrack
//!
//! Restoring replaces the database file with a backup copy. The caller
//! must close any open store before restoring and reopen it afterwards.

use std::fs;
use std::io::Read;
use std::path::Path;

use tracing::info;

use crate::config::paths::FintrackPaths;
use crate::error::{FinError, FinResult};

/// First bytes of every SQLite database file
const SQLITE_MAGIC: &[u8] = b"SQLite format 3\0";

/// Handles restoring from backups
pub struct RestoreManager {
    paths: FintrackPaths,
}

impl RestoreManager {
    /// Create a new RestoreManager
    pub fn new(paths: FintrackPaths) -> Self {
        Self { paths }
    }

    /// Restore the database from a backup file
    ///
    /// This overwrites all current data with the backup contents.
    /// It's recommended to create a backup before restoring.
    /// Returns the number of bytes restored.
    pub fn restore_from_file(&self, backup_path: &Path) -> FinResult<u64> {
        self.validate_backup(backup_path)?;
        self.paths.ensure_directories()?;

        let bytes = fs::copy(backup_path, self.paths.database_file())
            .map_err(|e| FinError::Io(format!("Failed to restore backup: {}", e)))?;
        info!(backup = %backup_path.display(), bytes, "database restored");

        Ok(bytes)
    }

    /// Validate a backup file without restoring it
    ///
    /// Checks that the file exists and carries the SQLite header.
    pub fn validate_backup(&self, backup_path: &Path) -> FinResult<()> {
        if !backup_path.exists() {
            return Err(FinError::backup_not_found(
                backup_path.display().to_string(),
            ));
        }

        let mut file = fs::File::open(backup_path)
            .map_err(|e| FinError::Io(format!("Failed to read backup file: {}", e)))?;
        let mut header = [0u8; 16];
        file.read_exact(&mut header)
            .map_err(|_| invalid_backup(backup_path))?;

        if header != *SQLITE_MAGIC {
            return Err(invalid_backup(backup_path));
        }

        Ok(())
    }
}

fn invalid_backup(path: &Path) -> FinError {
    FinError::Validation(format!(
        "Backup file is not a SQLite database: {}",
        path.display()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backup::manager::BackupManager;
    use crate::config::settings::BackupRetention;
    use tempfile::TempDir;

    fn create_test_env() -> (RestoreManager, BackupManager, FintrackPaths, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let paths = FintrackPaths::with_base_dir(temp_dir.path().to_path_buf());
        paths.ensure_directories().unwrap();

        std::fs::write(paths.database_file(), b"SQLite format 3\0original").unwrap();

        let retention = BackupRetention::default();
        let backup_manager = BackupManager::new(paths.clone(), retention);
        let restore_manager = RestoreManager::new(paths.clone());

        (restore_manager, backup_manager, paths, temp_dir)
    }

    #[test]
    fn test_restore_round_trip() {
        let (restore_manager, backup_manager, paths, _temp) = create_test_env();

        let backup_path = backup_manager.create_backup().unwrap();

        // Mangle the live database, then restore.
        std::fs::write(paths.database_file(), b"SQLite format 3\0changed!").unwrap();
        restore_manager.restore_from_file(&backup_path).unwrap();

        let restored = std::fs::read(paths.database_file()).unwrap();
        assert_eq!(restored, b"SQLite format 3\0original");
    }

    #[test]
    fn test_restore_recreates_missing_database() {
        let (restore_manager, backup_manager, paths, _temp) = create_test_env();

        let backup_path = backup_manager.create_backup().unwrap();
        std::fs::remove_file(paths.database_file()).unwrap();

        restore_manager.restore_from_file(&backup_path).unwrap();
        assert!(paths.database_file().exists());
    }

    #[test]
    fn test_restore_missing_backup() {
        let (restore_manager, _backup_manager, paths, _temp) = create_test_env();

        let missing = paths.backup_dir().join("fintrack-nope.db");
        let err = restore_manager.restore_from_file(&missing).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_validate_rejects_non_sqlite() {
        let (restore_manager, _backup_manager, paths, _temp) = create_test_env();

        let bogus = paths.backup_dir().join("fintrack-bogus.db");
        std::fs::write(&bogus, b"not a database").unwrap();

        let err = restore_manager.validate_backup(&bogus).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_validate_accepts_backup() {
        let (restore_manager, backup_manager, _paths, _temp) = create_test_env();

        let backup_path = backup_manager.create_backup().unwrap();
        restore_manager.validate_backup(&backup_path).unwrap();
    }
}

//! Backup service - database backup management
//!
//! Creates ZIP archives containing the database file and settings.json.
//! Backup names embed a microsecond timestamp so retention can sort them
//! without opening the archive.

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

/// Config files to include in a backup (relative to the ledgerline dir)
const CONFIG_FILES: &[&str] = &["settings.json"];

/// Metadata about one backup archive
#[derive(Debug, Clone, Serialize)]
pub struct BackupMetadata {
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub size_bytes: u64,
}

/// Backup service for database backup management
pub struct BackupService {
    ledgerline_dir: PathBuf,
    db_filename: String,
}

impl BackupService {
    pub fn new(ledgerline_dir: PathBuf, db_filename: String) -> Self {
        Self {
            ledgerline_dir,
            db_filename,
        }
    }

    fn backups_dir(&self) -> PathBuf {
        self.ledgerline_dir.join("backups")
    }

    /// Create a backup of the database and config files as a ZIP archive
    pub fn create(&self, max_backups: Option<usize>) -> Result<BackupMetadata> {
        let backups_dir = self.backups_dir();
        fs::create_dir_all(&backups_dir)?;

        let db_path = self.ledgerline_dir.join(&self.db_filename);
        if !db_path.exists() {
            anyhow::bail!("Database file not found");
        }

        let backup_name = Self::backup_name(Utc::now());
        let backup_path = backups_dir.join(&backup_name);

        let file = File::create(&backup_path).context("Failed to create backup file")?;
        let mut zip = ZipWriter::new(file);
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

        zip.start_file(&self.db_filename, options)?;
        let mut db_file = File::open(&db_path)?;
        let mut buffer = Vec::new();
        db_file.read_to_end(&mut buffer)?;
        zip.write_all(&buffer)?;

        for config_file in CONFIG_FILES {
            let config_path = self.ledgerline_dir.join(config_file);
            if config_path.exists() {
                zip.start_file(*config_file, options)?;
                let mut cf = File::open(&config_path)?;
                buffer.clear();
                cf.read_to_end(&mut buffer)?;
                zip.write_all(&buffer)?;
            }
        }

        zip.finish()?;

        let size_bytes = fs::metadata(&backup_path)?.len();

        if let Some(max) = max_backups {
            self.apply_retention(max)?;
        }

        Ok(BackupMetadata {
            name: backup_name,
            created_at: Utc::now(),
            size_bytes,
        })
    }

    /// List all backups, newest first
    pub fn list(&self) -> Result<Vec<BackupMetadata>> {
        let backups_dir = self.backups_dir();
        if !backups_dir.exists() {
            return Ok(Vec::new());
        }

        let mut backups = Vec::new();
        for entry in fs::read_dir(&backups_dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("zip") {
                continue;
            }

            let name = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("")
                .to_string();
            if !name.starts_with("ledgerline-") {
                continue;
            }

            let size_bytes = fs::metadata(&path)?.len();
            let created_at = Self::parse_backup_time(&name);

            backups.push(BackupMetadata {
                name,
                created_at,
                size_bytes,
            });
        }

        backups.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(backups)
    }

    /// Restore from a backup archive
    ///
    /// Takes a safety backup of the current database first, then extracts
    /// every file from the archive over the ledgerline directory.
    pub fn restore(&self, backup_name: &str) -> Result<()> {
        let backup_path = self.backups_dir().join(backup_name);
        if !backup_path.exists() {
            anyhow::bail!("Backup not found: {}", backup_name);
        }

        let db_path = self.ledgerline_dir.join(&self.db_filename);
        if db_path.exists() {
            let pre_restore_name =
                Self::backup_name(Utc::now()).replace("ledgerline-", "ledgerline-pre-restore-");
            let pre_restore_path = self.backups_dir().join(&pre_restore_name);

            let file = File::create(&pre_restore_path)?;
            let mut zip = ZipWriter::new(file);
            let options =
                SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

            zip.start_file(&self.db_filename, options)?;
            let mut db_file = File::open(&db_path)?;
            let mut buffer = Vec::new();
            db_file.read_to_end(&mut buffer)?;
            zip.write_all(&buffer)?;
            zip.finish()?;
        }

        let file = File::open(&backup_path)?;
        let mut archive = ZipArchive::new(file)?;

        for i in 0..archive.len() {
            let mut file = archive.by_index(i)?;
            let name = file.name().to_string();

            let target_path = if name.ends_with(".duckdb") {
                self.ledgerline_dir.join(&self.db_filename)
            } else {
                self.ledgerline_dir.join(&name)
            };

            let mut outfile = File::create(&target_path)?;
            std::io::copy(&mut file, &mut outfile)?;
        }

        Ok(())
    }

    /// Delete all backups
    pub fn clear(&self) -> Result<ClearResult> {
        let backups = self.list()?;
        let count = backups.len() as i64;

        for backup in &backups {
            fs::remove_file(self.backups_dir().join(&backup.name))?;
        }

        Ok(ClearResult { deleted: count })
    }

    fn apply_retention(&self, max_backups: usize) -> Result<()> {
        let mut backups = self.list()?;

        while backups.len() > max_backups {
            if let Some(oldest) = backups.pop() {
                fs::remove_file(self.backups_dir().join(&oldest.name))?;
            }
        }

        Ok(())
    }

    fn backup_name(now: DateTime<Utc>) -> String {
        format!(
            "ledgerline-{}-{:06}.zip",
            now.format("%Y-%m-%dT%H-%M-%S"),
            now.timestamp_subsec_micros()
        )
    }

    /// Parse creation time from a backup filename, falling back to now
    fn parse_backup_time(backup_name: &str) -> DateTime<Utc> {
        let ts = backup_name
            .strip_prefix("ledgerline-pre-restore-")
            .or_else(|| backup_name.strip_prefix("ledgerline-"))
            .and_then(|s| s.strip_suffix(".zip"));

        if let Some(ts) = ts {
            chrono::NaiveDateTime::parse_from_str(ts, "%Y-%m-%dT%H-%M-%S-%f")
                .or_else(|_| chrono::NaiveDateTime::parse_from_str(ts, "%Y-%m-%dT%H-%M-%S"))
                .map(|dt| dt.and_utc())
                .unwrap_or_else(|_| Utc::now())
        } else {
            Utc::now()
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ClearResult {
    pub deleted: i64,
}

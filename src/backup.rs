//! Periodic JSON backups of the flashcard collection

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument};

use crate::models::Category;
use crate::AppState;

const BACKUP_PREFIX: &str = "flashdeck-backup-";
const BACKUP_SUFFIX: &str = ".json";

/// File name for a backup taken at `now`
///
/// The timestamp is fixed-width so names sort chronologically.
pub fn backup_file_name(now: DateTime<Utc>) -> String {
    format!("{}{}{}", BACKUP_PREFIX, now.format("%Y%m%dT%H%M%S%.3fZ"), BACKUP_SUFFIX)
}

fn is_backup_file(name: &str) -> bool {
    name.starts_with(BACKUP_PREFIX) && name.ends_with(BACKUP_SUFFIX)
}

/// Writes the categories as pretty JSON into `dir`, creating it if needed
#[instrument(skip(categories), fields(count = categories.len()))]
pub fn write_backup(dir: &Path, categories: &[Category], now: DateTime<Utc>) -> Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("creating backup directory {:?}", dir))?;

    let path = dir.join(backup_file_name(now));
    let content = serde_json::to_string_pretty(categories)?;
    fs::write(&path, content).with_context(|| format!("writing backup {:?}", path))?;

    debug!("Wrote backup {:?}", path);
    Ok(path)
}

/// Lists backup files in `dir`, oldest first
pub fn list_backups(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut backups: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(is_backup_file)
        })
        .collect();
    backups.sort();

    Ok(backups)
}

/// Deletes the oldest backups so that at most `keep` remain
///
/// ### Returns
///
/// The number of files removed
#[instrument]
pub fn prune_backups(dir: &Path, keep: usize) -> Result<usize> {
    let backups = list_backups(dir)?;
    let excess = backups.len().saturating_sub(keep);

    for path in &backups[..excess] {
        fs::remove_file(path).with_context(|| format!("removing old backup {:?}", path))?;
        debug!("Removed old backup {:?}", path);
    }

    Ok(excess)
}

/// Takes one backup and prunes old ones
pub fn run_backup(dir: &Path, categories: &[Category], keep: usize, now: DateTime<Utc>) -> Result<PathBuf> {
    let path = write_backup(dir, categories, now)?;
    let removed = prune_backups(dir, keep)?;
    info!("Backup written to {:?}, {} old backups removed", path, removed);
    Ok(path)
}

/// Spawns a task that backs up the store every `interval`
///
/// The first backup is taken one interval after startup. Failures are logged
/// and the task keeps running.
pub fn spawn_backup_task(state: Arc<AppState>, interval: Duration, dir: PathBuf, keep: usize) -> JoinHandle<()> {
    info!("Backing up every {:?} to {:?}, keeping {}", interval, dir, keep);

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.tick().await;

        loop {
            ticker.tick().await;

            let categories = state.store.lock().await.categories().to_vec();
            let dir = dir.clone();

            let result = tokio::task::spawn_blocking(move || run_backup(&dir, &categories, keep, Utc::now())).await;

            match result {
                Ok(Ok(_)) => {}
                Ok(Err(e)) => error!("Backup failed: {:#}", e),
                Err(e) => error!("Backup task panicked: {}", e),
            }
        }
    })
}

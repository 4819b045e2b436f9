//! Text-file task store.
//!
//! # Responsibility
//! - Create the data directory and file on first use.
//! - Decode lines through `Task::from_line` and encode through `Task::to_line`.
//!
//! # Invariants
//! - Every written task line is newline-terminated.
//! - Blank lines are ignored on load.
//! - A line that is not valid UTF-8 is skipped like any other malformed line.

use super::{LoadReport, SkippedRecord, StorageError, StorageResult, TaskStore};
use crate::model::task::Task;
use crate::model::task_list::TaskList;
use log::{error, info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Task store backed by one text file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTaskStore {
    path: PathBuf,
}

impl FileTaskStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn ensure_parent_dir(&self) -> StorageResult<()> {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => {
                fs::create_dir_all(dir).map_err(|source| StorageError::CreateDir {
                    path: dir.to_path_buf(),
                    source,
                })
            }
            _ => Ok(()),
        }
    }
}

impl TaskStore for FileTaskStore {
    /// Loads tasks, creating an empty file when none exists yet.
    ///
    /// # Side effects
    /// - May create the parent directory and an empty file.
    /// - Emits `storage_load` logging events with duration and counts.
    fn load(&self) -> StorageResult<LoadReport> {
        let started_at = Instant::now();

        if !self.path.exists() {
            self.ensure_parent_dir()?;
            fs::write(&self.path, "").map_err(|source| StorageError::Write {
                path: self.path.clone(),
                source,
            })?;
            info!(
                "event=storage_load module=storage status=created path={}",
                self.path.display()
            );
            return Ok(LoadReport::default());
        }

        let content = match fs::read(&self.path) {
            Ok(content) => content,
            Err(source) => {
                error!(
                    "event=storage_load module=storage status=error path={} duration_ms={} error={}",
                    self.path.display(),
                    started_at.elapsed().as_millis(),
                    source
                );
                return Err(StorageError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let mut report = LoadReport::default();
        for (offset, raw) in content.split(|byte| *byte == b'\n').enumerate() {
            let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
            let decoded = match std::str::from_utf8(raw) {
                Ok(line) if line.trim().is_empty() => continue,
                Ok(line) => Task::from_line(line).map_err(|err| err.reason),
                Err(err) => Err(format!("line is not valid UTF-8: {err}")),
            };
            match decoded {
                Ok(task) => report.tasks.push(task),
                Err(reason) => {
                    warn!(
                        "event=storage_record_skipped module=storage path={} line={} reason={}",
                        self.path.display(),
                        offset + 1,
                        reason
                    );
                    report.skipped.push(SkippedRecord {
                        line_number: offset + 1,
                        reason,
                    });
                }
            }
        }

        info!(
            "event=storage_load module=storage status=ok path={} tasks={} skipped={} duration_ms={}",
            self.path.display(),
            report.tasks.len(),
            report.skipped.len(),
            started_at.elapsed().as_millis()
        );
        Ok(report)
    }

    /// Rewrites the whole file from `tasks`.
    fn save(&self, tasks: &TaskList) -> StorageResult<()> {
        let started_at = Instant::now();
        self.ensure_parent_dir()?;

        let mut content = String::new();
        for task in tasks {
            content.push_str(&task.to_line());
            content.push('\n');
        }

        if let Err(source) = fs::write(&self.path, content) {
            error!(
                "event=storage_save module=storage status=error path={} duration_ms={} error={}",
                self.path.display(),
                started_at.elapsed().as_millis(),
                source
            );
            return Err(StorageError::Write {
                path: self.path.clone(),
                source,
            });
        }

        info!(
            "event=storage_save module=storage status=ok path={} tasks={} duration_ms={}",
            self.path.display(),
            tasks.len(),
            started_at.elapsed().as_millis()
        );
        Ok(())
    }

    fn location(&self) -> &Path {
        &self.path
    }
}

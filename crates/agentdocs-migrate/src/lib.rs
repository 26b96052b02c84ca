//! Batch migration of agent definition files.
//!
//! This crate is the I/O shell around [`agentdocs_rewrite`]: it enumerates
//! the `.md` files in an agents directory, runs each one through the rewrite
//! pipeline, and writes changed files back in place.
//!
//! Documents are processed independently and sequentially, sorted by file
//! name. A failure on one document (unreadable file, invalid UTF-8, denied
//! write) is captured in that document's report and the batch continues;
//! only a missing agents directory aborts the run.
//!
//! # Example
//!
//! ```ignore
//! use agentdocs_migrate::{DocumentStatus, Migrator};
//!
//! let migrator = Migrator::new("agents", "/opt/plugin");
//! let summary = migrator.run()?;
//! for report in &summary.reports {
//!     println!("{}: {:?}", report.name, report.status);
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use agentdocs_rewrite::Rewriter;

/// Migration error.
#[derive(Debug, thiserror::Error)]
pub enum MigrateError {
    /// The agents directory does not exist or is not a directory.
    #[error("Agents directory not found: {}", .0.display())]
    DirNotFound(PathBuf),
    /// I/O error while enumerating the agents directory.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Outcome for a single document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentStatus {
    /// The rewrite changed the text and it was written back.
    Updated,
    /// The rewrite was a no-op; the file was left untouched.
    Unchanged,
    /// The document could not be read or written.
    Failed(String),
}

/// Per-document migration report.
#[derive(Debug)]
pub struct DocumentReport {
    /// File name of the document (without directory).
    pub name: String,
    /// What happened to the document.
    pub status: DocumentStatus,
    /// Advisory warnings from the rewrite pipeline.
    pub warnings: Vec<String>,
}

/// Summary of a migration run.
#[derive(Debug, Default)]
pub struct MigrateSummary {
    /// Reports in processing order (sorted by file name).
    pub reports: Vec<DocumentReport>,
}

impl MigrateSummary {
    /// Number of documents that were rewritten.
    #[must_use]
    pub fn updated(&self) -> usize {
        self.count(|s| matches!(s, DocumentStatus::Updated))
    }

    /// Number of documents the pipeline left untouched.
    #[must_use]
    pub fn unchanged(&self) -> usize {
        self.count(|s| matches!(s, DocumentStatus::Unchanged))
    }

    /// Number of documents that failed with an I/O error.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.count(|s| matches!(s, DocumentStatus::Failed(_)))
    }

    fn count(&self, pred: impl Fn(&DocumentStatus) -> bool) -> usize {
        self.reports.iter().filter(|r| pred(&r.status)).count()
    }
}

/// Runs the rewrite pipeline over every agent file in a directory.
pub struct Migrator {
    agents_dir: PathBuf,
    rewriter: Rewriter,
    dry_run: bool,
}

impl Migrator {
    /// Create a migrator for the given agents directory and plugin root path.
    #[must_use]
    pub fn new(agents_dir: impl Into<PathBuf>, plugin_path: impl Into<String>) -> Self {
        Self {
            agents_dir: agents_dir.into(),
            rewriter: Rewriter::new(plugin_path),
            dry_run: false,
        }
    }

    /// Toggle dry-run mode: rewrite and report, but never write files.
    #[must_use]
    pub fn dry_run(mut self, enabled: bool) -> Self {
        self.dry_run = enabled;
        self
    }

    /// Migrate every `.md` file directly under the agents directory.
    ///
    /// Per-document failures are recorded in the summary and do not stop the
    /// batch.
    ///
    /// # Errors
    ///
    /// Returns an error if the agents directory is missing or cannot be read.
    pub fn run(&self) -> Result<MigrateSummary, MigrateError> {
        if !self.agents_dir.is_dir() {
            return Err(MigrateError::DirNotFound(self.agents_dir.clone()));
        }

        let mut summary = MigrateSummary::default();
        for path in self.agent_files()? {
            let name = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("<unknown>")
                .to_owned();

            let report = match self.migrate_file(&path) {
                Ok((status, warnings)) => DocumentReport {
                    name,
                    status,
                    warnings,
                },
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "skipping document");
                    DocumentReport {
                        name,
                        status: DocumentStatus::Failed(err.to_string()),
                        warnings: Vec::new(),
                    }
                }
            };
            summary.reports.push(report);
        }

        Ok(summary)
    }

    /// Rewrite one file, writing it back only when the text changed.
    fn migrate_file(&self, path: &Path) -> std::io::Result<(DocumentStatus, Vec<String>)> {
        let input = fs::read_to_string(path)?;
        let rewritten = self.rewriter.rewrite(&input);

        if rewritten.text == input {
            tracing::debug!(path = %path.display(), "no changes");
            return Ok((DocumentStatus::Unchanged, rewritten.warnings));
        }

        if !self.dry_run {
            fs::write(path, &rewritten.text)?;
        }
        tracing::debug!(path = %path.display(), dry_run = self.dry_run, "rewrote document");
        Ok((DocumentStatus::Updated, rewritten.warnings))
    }

    /// Enumerate `.md` files directly under the agents directory, sorted by
    /// file name for a stable processing order.
    fn agent_files(&self) -> std::io::Result<Vec<PathBuf>> {
        let mut paths = Vec::new();
        for entry in fs::read_dir(&self.agents_dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "md") {
                paths.push(path);
            }
        }
        paths.sort();
        Ok(paths)
    }
}

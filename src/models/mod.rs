use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Assignment Configuration
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AssignmentConfig {
    pub title: String,
    pub description: String,
    pub due_date: DateTime<Utc>,
    pub open_date: DateTime<Utc>,
}

impl AssignmentConfig {
    /// Demo assignment: opened a week ago, due five minutes from `now`.
    pub fn demo(now: DateTime<Utc>) -> Self {
        Self {
            title: "Critical Analysis Essay - Final Submission".to_string(),
            description: "Write a comprehensive 3000-word critical analysis of the \
                          assigned readings. This assignment is worth 40% of your \
                          final grade."
                .to_string(),
            due_date: now + Duration::minutes(5),
            open_date: now - Duration::days(7),
        }
    }

    /// Merge a partial update into the config. Fields left `None` keep their
    /// current value.
    pub fn apply(&mut self, patch: AssignmentPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
        if let Some(open_date) = patch.open_date {
            self.open_date = open_date;
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AssignmentPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub open_date: Option<DateTime<Utc>>,
}

// ============================================================================
// Staged Submission File
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedFile {
    pub name: String,
    pub path: PathBuf,
    pub size: u64,
}

impl StagedFile {
    /// Capture a file reference from disk, recording its current size.
    pub fn from_path(path: PathBuf) -> std::io::Result<Self> {
        let metadata = std::fs::metadata(&path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self {
            name,
            path,
            size: metadata.len(),
        })
    }
}

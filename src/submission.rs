use crate::models::StagedFile;
use chrono::{DateTime, Utc};

/// Submission lifecycle for a single assignment session. `Submitted` is
/// terminal; resubmission is not modeled.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Submission {
    #[default]
    NotSubmitted,
    FileStaged(StagedFile),
    Submitted {
        at: DateTime<Utc>,
        /// Lateness frozen at the instant of confirmation. Reconfiguring the
        /// deadline afterwards does not rewrite history.
        late: bool,
    },
}

impl Submission {
    /// Stage a file, replacing any previously staged one. Ignored once
    /// submitted.
    pub fn stage(&mut self, file: StagedFile) {
        match self {
            Submission::NotSubmitted | Submission::FileStaged(_) => {
                *self = Submission::FileStaged(file);
            }
            Submission::Submitted { .. } => {}
        }
    }

    /// Confirm the staged file as submitted. Only legal while a file is
    /// staged; everywhere else this is a guarded no-op. Returns whether the
    /// transition happened.
    pub fn confirm(&mut self, now: DateTime<Utc>, late: bool) -> bool {
        match self {
            Submission::FileStaged(_) => {
                *self = Submission::Submitted { at: now, late };
                true
            }
            _ => false,
        }
    }

    /// Discard the staged file and return to the initial state.
    pub fn cancel(&mut self) {
        if matches!(self, Submission::FileStaged(_)) {
            *self = Submission::NotSubmitted;
        }
    }

    pub fn staged_file(&self) -> Option<&StagedFile> {
        match self {
            Submission::FileStaged(file) => Some(file),
            _ => None,
        }
    }

    pub fn is_submitted(&self) -> bool {
        matches!(self, Submission::Submitted { .. })
    }

    pub fn submitted_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Submission::Submitted { at, .. } => Some(*at),
            _ => None,
        }
    }

    pub fn submitted_late(&self) -> bool {
        matches!(self, Submission::Submitted { late: true, .. })
    }
}

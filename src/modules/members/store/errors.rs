use thiserror::Error;

use crate::modules::members::core::ports::CollectionError;
use crate::modules::members::core::validation::ValidationError;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MemberStoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("No member found with ID: {member_id}")]
    NotFound { member_id: String },

    #[error("duplicate key error")]
    WriteConflict(#[source] CollectionError),

    #[error("transaction did not commit: {0}")]
    TransactionFailure(#[source] CollectionError),

    #[error("unexpected: {0}")]
    Unexpected(String),
}

impl MemberStoreError {
    /// Whether a caller may retry the same request unchanged.
    pub fn is_retryable(&self) -> bool {
        matches!(self, MemberStoreError::TransactionFailure(_))
    }
}

/// Where in a store operation a collection error surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    StartSession,
    CloseActive,
    InsertVersion,
    ReadHistory,
    Commit,
    Read,
}

impl Step {
    pub fn as_str(&self) -> &'static str {
        match self {
            Step::StartSession => "start_session",
            Step::CloseActive => "close_active",
            Step::InsertVersion => "insert_version",
            Step::ReadHistory => "read_history",
            Step::Commit => "commit",
            Step::Read => "read",
        }
    }
}

/// Maps a driver error onto the store taxonomy.
pub fn classify(error: CollectionError, step: Step) -> MemberStoreError {
    match error {
        CollectionError::DuplicateKey { .. } => MemberStoreError::WriteConflict(error),
        CollectionError::WriteConflict { .. }
        | CollectionError::TransactionTimeout { .. }
        | CollectionError::CommitFailed(_) => MemberStoreError::TransactionFailure(error),
        CollectionError::Unavailable(_) | CollectionError::Backend(_)
            if step == Step::Commit =>
        {
            MemberStoreError::TransactionFailure(error)
        }
        CollectionError::Unavailable(_) | CollectionError::Backend(_) => {
            MemberStoreError::Unexpected(format!("{} failed: {error}", step.as_str()))
        }
    }
}

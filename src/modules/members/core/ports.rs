// Ports define what the member core needs from a document database, without implementing it.
//
// Purpose
// - Describe a transactional member collection as traits.
//
// Responsibilities
// - Sessions are transactions: writes stay invisible to other sessions until commit.
// - find_one_and_update returns the document as it was before the update.
//
// Boundaries
// - No concrete storage here. Adapters implement these traits in the adapters layer.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::modules::members::core::member::{CurrentIndicator, MemberVersion, PendingVersion};
use crate::modules::members::core::versioning::Closing;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CollectionError {
    #[error("duplicate key error: index {index} already holds {key}")]
    DuplicateKey { index: String, key: String },

    #[error("write conflict on member document {id}")]
    WriteConflict { id: Uuid },

    #[error("transaction exceeded its lifetime of {timeout_ms}ms")]
    TransactionTimeout { timeout_ms: u64 },

    #[error("commit failed: {0}")]
    CommitFailed(String),

    #[error("member collection unavailable: {0}")]
    Unavailable(String),

    #[error("backend error: {0}")]
    Backend(String),
}

/// Equality filter over member documents. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberFilter {
    pub id: Option<Uuid>,
    pub member_id: Option<String>,
    pub curr_ind: Option<CurrentIndicator>,
}

impl MemberFilter {
    pub fn by_id(id: Uuid) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }

    pub fn by_member_id(member_id: &str) -> Self {
        Self {
            member_id: Some(member_id.to_string()),
            ..Self::default()
        }
    }

    pub fn active(member_id: &str) -> Self {
        Self {
            curr_ind: Some(CurrentIndicator::Active),
            ..Self::by_member_id(member_id)
        }
    }

    pub fn matches(&self, document: &MemberVersion) -> bool {
        self.id.is_none_or(|id| id == document.id)
            && self
                .member_id
                .as_deref()
                .is_none_or(|member_id| member_id == document.member_id)
            && self
                .curr_ind
                .is_none_or(|curr_ind| curr_ind == document.curr_ind)
    }
}

#[async_trait]
pub trait MemberCollection: Send + Sync {
    type Session: MemberSession + 'static;

    async fn start_session(&self) -> Result<Self::Session, CollectionError>;

    /// Reads the latest committed documents, in insertion order.
    async fn find(&self, filter: &MemberFilter) -> Result<Vec<MemberVersion>, CollectionError>;
}

#[async_trait]
pub trait MemberSession: Send {
    async fn find_one_and_update(
        &mut self,
        filter: &MemberFilter,
        closing: Closing,
    ) -> Result<Option<MemberVersion>, CollectionError>;

    async fn insert_one(&mut self, pending: PendingVersion)
    -> Result<MemberVersion, CollectionError>;

    /// Reads the session snapshot merged with the session's own uncommitted writes.
    async fn find(&mut self, filter: &MemberFilter) -> Result<Vec<MemberVersion>, CollectionError>;

    async fn commit(self) -> Result<(), CollectionError>;

    async fn abort(self) -> Result<(), CollectionError>;
}

// In memory implementation of the MemberCollection port.
//
// Purpose
// - Support store tests and local development without a document database.
//
// Responsibilities
// - Give every session a snapshot of the committed documents.
// - Publish a session's writes all at once on commit, or not at all.
// - Reject a commit whose closed documents were rewritten after its snapshot (first committer wins).
// - Optionally enforce a single active document per member id.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::Instant;
use uuid::Uuid;

use crate::modules::members::core::member::{CurrentIndicator, MemberVersion, PendingVersion};
use crate::modules::members::core::ports::{
    CollectionError, MemberCollection, MemberFilter, MemberSession,
};
use crate::modules::members::core::versioning::Closing;

pub const ACTIVE_MEMBER_INDEX: &str = "memberId_1_currInd_1";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectionOptions {
    pub transaction_timeout: Duration,
    pub unique_active_index: bool,
}

impl Default for CollectionOptions {
    fn default() -> Self {
        Self {
            transaction_timeout: Duration::from_secs(5),
            unique_active_index: false,
        }
    }
}

#[derive(Debug, Clone)]
struct StoredDocument {
    document: MemberVersion,
    revision: u64,
}

#[derive(Debug, Default)]
struct CollectionState {
    documents: Vec<StoredDocument>,
    commit_seq: u64,
}

#[derive(Debug, Default)]
struct Faults {
    delay_after_close_ms: AtomicU64,
    delay_before_commit_ms: AtomicU64,
    fail_next_insert: AtomicBool,
    fail_next_commit: AtomicBool,
}

#[derive(Default)]
pub struct InMemoryMemberCollection {
    state: Arc<RwLock<CollectionState>>,
    faults: Arc<Faults>,
    options: CollectionOptions,
    is_offline: bool,
}

impl InMemoryMemberCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: CollectionOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }

    /// Holds every session for `ms` right after it closes a document, keeping the close uncommitted.
    pub fn set_delay_after_close_ms(&self, ms: u64) {
        self.faults.delay_after_close_ms.store(ms, Ordering::SeqCst);
    }

    /// Holds every session for `ms` before it takes the commit lock.
    pub fn set_delay_before_commit_ms(&self, ms: u64) {
        self.faults.delay_before_commit_ms.store(ms, Ordering::SeqCst);
    }

    pub fn fail_next_insert(&self) {
        self.faults.fail_next_insert.store(true, Ordering::SeqCst);
    }

    pub fn fail_next_commit(&self) {
        self.faults.fail_next_commit.store(true, Ordering::SeqCst);
    }

    fn ensure_online(&self) -> Result<(), CollectionError> {
        if self.is_offline {
            return Err(CollectionError::Unavailable("Member collection offline".into()));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl MemberCollection for InMemoryMemberCollection {
    type Session = InMemoryMemberSession;

    async fn start_session(&self) -> Result<Self::Session, CollectionError> {
        self.ensure_online()?;
        let guard = self.state.read().await;
        Ok(InMemoryMemberSession {
            state: self.state.clone(),
            faults: self.faults.clone(),
            options: self.options,
            snapshot: guard.documents.iter().map(|d| d.document.clone()).collect(),
            snapshot_seq: guard.commit_seq,
            closed: HashMap::new(),
            inserted: Vec::new(),
            started_at: Instant::now(),
        })
    }

    async fn find(&self, filter: &MemberFilter) -> Result<Vec<MemberVersion>, CollectionError> {
        self.ensure_online()?;
        let guard = self.state.read().await;
        Ok(guard
            .documents
            .iter()
            .filter(|d| filter.matches(&d.document))
            .map(|d| d.document.clone())
            .collect())
    }
}

pub struct InMemoryMemberSession {
    state: Arc<RwLock<CollectionState>>,
    faults: Arc<Faults>,
    options: CollectionOptions,
    snapshot: Vec<MemberVersion>,
    snapshot_seq: u64,
    closed: HashMap<Uuid, MemberVersion>,
    inserted: Vec<MemberVersion>,
    started_at: Instant,
}

impl InMemoryMemberSession {
    fn ensure_alive(&self) -> Result<(), CollectionError> {
        if self.started_at.elapsed() > self.options.transaction_timeout {
            return Err(CollectionError::TransactionTimeout {
                timeout_ms: self.options.transaction_timeout.as_millis() as u64,
            });
        }
        Ok(())
    }

    fn view(&self) -> impl Iterator<Item = &MemberVersion> {
        self.snapshot
            .iter()
            .map(|d| self.closed.get(&d.id).unwrap_or(d))
            .chain(self.inserted.iter())
    }
}

/// Fails when a member id ends up with more than one active document.
fn check_single_active<'a>(
    documents: impl Iterator<Item = &'a MemberVersion>,
    member_id: &str,
) -> Result<(), CollectionError> {
    let active = documents
        .filter(|d| d.member_id == member_id && d.curr_ind == CurrentIndicator::Active)
        .count();
    if active > 1 {
        return Err(CollectionError::DuplicateKey {
            index: ACTIVE_MEMBER_INDEX.to_string(),
            key: member_id.to_string(),
        });
    }
    Ok(())
}

#[async_trait::async_trait]
impl MemberSession for InMemoryMemberSession {
    async fn find_one_and_update(
        &mut self,
        filter: &MemberFilter,
        closing: Closing,
    ) -> Result<Option<MemberVersion>, CollectionError> {
        self.ensure_alive()?;
        let Some(before) = self.view().find(|d| filter.matches(d)).cloned() else {
            return Ok(None);
        };

        {
            let guard = self.state.read().await;
            let rewritten = guard
                .documents
                .iter()
                .any(|d| d.document.id == before.id && d.revision > self.snapshot_seq);
            if rewritten {
                return Err(CollectionError::WriteConflict { id: before.id });
            }
        }

        let after = MemberVersion {
            curr_ind: closing.curr_ind,
            eff_end_date: closing.eff_end_date,
            ..before.clone()
        };
        match self.inserted.iter_mut().find(|d| d.id == before.id) {
            Some(own) => *own = after,
            None => {
                self.closed.insert(before.id, after);
            }
        }

        let delay = self.faults.delay_after_close_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }
        Ok(Some(before))
    }

    async fn insert_one(
        &mut self,
        pending: PendingVersion,
    ) -> Result<MemberVersion, CollectionError> {
        self.ensure_alive()?;
        if self.faults.fail_next_insert.swap(false, Ordering::SeqCst) {
            return Err(CollectionError::Backend("simulated insert failure".into()));
        }
        let document = pending.with_id(Uuid::now_v7());
        self.inserted.push(document.clone());
        if self.options.unique_active_index {
            check_single_active(self.view(), &document.member_id).inspect_err(|_| {
                self.inserted.pop();
            })?;
        }
        Ok(document)
    }

    async fn find(&mut self, filter: &MemberFilter) -> Result<Vec<MemberVersion>, CollectionError> {
        self.ensure_alive()?;
        Ok(self.view().filter(|d| filter.matches(d)).cloned().collect())
    }

    async fn commit(self) -> Result<(), CollectionError> {
        let delay = self.faults.delay_before_commit_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }
        let mut guard = self.state.write().await;
        self.ensure_alive()?;
        if self.faults.fail_next_commit.swap(false, Ordering::SeqCst) {
            return Err(CollectionError::CommitFailed(
                "simulated commit failure".into(),
            ));
        }

        for id in self.closed.keys() {
            let rewritten = guard
                .documents
                .iter()
                .any(|d| d.document.id == *id && d.revision > self.snapshot_seq);
            if rewritten {
                return Err(CollectionError::WriteConflict { id: *id });
            }
        }

        let revision = guard.commit_seq + 1;
        let mut next: Vec<StoredDocument> = guard
            .documents
            .iter()
            .map(|d| match self.closed.get(&d.document.id) {
                Some(closed) => StoredDocument {
                    document: closed.clone(),
                    revision,
                },
                None => d.clone(),
            })
            .collect();
        next.extend(self.inserted.iter().map(|document| StoredDocument {
            document: document.clone(),
            revision,
        }));

        if self.options.unique_active_index {
            for document in &self.inserted {
                check_single_active(next.iter().map(|d| &d.document), &document.member_id)?;
            }
        }

        guard.documents = next;
        guard.commit_seq = revision;
        Ok(())
    }

    async fn abort(self) -> Result<(), CollectionError> {
        Ok(())
    }
}

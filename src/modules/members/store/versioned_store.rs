// Versioned member store.
//
// Purpose
// - Keep every version of a member instead of overwriting it.
//
// Responsibilities
// - insert_new writes version 1 of a brand new member.
// - update_with_history closes the active version and writes its successor in one session.
// - Map collection errors onto MemberStoreError and log them with the member id and step.
//
// Boundaries
// - Never retries. A TransactionFailure goes back to the caller, which owns the retry policy.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::modules::members::core::clock::Clock;
use crate::modules::members::core::member::{MemberCandidate, MemberVersion};
use crate::modules::members::core::ports::{
    CollectionError, MemberCollection, MemberFilter, MemberSession,
};
use crate::modules::members::core::versioning::{closing, first_version, next_version};
use crate::modules::members::store::errors::{MemberStoreError, Step, classify};

type StepResult<T> = Result<T, (Step, CollectionError)>;

fn at(step: Step) -> impl FnOnce(CollectionError) -> (Step, CollectionError) {
    move |error| (step, error)
}

pub struct VersionedMemberStore<C>
where
    C: MemberCollection + 'static,
{
    collection: Arc<C>,
    clock: Arc<dyn Clock>,
}

impl<C> VersionedMemberStore<C>
where
    C: MemberCollection + 'static,
{
    pub fn new(collection: Arc<C>, clock: Arc<dyn Clock>) -> Self {
        Self { collection, clock }
    }

    pub async fn insert_new(
        &self,
        candidate: MemberCandidate,
    ) -> Result<MemberVersion, MemberStoreError> {
        let member_id = candidate.member_id.clone();
        info!(member_id = %member_id, "saving new member");

        let mut session = self.start_session(&member_id).await?;
        match self.insert_first_version(&mut session, candidate).await {
            Ok(stored) => {
                self.commit(session, &member_id).await?;
                Ok(stored)
            }
            Err((step, cause)) => Err(self.rollback(session, &member_id, step, cause).await),
        }
    }

    pub async fn update_with_history(
        &self,
        candidate: MemberCandidate,
    ) -> Result<Vec<MemberVersion>, MemberStoreError> {
        let member_id = candidate.member_id.clone();
        info!(member_id = %member_id, "starting versioned update");

        let mut session = self.start_session(&member_id).await?;
        match self.supersede_active(&mut session, candidate).await {
            Ok(history) => {
                self.commit(session, &member_id).await?;
                Ok(history)
            }
            Err((step, cause)) => Err(self.rollback(session, &member_id, step, cause).await),
        }
    }

    pub async fn find_active(
        &self,
        member_id: &str,
    ) -> Result<Option<MemberVersion>, MemberStoreError> {
        let active = self
            .collection
            .find(&MemberFilter::active(member_id))
            .await
            .map_err(|cause| self.fail(member_id, Step::Read, cause))?;
        if active.len() > 1 {
            warn!(
                member_id = %member_id,
                active = active.len(),
                "more than one active version found"
            );
        }
        Ok(active.into_iter().last())
    }

    /// All versions of a member, oldest first.
    pub async fn history(&self, member_id: &str) -> Result<Vec<MemberVersion>, MemberStoreError> {
        let mut versions = self
            .collection
            .find(&MemberFilter::by_member_id(member_id))
            .await
            .map_err(|cause| self.fail(member_id, Step::Read, cause))?;
        versions.sort_by_key(|v| v.version);
        Ok(versions)
    }

    async fn supersede_active(
        &self,
        session: &mut C::Session,
        candidate: MemberCandidate,
    ) -> StepResult<Vec<MemberVersion>> {
        let today = self.clock.today();
        let member_id = candidate.member_id.clone();

        debug!(member_id = %member_id, "closing active version");
        let previous = session
            .find_one_and_update(&MemberFilter::active(&member_id), closing(today))
            .await
            .map_err(at(Step::CloseActive))?;

        let Some(previous) = previous else {
            info!(member_id = %member_id, "no active version found, creating the first version");
            let stored = self.insert_first_version(session, candidate).await?;
            return Ok(vec![stored]);
        };

        let pending = next_version(&previous, candidate, today);
        debug!(member_id = %member_id, version = pending.version, "inserting next version");
        session
            .insert_one(pending)
            .await
            .map_err(at(Step::InsertVersion))?;

        let mut history = session
            .find(&MemberFilter::by_member_id(&member_id))
            .await
            .map_err(at(Step::ReadHistory))?;
        history.sort_by_key(|v| v.version);
        Ok(history)
    }

    async fn insert_first_version(
        &self,
        session: &mut C::Session,
        candidate: MemberCandidate,
    ) -> StepResult<MemberVersion> {
        let pending = first_version(candidate, self.clock.today());
        session
            .insert_one(pending)
            .await
            .map_err(at(Step::InsertVersion))
    }

    async fn start_session(&self, member_id: &str) -> Result<C::Session, MemberStoreError> {
        self.collection
            .start_session()
            .await
            .map_err(|cause| self.fail(member_id, Step::StartSession, cause))
    }

    async fn commit(&self, session: C::Session, member_id: &str) -> Result<(), MemberStoreError> {
        session
            .commit()
            .await
            .map_err(|cause| self.fail(member_id, Step::Commit, cause))?;
        debug!(member_id = %member_id, "transaction committed");
        Ok(())
    }

    async fn rollback(
        &self,
        session: C::Session,
        member_id: &str,
        step: Step,
        cause: CollectionError,
    ) -> MemberStoreError {
        if let Err(abort_error) = session.abort().await {
            warn!(member_id = %member_id, error = %abort_error, "abort failed");
        }
        self.fail(member_id, step, cause)
    }

    fn fail(&self, member_id: &str, step: Step, cause: CollectionError) -> MemberStoreError {
        let classified = classify(cause, step);
        match &classified {
            MemberStoreError::Unexpected(_) => error!(
                member_id = %member_id,
                step = step.as_str(),
                error = %classified,
                "member store operation failed"
            ),
            _ => warn!(
                member_id = %member_id,
                step = step.as_str(),
                error = %classified,
                "member store operation rejected"
            ),
        }
        classified
    }
}

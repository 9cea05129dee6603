// Member facade for the request layer.
//
// Responsibilities
// - Reject blank member ids before any storage call.
// - Turn an absent active version into NotFound.
// - Otherwise delegate to the versioned store.

use std::sync::Arc;

use tracing::info;

use crate::modules::members::core::member::{MemberCandidate, MemberVersion};
use crate::modules::members::core::ports::MemberCollection;
use crate::modules::members::core::validation::{validate_candidate, validate_member_id};
use crate::modules::members::store::errors::MemberStoreError;
use crate::modules::members::store::versioned_store::VersionedMemberStore;

pub struct MemberService<C>
where
    C: MemberCollection + 'static,
{
    store: Arc<VersionedMemberStore<C>>,
}

impl<C> MemberService<C>
where
    C: MemberCollection + 'static,
{
    pub fn new(store: Arc<VersionedMemberStore<C>>) -> Self {
        Self { store }
    }

    pub async fn insert(
        &self,
        candidate: MemberCandidate,
    ) -> Result<MemberVersion, MemberStoreError> {
        validate_candidate(&candidate)?;
        self.store.insert_new(candidate).await
    }

    pub async fn update_keep_history(
        &self,
        candidate: MemberCandidate,
    ) -> Result<Vec<MemberVersion>, MemberStoreError> {
        validate_candidate(&candidate)?;
        let member_id = candidate.member_id.clone();
        let history = self.store.update_with_history(candidate).await?;
        if history.is_empty() {
            return Err(MemberStoreError::NotFound { member_id });
        }
        Ok(history)
    }

    pub async fn get_active_by_record_id(
        &self,
        member_id: &str,
    ) -> Result<MemberVersion, MemberStoreError> {
        let member_id = validate_member_id(member_id)?;
        match self.store.find_active(member_id).await? {
            Some(active) => Ok(active),
            None => {
                info!(member_id = %member_id, "no active version");
                Err(MemberStoreError::NotFound {
                    member_id: member_id.to_string(),
                })
            }
        }
    }

    pub async fn history_by_record_id(
        &self,
        member_id: &str,
    ) -> Result<Vec<MemberVersion>, MemberStoreError> {
        let member_id = validate_member_id(member_id)?;
        let history = self.store.history(member_id).await?;
        if history.is_empty() {
            return Err(MemberStoreError::NotFound {
                member_id: member_id.to_string(),
            });
        }
        Ok(history)
    }
}

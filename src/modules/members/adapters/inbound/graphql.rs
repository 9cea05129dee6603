use async_graphql::{
    Context, EmptySubscription, ErrorExtensions, InputObject, Object, Result as GqlResult, Schema,
    SimpleObject,
};

use crate::modules::members::adapters::inbound::http_error::status_for;
use crate::modules::members::core::member::{MemberCandidate, MemberDetails, MemberVersion};
use crate::modules::members::store::errors::MemberStoreError;
use crate::shell::state::AppState;

#[derive(SimpleObject, Clone)]
pub struct GqlMember {
    pub id: String,
    pub member_id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub primary_number: Option<String>,
    pub version: u32,
    pub curr_ind: String,
    pub eff_start_date: String,
    pub eff_end_date: String,
}

impl From<MemberVersion> for GqlMember {
    fn from(v: MemberVersion) -> Self {
        Self {
            id: v.id.to_string(),
            member_id: v.member_id,
            first_name: v.details.first_name,
            last_name: v.details.last_name,
            primary_number: v.details.primary_number,
            version: v.version,
            curr_ind: v.curr_ind.as_str().to_string(),
            eff_start_date: v.eff_start_date.to_string(),
            eff_end_date: v.eff_end_date.to_string(),
        }
    }
}

#[derive(InputObject)]
pub struct MemberInput {
    pub member_id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub primary_number: Option<String>,
}

impl From<MemberInput> for MemberCandidate {
    fn from(input: MemberInput) -> Self {
        MemberCandidate::new(
            input.member_id,
            MemberDetails {
                first_name: input.first_name,
                last_name: input.last_name,
                primary_number: input.primary_number,
            },
        )
    }
}

fn to_gql_error(error: MemberStoreError) -> async_graphql::Error {
    let status = i32::from(status_for(&error).as_u16());
    async_graphql::Error::new(error.to_string()).extend_with(|_, e| e.set("status", status))
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    async fn active_member(&self, context: &Context<'_>, member_id: String) -> GqlResult<GqlMember> {
        let state = context.data_unchecked::<AppState>();
        let active = state
            .members
            .get_active_by_record_id(&member_id)
            .await
            .map_err(to_gql_error)?;
        Ok(active.into())
    }

    async fn member_history(
        &self,
        context: &Context<'_>,
        member_id: String,
    ) -> GqlResult<Vec<GqlMember>> {
        let state = context.data_unchecked::<AppState>();
        let history = state
            .members
            .history_by_record_id(&member_id)
            .await
            .map_err(to_gql_error)?;
        Ok(history.into_iter().map(Into::into).collect())
    }
}

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn insert_member(&self, context: &Context<'_>, input: MemberInput) -> GqlResult<GqlMember> {
        let state = context.data_unchecked::<AppState>();
        let stored = state
            .members
            .insert(input.into())
            .await
            .map_err(to_gql_error)?;
        Ok(stored.into())
    }

    async fn update_member_keep_history(
        &self,
        context: &Context<'_>,
        input: MemberInput,
    ) -> GqlResult<Vec<GqlMember>> {
        let state = context.data_unchecked::<AppState>();
        let history = state
            .members
            .update_keep_history(input.into())
            .await
            .map_err(to_gql_error)?;
        Ok(history.into_iter().map(Into::into).collect())
    }
}

pub type AppSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

pub fn build_schema(state: AppState) -> AppSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(state)
        .finish()
}

#[cfg(test)]
mod member_graphql_tests {
    use super::*;
    use crate::tests::fixtures::state::make_test_state;

    #[tokio::test]
    async fn it_should_insert_update_and_read_the_active_member() {
        let schema = build_schema(make_test_state());

        let inserted = schema
            .execute(r#"mutation { insertMember(input: { memberId: "M1", firstName: "Alice" }) { version currInd } }"#)
            .await;
        assert!(inserted.errors.is_empty(), "{:?}", inserted.errors);

        let updated = schema
            .execute(r#"mutation { updateMemberKeepHistory(input: { memberId: "M1", firstName: "Alice B." }) { version currInd } }"#)
            .await;
        assert!(updated.errors.is_empty(), "{:?}", updated.errors);
        let data = updated.data.into_json().unwrap();
        assert_eq!(data["updateMemberKeepHistory"][0]["currInd"], "N");
        assert_eq!(data["updateMemberKeepHistory"][1]["version"], 2);

        let active = schema
            .execute(r#"{ activeMember(memberId: "M1") { version firstName } }"#)
            .await;
        let data = active.data.into_json().unwrap();
        assert_eq!(data["activeMember"]["version"], 2);
        assert_eq!(data["activeMember"]["firstName"], "Alice B.");
    }

    #[tokio::test]
    async fn it_should_surface_not_found_with_its_status() {
        let schema = build_schema(make_test_state());
        let response = schema
            .execute(r#"{ activeMember(memberId: "M2") { version } }"#)
            .await;
        assert_eq!(response.errors.len(), 1);
        assert_eq!(response.errors[0].message, "No member found with ID: M2");
    }
}

use crate::modules::members::adapters::outbound::in_memory_member_collection::InMemoryMemberCollection;
use crate::modules::members::service::MemberService;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub members: Arc<MemberService<InMemoryMemberCollection>>,
}

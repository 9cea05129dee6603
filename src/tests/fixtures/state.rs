// Application state over an in-memory collection, for inbound adapter tests.

use std::sync::Arc;

use crate::modules::members::adapters::outbound::in_memory_member_collection::InMemoryMemberCollection;
use crate::modules::members::core::clock::FixedClock;
use crate::modules::members::service::MemberService;
use crate::modules::members::store::versioned_store::VersionedMemberStore;
use crate::shell::state::AppState;
use crate::tests::fixtures::members::today;

pub fn make_state_over(collection: InMemoryMemberCollection) -> AppState {
    let store = Arc::new(VersionedMemberStore::new(
        Arc::new(collection),
        Arc::new(FixedClock(today())),
    ));
    AppState {
        members: Arc::new(MemberService::new(store)),
    }
}

pub fn make_test_state() -> AppState {
    make_state_over(InMemoryMemberCollection::new())
}

pub fn make_offline_state() -> AppState {
    let mut collection = InMemoryMemberCollection::new();
    collection.toggle_offline();
    make_state_over(collection)
}

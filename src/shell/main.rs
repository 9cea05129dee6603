use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use member_versions::modules::members::adapters::outbound::in_memory_member_collection::InMemoryMemberCollection;
use member_versions::modules::members::core::clock::SystemClock;
use member_versions::modules::members::service::MemberService;
use member_versions::modules::members::store::versioned_store::VersionedMemberStore;
use member_versions::shell::config::AppConfig;
use member_versions::shell::http::router;
use member_versions::shell::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env()?;

    // In-memory collection for now
    let collection = Arc::new(InMemoryMemberCollection::with_options(
        config.collection_options(),
    ));
    let store = Arc::new(VersionedMemberStore::new(collection, Arc::new(SystemClock)));
    let state = AppState {
        members: Arc::new(MemberService::new(store)),
    };
    if config.unique_active_index {
        tracing::info!("enforcing a single active version per member id");
    }

    let addr = config.socket_addr()?;
    tracing::info!("member endpoints: http://{}/members, GraphQL: http://{}/gql", addr, addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router(state)).await?;
    Ok(())
}

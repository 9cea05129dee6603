// Composition root for the members bounded context.
//
// Responsibilities
// - Read config from environment.
// - Instantiate the member collection, store, and facade.
// - Wire them into the HTTP and GraphQL adapters.

pub mod config;
pub mod graphql;
pub mod http;
pub mod state;

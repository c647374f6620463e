//! In-memory store adapters for development and tests.

mod credential_store;
mod plan_store;

pub use credential_store::InMemoryCredentialStore;
pub use plan_store::InMemoryPlanStore;

use crate::llm_client::ProposalClient;
use crate::store::{CredentialStore, ProfileStore};

/// Shared application state injected into route handlers via Axum
/// extractors. The storage capability behind the two adapters is decided
/// once at startup.
#[derive(Clone)]
pub struct AppState {
    pub credentials: CredentialStore,
    pub profiles: ProfileStore,
    pub llm: ProposalClient,
}

use crate::config::Config;
use crate::credentials::CredentialStore;
use crate::questions::generator::QuestionGenerator;
use crate::questions::session::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub generator: QuestionGenerator,
    pub credentials: CredentialStore,
    /// Last requirement per session, replayed by the regenerate endpoint.
    pub sessions: SessionStore,
    pub config: Config,
}

use std::sync::Arc;

use super::auth_policy::AuthPolicy;
use crate::upstream::AiService;

/// Application state shared by every worker. Holds no game data.
#[derive(Clone)]
pub struct AppState {
    /// Authentication policy applied to `POST /play`
    pub auth: AuthPolicy,
    /// Client for the AI move-selection service
    pub ai: Arc<dyn AiService>,
}

impl AppState {
    pub fn new(auth: AuthPolicy, ai: Arc<dyn AiService>) -> Self {
        Self { auth, ai }
    }

    /// State with authentication switched off.
    pub fn without_auth(ai: Arc<dyn AiService>) -> Self {
        Self::new(AuthPolicy::Disabled, ai)
    }
}

use std::sync::Arc;

use service::auth::{AuthService, IdentityRepository};
use service::random::RandomSource;

use crate::tokens::TokenRegistry;

#[derive(Clone)]
pub struct AppState {
    pub auth: AuthService<dyn IdentityRepository>,
    pub tokens: Arc<TokenRegistry>,
    pub rng: Arc<dyn RandomSource>,
}

impl AppState {
    pub fn new(identities: Arc<dyn IdentityRepository>, rng: Arc<dyn RandomSource>) -> Self {
        Self {
            auth: AuthService::new(identities),
            tokens: Arc::new(TokenRegistry::new()),
            rng,
        }
    }
}

use dashmap::DashMap;
use uuid::Uuid;

/// Server-side bearer tokens: token -> email. Tokens never expire; they
/// are dropped on logout or process exit.
#[derive(Debug, Default)]
pub struct TokenRegistry {
    tokens: DashMap<String, String>,
}

impl TokenRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self, email: &str) -> String {
        let token = Uuid::new_v4().to_string();
        self.tokens.insert(token.clone(), email.to_string());
        token
    }

    pub fn resolve(&self, token: &str) -> Option<String> {
        self.tokens.get(token).map(|e| e.value().clone())
    }

    /// Returns whether the token was live.
    pub fn revoke(&self, token: &str) -> bool {
        self.tokens.remove(token).is_some()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

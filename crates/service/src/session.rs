//! Client-side holder of the authenticated identity.
//!
//! One [`AuthSession`] per client. It hydrates from the backend once, then
//! follows login/signup/logout results. Observers either read a snapshot
//! with [`AuthSession::state`] or wait for changes on [`AuthSession::subscribe`].

use std::future::Future;
use std::sync::Arc;

use arc_swap::ArcSwap;
use models::{Identity, LoginCredentials, SignupCredentials};
use tokio::sync::watch;
use tracing::{debug, instrument};

use crate::backend::Backend;
use crate::errors::BackendError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub user: Option<Identity>,
    pub is_loading: bool,
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

tokio::task_local! {
    static CURRENT_SESSION: Arc<AuthSession>;
}

pub struct AuthSession {
    backend: Arc<dyn Backend>,
    state: ArcSwap<SessionState>,
    changes: watch::Sender<Arc<SessionState>>,
}

impl AuthSession {
    /// A session that has not hydrated yet: no user, `is_loading` set.
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        let initial = Arc::new(SessionState { user: None, is_loading: true });
        let (changes, _) = watch::channel(Arc::clone(&initial));
        Self { backend, state: ArcSwap::new(initial), changes }
    }

    /// Build and hydrate in one step.
    pub async fn initialize(backend: Arc<dyn Backend>) -> Arc<Self> {
        let session = Arc::new(Self::new(backend));
        session.hydrate().await;
        session
    }

    /// Load the persisted identity and clear the loading flag.
    #[instrument(skip(self))]
    pub async fn hydrate(&self) {
        let user = self.backend.current_user().await;
        debug!(authenticated = user.is_some(), "session hydrated");
        self.publish(SessionState { user, is_loading: false });
    }

    fn publish(&self, next: SessionState) {
        let next = Arc::new(next);
        self.state.store(Arc::clone(&next));
        self.changes.send_replace(next);
    }

    fn set_user(&self, user: Option<Identity>) {
        let is_loading = self.state.load().is_loading;
        self.publish(SessionState { user, is_loading });
    }

    pub fn state(&self) -> Arc<SessionState> {
        self.state.load_full()
    }

    pub fn user(&self) -> Option<Identity> {
        self.state.load().user.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.load().is_loading
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.load().is_authenticated()
    }

    /// Receiver that observes every published state.
    pub fn subscribe(&self) -> watch::Receiver<Arc<SessionState>> {
        self.changes.subscribe()
    }

    /// The backend, for operations that do not touch the session.
    pub fn backend(&self) -> &Arc<dyn Backend> {
        &self.backend
    }

    /// Errors come back exactly as the backend raised them and leave the
    /// held identity untouched.
    #[instrument(skip(self, credentials), fields(email = %credentials.email))]
    pub async fn login(&self, credentials: LoginCredentials) -> Result<Identity, BackendError> {
        let auth = self.backend.login(credentials).await?;
        self.set_user(Some(auth.user.clone()));
        Ok(auth.user)
    }

    #[instrument(skip(self, credentials), fields(email = %credentials.email))]
    pub async fn signup(&self, credentials: SignupCredentials) -> Result<Identity, BackendError> {
        let auth = self.backend.signup(credentials).await?;
        self.set_user(Some(auth.user.clone()));
        Ok(auth.user)
    }

    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<(), BackendError> {
        self.backend.logout().await?;
        self.set_user(None);
        Ok(())
    }

    /// Run `fut` with `session` installed as the task's current session.
    pub async fn scope<F: Future>(session: Arc<AuthSession>, fut: F) -> F::Output {
        CURRENT_SESSION.scope(session, fut).await
    }

    /// The session installed by an enclosing [`AuthSession::scope`].
    ///
    /// # Panics
    /// Outside of any scope; that is a wiring bug, not a runtime condition.
    pub fn current() -> Arc<AuthSession> {
        match Self::try_current() {
            Some(session) => session,
            None => panic!("AuthSession::current() must be called within an AuthSession::scope"),
        }
    }

    pub fn try_current() -> Option<Arc<AuthSession>> {
        CURRENT_SESSION.try_with(Arc::clone).ok()
    }
}

use std::sync::Arc;

use async_trait::async_trait;
use models::{
    ApplicationResult, AuthResponse, Identity, JobListing, LoginCredentials, ResumeFile, ResumeScore,
    SignupCredentials,
};
use tracing::{info, instrument};
use uuid::Uuid;

use super::{Backend, SessionPersistence};
use crate::auth::{repository::memory::InMemoryIdentityRepository, AuthService, IdentityRepository};
use crate::catalog;
use crate::errors::BackendError;
use crate::latency::{LatencyProfile, Operation};
use crate::random::{RandomSource, SeededRandom};
use crate::scoring;
use crate::storage::{KeyValueStore, MemoryStore};

/// Fixture account present in every mock backend unless disabled.
pub const TEST_EMAIL: &str = "test@example.com";
pub const TEST_PASSWORD: &str = "password123";
pub const TEST_USERNAME: &str = "TestUser";

/// In-process simulation of the remote API.
///
/// Every operation waits for its configured latency before resolving. There
/// is no de-duplication of concurrent calls and no cancellation.
pub struct MockBackend {
    auth: AuthService<dyn IdentityRepository>,
    session: SessionPersistence,
    rng: Arc<dyn RandomSource>,
    latency: LatencyProfile,
}

pub struct MockBackendBuilder {
    identities: Option<Arc<dyn IdentityRepository>>,
    store: Option<Arc<dyn KeyValueStore>>,
    rng: Option<Arc<dyn RandomSource>>,
    latency: LatencyProfile,
    seed_test_identity: bool,
}

impl Default for MockBackendBuilder {
    fn default() -> Self {
        Self {
            identities: None,
            store: None,
            rng: None,
            latency: LatencyProfile::simulated(),
            seed_test_identity: true,
        }
    }
}

impl MockBackendBuilder {
    pub fn identities(mut self, repo: Arc<dyn IdentityRepository>) -> Self {
        self.identities = Some(repo);
        self
    }

    pub fn store(mut self, store: Arc<dyn KeyValueStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn random(mut self, rng: Arc<dyn RandomSource>) -> Self {
        self.rng = Some(rng);
        self
    }

    pub fn latency(mut self, latency: LatencyProfile) -> Self {
        self.latency = latency;
        self
    }

    pub fn without_test_identity(mut self) -> Self {
        self.seed_test_identity = false;
        self
    }

    /// Assemble the backend; defaults are an empty in-memory identity store,
    /// an in-memory session store and an entropy-seeded RNG.
    pub async fn build(self) -> Result<MockBackend, BackendError> {
        let identities = self
            .identities
            .unwrap_or_else(|| Arc::new(InMemoryIdentityRepository::new()));
        let store = self.store.unwrap_or_else(|| Arc::new(MemoryStore::new()));
        let rng = self.rng.unwrap_or_else(|| Arc::new(SeededRandom::from_entropy()));

        let auth = AuthService::new(identities);
        if self.seed_test_identity {
            auth.ensure_registered(SignupCredentials::new(TEST_EMAIL, TEST_PASSWORD, TEST_USERNAME))
                .await?;
        }

        Ok(MockBackend {
            auth,
            session: SessionPersistence::new(store),
            rng,
            latency: self.latency,
        })
    }
}

impl MockBackend {
    pub fn builder() -> MockBackendBuilder {
        MockBackendBuilder::default()
    }

    fn issue_token() -> String {
        format!("mock-token-{}", Uuid::new_v4().simple())
    }

    async fn open_session(&self, user: Identity) -> Result<AuthResponse, BackendError> {
        let auth = AuthResponse { user, token: Self::issue_token() };
        self.session.save(&auth).await?;
        Ok(auth)
    }
}

#[async_trait]
impl Backend for MockBackend {
    #[instrument(skip(self, credentials), fields(email = %credentials.email))]
    async fn login(&self, credentials: LoginCredentials) -> Result<AuthResponse, BackendError> {
        self.latency.simulate(Operation::Login).await;
        let user = self.auth.authenticate(credentials).await?;
        let auth = self.open_session(user).await?;
        info!(user_id = %auth.user.id, "user_logged_in");
        Ok(auth)
    }

    #[instrument(skip(self, credentials), fields(email = %credentials.email))]
    async fn signup(&self, credentials: SignupCredentials) -> Result<AuthResponse, BackendError> {
        self.latency.simulate(Operation::Signup).await;
        let user = self.auth.register(credentials).await?;
        let auth = self.open_session(user).await?;
        info!(user_id = %auth.user.id, "user_signed_up");
        Ok(auth)
    }

    #[instrument(skip(self))]
    async fn logout(&self) -> Result<(), BackendError> {
        self.latency.simulate(Operation::Logout).await;
        self.session.clear().await?;
        info!("user_logged_out");
        Ok(())
    }

    async fn current_user(&self) -> Option<Identity> {
        self.latency.simulate(Operation::CurrentUser).await;
        self.session.active_user().await
    }

    async fn is_authenticated(&self) -> bool {
        self.session.is_active().await
    }

    #[instrument(skip(self, file), fields(file_name = %file.file_name, bytes = file.len()))]
    async fn analyze_resume(&self, file: &ResumeFile) -> Result<ResumeScore, BackendError> {
        self.latency.simulate(Operation::AnalyzeResume).await;
        let score = scoring::score_resume(self.rng.as_ref());
        info!(overall = score.overall, "resume_analyzed");
        Ok(score)
    }

    async fn job_recommendations(&self, _score: Option<&ResumeScore>) -> Result<Vec<JobListing>, BackendError> {
        self.latency.simulate(Operation::JobRecommendations).await;
        Ok(catalog::jobs().to_vec())
    }

    #[instrument(skip(self))]
    async fn apply_to_job(&self, job_id: &str) -> Result<ApplicationResult, BackendError> {
        self.latency.simulate(Operation::ApplyToJob).await;
        info!(job_id, "job_application_submitted");
        Ok(ApplicationResult { success: true, message: catalog::APPLICATION_SUBMITTED.to_string() })
    }
}

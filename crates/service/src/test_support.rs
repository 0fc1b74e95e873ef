#![cfg(test)]
use std::sync::Arc;

use models::{Identity, ResumeFile};

use crate::backend::MockBackend;
use crate::errors::BackendError;
use crate::latency::LatencyProfile;
use crate::random::SeededRandom;
use crate::storage::MemoryStore;

/// Mock backend without delays, with a seeded RNG and an inspectable
/// session store.
pub async fn instant_mock() -> Result<(MockBackend, Arc<MemoryStore>), BackendError> {
    let store = Arc::new(MemoryStore::new());
    let backend = MockBackend::builder()
        .latency(LatencyProfile::instant())
        .random(Arc::new(SeededRandom::from_seed(42)))
        .store(store.clone())
        .build()
        .await?;
    Ok((backend, store))
}

pub fn identity(id: &str, email: &str) -> Identity {
    Identity {
        id: id.into(),
        email: email.into(),
        username: "TestUser".into(),
        created_at: chrono::Utc::now(),
    }
}

pub fn resume_pdf() -> ResumeFile {
    ResumeFile::new("resume.pdf", Some("application/pdf".into()), &b"test content"[..])
}

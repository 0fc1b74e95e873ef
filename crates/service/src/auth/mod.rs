//! Auth module: three-layer architecture (domain, repository, service).
//!
//! Identity records and credential checks live here; token issuance and
//! session persistence belong to the backends.

pub mod domain;
pub mod repository;
pub mod service;
pub mod repo;

pub use repository::IdentityRepository;
pub use service::AuthService;

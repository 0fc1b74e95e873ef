//! Domain records shared by the backend implementations, the session holder
//! and the HTTP API.
//!
//! Field names on the wire follow the JSON contract the web client speaks
//! (`createdAt`, `matchScore`, `postedAt`, `type`).

pub mod errors;
pub mod job;
pub mod resume;
pub mod user;

pub use job::{ApplicationResult, JobListing, JobType};
pub use resume::{CategoryScores, ResumeFile, ResumeScore};
pub use user::{AuthResponse, Identity, LoginCredentials, SignupCredentials};

//! Identity repository implementations beyond the in-memory one.

pub mod file;

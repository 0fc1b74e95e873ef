pub mod auth;
pub mod errors;
pub mod openapi;
pub mod routes;
pub mod startup;
pub mod state;
pub mod tokens;

pub use startup::run;

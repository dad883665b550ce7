pub mod agents;
pub mod auth;

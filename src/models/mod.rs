//! Data models for the visits server

pub mod user;
pub mod visit;

// Re-export commonly used types
pub use user::{Claims, User, UserResource};
pub use visit::{Visit, VisitResource};

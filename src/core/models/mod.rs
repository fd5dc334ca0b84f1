//! Domain documents as stored in the document store
//!
//! Field names are camelCase to match the persisted documents. Multi-valued
//! association fields use [`MultiValued`](crate::auth::rbac::MultiValued)
//! because stored data carries them either as arrays or comma-joined strings.

mod application;
mod job;
mod lab;
mod user;

pub use application::Application;
pub use job::Job;
pub use lab::Lab;
pub use user::User;

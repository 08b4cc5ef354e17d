//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! `session` owns persisted credentials and is plain Rust; `auth` wraps it in
//! reactive context for components and guards.

pub mod auth;
pub mod session;

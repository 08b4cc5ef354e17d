//! Route-level and component-level access guards.
//!
//! ARCHITECTURE
//! ============
//! `policy` holds the pure decisions; `auth_gate` and `role_gate` wrap them in
//! components that perform the resulting navigation as a side effect.

pub mod auth_gate;
pub mod policy;
pub mod role_gate;

pub use auth_gate::{AuthGate, GateState};
pub use policy::{Access, RoleGateOptions, RoleMatch, RoleRequirement};
pub use role_gate::RoleGate;

//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration. Access control lives in the
//! guards; pages assume the route guard has already admitted the user.

pub mod access_denied;
pub mod home;
pub mod login;
pub mod not_found;
pub mod section;

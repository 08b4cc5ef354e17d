//! Networking modules for the back-office REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` performs bearer-authenticated REST calls, `resources` names the
//! business collections behind them, `types` defines the wire schema, and
//! `error` the failure taxonomy shared by all of them.

pub mod api;
pub mod error;
pub mod resources;
pub mod types;

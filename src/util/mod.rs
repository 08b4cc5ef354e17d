//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns (persisted storage,
//! wall-clock time, token payloads) from page and guard logic to improve reuse
//! and testability.

pub mod storage;
pub mod token;

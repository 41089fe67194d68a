//! Inbound protocol message types.
//!
//! # Protocol Overview
//!
//! | Message Type | Direction | Purpose |
//! |--------------|-----------|---------|
//! | `Request` | Caller → tab-bridge | Operation call |
//! | `Response` | tab-bridge → Caller | Success payload or typed failure |
//!
//! A [`Request`] is decoded into a typed [`Command`] before dispatch; decoding
//! failures become error responses like any other failure.

// ============================================================================
// Submodules
// ============================================================================

/// Typed commands.
pub mod command;

/// Request and Response message types.
pub mod request;

// ============================================================================
// Re-exports
// ============================================================================

pub use command::Command;
pub use request::{Request, Response, ResponseType};

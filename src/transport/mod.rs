//! Request transport.
//!
//! Callers talk to the driver over newline-delimited JSON on a pair of byte
//! streams, normally the process's stdin and stdout.
//!
//! ```text
//! ┌─────────────────┐     stdin: Request per line    ┌─────────────────┐
//! │  Caller         │───────────────────────────────►│  StdioServer    │
//! │                 │◄───────────────────────────────│  → Driver       │
//! └─────────────────┘    stdout: Response per line   └─────────────────┘
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `server` | Line-delimited JSON request loop |

// ============================================================================
// Submodules
// ============================================================================

/// Line-delimited JSON server.
pub mod server;

// ============================================================================
// Re-exports
// ============================================================================

pub use server::StdioServer;

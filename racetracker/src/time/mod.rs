//! Time provider abstraction for real and test execution.
//!
//! This module provides a unified interface for the timed suspension used
//! by the advance loop, so the same code runs against real wall-clock time
//! in the application and against Tokio's paused clock in tests.

/// Core time provider trait and implementations
pub mod provider;

// Re-export main types
pub use provider::{TimeProvider, TokioTimeProvider};

//! Diagnostics raised while checking a Stella program.
//!
//! This module defines the single error type shared by every phase:
//!
//! - `Error` pairs a diagnostic kind with the span of the offending node
//! - `ErrorImpl` enumerates the diagnostic kinds, one conformance tag each
//! - Rendering of the `Type Error Tag: [...]` report

pub mod errors;

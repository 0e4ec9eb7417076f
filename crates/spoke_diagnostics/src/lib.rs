//! Diagnostic creation, severity management, and terminal rendering.
//!
//! This crate provides structured [`Diagnostic`] messages with severity levels,
//! codes, an optional subject node, and notes. The thread-safe
//! [`DiagnosticSink`] accumulates diagnostics while a simulation or an
//! episode runs, and [`DiagnosticRenderer`] implementations format them for
//! the terminal. Diagnostics are serde-serializable for JSON output.

#![warn(missing_docs)]

pub mod code;
pub mod diagnostic;
pub mod renderer;
pub mod severity;
pub mod sink;

pub use code::{Category, DiagnosticCode};
pub use diagnostic::Diagnostic;
pub use renderer::{DiagnosticRenderer, TerminalRenderer};
pub use severity::Severity;
pub use sink::DiagnosticSink;

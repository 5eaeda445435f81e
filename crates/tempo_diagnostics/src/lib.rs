//! Diagnostic creation, severity management and rendering.
//!
//! Tempo reports suspicious project data (duplicate profile names, shadowed
//! via overrides, net classes pointing at missing profiles) as structured
//! [`Diagnostic`] values rather than hard errors. The thread-safe
//! [`DiagnosticSink`] accumulates them and a [`DiagnosticRenderer`] formats
//! them for the terminal or as JSON lines.

#![warn(missing_docs)]

pub mod code;
pub mod diagnostic;
pub mod renderer;
pub mod severity;
pub mod sink;

pub use code::{Category, DiagnosticCode};
pub use diagnostic::Diagnostic;
pub use renderer::{DiagnosticRenderer, JsonRenderer, TerminalRenderer};
pub use severity::Severity;
pub use sink::DiagnosticSink;

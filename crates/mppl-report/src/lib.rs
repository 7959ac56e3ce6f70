//! Diagnostic substrate shared by every MPPL compiler phase.
//!
//! A phase builds [`Report`] values (one primary location plus ordered
//! annotations) and hands them to the [`emit`] renderer, which draws a
//! colored, multi-line, indicator-connected source excerpt onto a styled
//! [`canvas::Canvas`] and flushes it to a writer.

pub mod canvas;
pub mod emit;
pub mod report;
pub mod term;

pub use emit::Emitter;
pub use report::{Annotation, Report, Severity};
pub use term::ColorChoice;

//! Common types and utilities for the chainc safe-access compiler.
//!
//! This crate provides foundational types used across all chainc crates:
//! - Source spans (`Span`)
//! - Line/column mapping for diagnostics (`LineMap`, `Position`)
//! - Diagnostic types and the message table
//! - Compiler limits and thresholds

// Span - Source location tracking (byte offsets)
pub mod span;
pub use span::Span;

// Position/Range types for line/column source locations
pub mod position;
pub use position::{LineMap, Position};

// Centralized limits and thresholds
pub mod limits;

// Diagnostics (types, codes, message table)
pub mod diagnostics;
pub use diagnostics::{
    Diagnostic, DiagnosticCategory, DiagnosticMessage, diagnostic_codes, diagnostic_messages,
    format_message, get_diagnostic_message, get_message_template,
};

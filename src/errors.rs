//! Error types with rich diagnostics using miette
//!
//! Size parse errors carry the offending text and a span so they render
//! nicely through miette's fancy reporter.

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

// ============================================================================
// Size Errors
// ============================================================================

/// Errors that occur while building a [`Size`](crate::Size)
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum SizeError {
    #[error("invalid size value: {reason}")]
    #[diagnostic(
        code(pedtree::size::invalid_value),
        help("use a number optionally followed by one of pt, in, cm, mm, px")
    )]
    InvalidValue {
        reason: String,
        #[source_code]
        src: String,
        #[label("here")]
        span: SourceSpan,
    },

    #[error("size value is not finite: {value}")]
    #[diagnostic(code(pedtree::size::non_finite))]
    NonFinite { value: f64 },

    #[error("invalid resolution: {dpi} dpi")]
    #[diagnostic(
        code(pedtree::size::invalid_dpi),
        help("resolution must be a positive finite number of pixels per inch")
    )]
    InvalidDpi { dpi: f64 },
}

impl SizeError {
    pub(crate) fn invalid(src: &str, span: impl Into<SourceSpan>, reason: impl Into<String>) -> Self {
        SizeError::InvalidValue {
            reason: reason.into(),
            src: src.to_string(),
            span: span.into(),
        }
    }
}

// ============================================================================
// Render Errors
// ============================================================================

/// Errors that occur while producing or inspecting rendered output
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("unknown text alignment: {mode:?}")]
    #[diagnostic(
        code(pedtree::render::unknown_alignment),
        help("alignment must be one of \"l\", \"c\" or \"r\"")
    )]
    UnknownAlignment { mode: String },

    #[error("truncated or malformed record at offset {offset}")]
    #[diagnostic(code(pedtree::render::truncated_record))]
    TruncatedRecord { offset: usize },

    #[error("XML serialization error: {message}")]
    #[diagnostic(code(pedtree::render::serialize))]
    Serialize { message: String },
}

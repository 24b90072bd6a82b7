//! Parse error types and diagnostics.
//!
//! Parsing is all-or-nothing: any of these errors aborts the snapshot
//! load, so a corrupt status file never presents partial data.

use std::path::PathBuf;

use thiserror::Error;

use crate::util::diagnostic::{suggestions, Diagnostic};

/// Error while loading or parsing a status file.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to read status file `{path}`")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unrecognized field `{header}`")]
    UnknownField {
        header: String,
        /// The raw field text the header came from
        raw: String,
    },

    #[error("field line has no `:` separator")]
    MalformedField { raw: String },

    #[error("invalid value for field `{field}`: {reason}")]
    FieldDecode {
        /// Canonical id of the offending field
        field: &'static str,
        reason: String,
        /// The raw value that failed to decode
        raw: String,
    },
}

impl ParseError {
    /// Wrap an I/O error with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ParseError::Io {
            path: path.into(),
            source,
        }
    }

    /// True for the I/O variant, which the snapshot cache treats
    /// differently from grammar errors (stale-entry fallback).
    pub fn is_io(&self) -> bool {
        matches!(self, ParseError::Io { .. })
    }

    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ParseError::Io { path, source } => {
                Diagnostic::error(format!("failed to read status file: {}", source))
                    .with_location(path.clone())
                    .with_suggestion(suggestions::STATUS_UNREADABLE)
            }

            ParseError::UnknownField { header, raw } => {
                Diagnostic::error(format!("unrecognized field `{}`", header))
                    .with_context(format!("in field text: {}", first_line(raw)))
                    .with_suggestion(suggestions::CHECK_STATUS)
            }

            ParseError::MalformedField { raw } => {
                Diagnostic::error("field line has no `:` separator")
                    .with_context(format!("in field text: {}", first_line(raw)))
                    .with_suggestion(suggestions::CHECK_STATUS)
            }

            ParseError::FieldDecode { field, reason, raw } => {
                Diagnostic::error(format!("invalid value for field `{}`", field))
                    .with_context(reason.clone())
                    .with_context(format!("raw value: {}", first_line(raw)))
                    .with_suggestion(suggestions::CHECK_STATUS)
            }
        }
    }
}

fn first_line(raw: &str) -> &str {
    raw.lines().next().unwrap_or(raw)
}

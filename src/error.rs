// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

use thiserror::Error;

/// Errors raised while building queries and request options.
///
/// Every error is reported at the point of misuse. Builders stage their
/// changes on a copy, so a failed call never leaves partial state behind.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SearchError {
    #[error("'{0}' is not a valid field name")]
    UnknownField(String),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),
    #[error("Invalid value for {kind} option '{key}': {reason}")]
    InvalidOption {
        kind: String,
        key: String,
        reason: String,
    },
    #[error("Can't boost the relevancy of an empty query")]
    EmptyQuery,
}

impl SearchError {
    pub(crate) fn invalid_option(
        kind: impl Into<String>,
        key: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidOption {
            kind: kind.into(),
            key: key.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T, E = SearchError> = std::result::Result<T, E>;

// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use super::llm::LLMError;

/// Every way a relay request can end without an answer.
///
/// The `Display` text of the client-side variants is the exact `error`
/// string callers see.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Missing prompt or messages")]
    MissingInput,

    #[error("Unsupported provider: {0}")]
    UnsupportedProvider(String),

    #[error("Invalid request body")]
    InvalidBody(String),

    #[error("Server error")]
    Upstream(#[from] LLMError),
}

impl RelayError {
    pub fn status_code(&self) -> u16 {
        match self {
            RelayError::Unauthorized => 403,
            RelayError::MissingInput
            | RelayError::UnsupportedProvider(_)
            | RelayError::InvalidBody(_) => 400,
            RelayError::Upstream(_) => 500,
        }
    }

    /// Extra context reported next to the error string, if any
    pub fn details(&self) -> Option<String> {
        match self {
            RelayError::InvalidBody(reason) => Some(reason.clone()),
            RelayError::Upstream(err) => Some(err.to_string()),
            _ => None,
        }
    }
}

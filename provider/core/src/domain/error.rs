// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Errors surfaced by the provider adapter. None of them are recovered locally;
// a single failure is final for that call.

use super::embedding::describe_errors;
use super::vendor::VendorError;

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// Configured chat model is outside the allow-list. Raised before any
    /// network call.
    #[error("{0} is not valid for chat completion!")]
    InvalidModel(String),

    /// Transport or vendor API failure
    #[error("{operation} failed with: {message}")]
    UpstreamCall {
        operation: &'static str,
        message: String,
    },

    /// Vendor answered but the response is missing the expected collection
    #[error("Unexpected response shape: {0}")]
    UpstreamProtocol(String),

    /// One or more embedding batches failed
    #[error("Failed to embed: {}", summarize(.errors))]
    EmbeddingAggregate { errors: Vec<VendorError> },
}

fn summarize(errors: &[VendorError]) -> String {
    format!("({}) Embedding Errors! {}", errors.len(), describe_errors(errors))
}

impl ProviderError {
    pub(crate) fn upstream(operation: &'static str, err: VendorError) -> Self {
        Self::UpstreamCall {
            operation,
            message: err.to_string(),
        }
    }
}

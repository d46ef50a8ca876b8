// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Embedding
//!
//! Batching and all-or-nothing aggregation for the embedding pipeline.
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Purpose:** Pure partition/aggregate logic; the fan-out itself lives in
//!   the application layer

use serde::{Deserialize, Serialize};

use super::vendor::VendorError;

/// One vector per input text, dimensionality fixed by the vendor model
pub type EmbeddingVector = Vec<f32>;

/// Vendor envelope around a single vector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding: Option<EmbeddingVector>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
}

impl EmbeddingItem {
    pub fn new(embedding: EmbeddingVector) -> Self {
        Self {
            embedding: Some(embedding),
            index: None,
        }
    }
}

/// Settled result of one batch request. A failed batch carries no data.
#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    pub data: Vec<EmbeddingItem>,
    pub error: Option<VendorError>,
}

impl BatchOutcome {
    pub fn succeeded(data: Vec<EmbeddingItem>) -> Self {
        Self { data, error: None }
    }

    pub fn failed(error: VendorError) -> Self {
        Self {
            data: Vec::new(),
            error: Some(error),
        }
    }
}

/// Split `texts` into consecutive, order-preserving slices of at most `limit`
/// elements. The last slice may be shorter. An empty input yields no slices.
pub fn partition_batches(texts: &[String], limit: usize) -> Vec<&[String]> {
    texts.chunks(limit.max(1)).collect()
}

/// Combine settled batches in dispatch order.
///
/// Any error poisons the whole sequence: every collected error is returned and
/// all data, including that of successful batches, is dropped.
pub fn aggregate_batches(outcomes: Vec<BatchOutcome>) -> Result<Vec<EmbeddingItem>, Vec<VendorError>> {
    let errors: Vec<VendorError> = outcomes
        .iter()
        .filter_map(|outcome| outcome.error.clone())
        .collect();

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(outcomes.into_iter().flat_map(|outcome| outcome.data).collect())
}

/// Strip the envelopes, or `None` if there is nothing usable: an empty
/// sequence or any item without an embedding.
pub fn unwrap_vectors(items: Vec<EmbeddingItem>) -> Option<Vec<EmbeddingVector>> {
    if items.is_empty() {
        return None;
    }

    items.into_iter().map(|item| item.embedding).collect()
}

/// Diagnostic listing used by the aggregate error message
pub fn describe_errors(errors: &[VendorError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

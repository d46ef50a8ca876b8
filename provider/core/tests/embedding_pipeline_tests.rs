// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Integration tests for the batched embedding pipeline.
//!
//! Covers partitioning at the chunk limit, order preservation when batches
//! complete out of order, the all-or-nothing failure policy, and the soft
//! "no usable embeddings" result.

mod common;

use common::{init_test_logging, numbered_texts, ScriptedVendor};
use llm_provider_core::{ProviderAdapter, ProviderConfig, ProviderError, VendorError};
use std::sync::atomic::Ordering;
use std::sync::Arc;

fn adapter(vendor: &Arc<ScriptedVendor>, chunk_limit: usize) -> ProviderAdapter {
    ProviderAdapter::new(
        vendor.clone(),
        ProviderConfig::new("sk-test").with_embedding_chunk_limit(chunk_limit),
    )
}

#[tokio::test]
async fn test_empty_input_issues_no_requests() {
    let vendor = Arc::new(ScriptedVendor::default());
    let result = adapter(&vendor, 1000).embed_chunks(&[]).await.unwrap();

    assert_eq!(result, Some(vec![]));
    assert_eq!(vendor.embed_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_partitions_at_chunk_limit() {
    let vendor = Arc::new(ScriptedVendor::default());
    let texts = numbered_texts(2345);

    let vectors = adapter(&vendor, 1000)
        .embed_chunks(&texts)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(vectors.len(), 2345);
    assert_eq!(vendor.embed_calls.load(Ordering::SeqCst), 3);

    let mut sizes = vendor.batch_sizes.lock().unwrap().clone();
    sizes.sort_unstable();
    assert_eq!(sizes, vec![345, 1000, 1000]);
}

#[tokio::test]
async fn test_exact_multiple_of_limit() {
    let vendor = Arc::new(ScriptedVendor::default());
    let texts = numbered_texts(20);

    adapter(&vendor, 10).embed_chunks(&texts).await.unwrap();

    assert_eq!(*vendor.batch_sizes.lock().unwrap(), vec![10, 10]);
}

#[tokio::test]
async fn test_output_order_ignores_completion_order() {
    init_test_logging();
    let vendor = Arc::new(ScriptedVendor {
        reverse_completion: true,
        ..Default::default()
    });
    let texts = numbered_texts(57);

    let vectors = adapter(&vendor, 10)
        .embed_chunks(&texts)
        .await
        .unwrap()
        .unwrap();

    let expected: Vec<Vec<f32>> = (0..57).map(|i| vec![i as f32]).collect();
    assert_eq!(vectors, expected);
    assert_eq!(vendor.batch_sizes.lock().unwrap().len(), 6);
}

#[tokio::test]
async fn test_single_failed_batch_discards_everything() {
    let vendor = Arc::new(ScriptedVendor::default());
    vendor.fail_batch_containing(
        "text-25",
        VendorError::new("server_error", "upstream overloaded"),
    );
    let texts = numbered_texts(50);

    let err = adapter(&vendor, 10).embed_chunks(&texts).await.unwrap_err();

    // Sibling batches were not cancelled
    assert_eq!(vendor.embed_calls.load(Ordering::SeqCst), 5);
    match err {
        ProviderError::EmbeddingAggregate { errors } => {
            assert_eq!(errors, vec![VendorError::new("server_error", "upstream overloaded")]);
        }
        other => panic!("expected aggregate error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_every_failure_is_reported() {
    let vendor = Arc::new(ScriptedVendor::default());
    vendor.fail_batch_containing("text-0", VendorError::new("invalid_request_error", "first"));
    vendor.fail_batch_containing("text-20", VendorError::new("server_error", "third"));
    let texts = numbered_texts(30);

    let err = adapter(&vendor, 10).embed_chunks(&texts).await.unwrap_err();

    assert_eq!(
        err.to_string(),
        "Failed to embed: (2) Embedding Errors! [invalid_request_error]: first, [server_error]: third"
    );
}

#[tokio::test]
async fn test_panicking_batch_is_captured_as_error() {
    let vendor = Arc::new(ScriptedVendor {
        panic_on: Some("text-3".into()),
        ..Default::default()
    });
    let texts = numbered_texts(8);

    let err = adapter(&vendor, 2).embed_chunks(&texts).await.unwrap_err();

    match err {
        ProviderError::EmbeddingAggregate { errors } => {
            assert_eq!(errors.len(), 1);
            assert_eq!(errors[0].kind, "task_panicked");
        }
        other => panic!("expected aggregate error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_vectors_yield_none() {
    let vendor = Arc::new(ScriptedVendor {
        strip_embeddings: true,
        ..Default::default()
    });
    let texts = numbered_texts(3);

    let result = adapter(&vendor, 1000).embed_chunks(&texts).await.unwrap();
    assert_eq!(result, None);
}

#[tokio::test]
async fn test_embed_text_input() {
    let vendor = Arc::new(ScriptedVendor::default());
    let vector = adapter(&vendor, 1000).embed_text_input("text-7").await.unwrap();
    assert_eq!(vector, vec![7.0]);

    let stripped = Arc::new(ScriptedVendor {
        strip_embeddings: true,
        ..Default::default()
    });
    let vector = adapter(&stripped, 1000).embed_text_input("text-7").await.unwrap();
    assert!(vector.is_empty());
}

#[tokio::test]
async fn test_embed_text_input_propagates_failure() {
    let vendor = Arc::new(ScriptedVendor::default());
    vendor.fail_batch_containing("boom", VendorError::new("network", "connection refused"));

    let err = adapter(&vendor, 1000).embed_text_input("boom").await.unwrap_err();
    assert!(matches!(err, ProviderError::EmbeddingAggregate { .. }));
}

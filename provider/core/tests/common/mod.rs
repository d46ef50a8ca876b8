// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Scripted vendor used by the adapter integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use llm_provider_core::domain::vendor::{
    ChatCompletionRequest, ChatCompletionResponse, EmbeddingRequest, EmbeddingResponse,
    ModerationRequest, ModerationResponse,
};
use llm_provider_core::{EmbeddingItem, VendorClient, VendorError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Texts named `text-<i>`; the fake embeds each as `[i]`.
pub fn numbered_texts(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("text-{i}")).collect()
}

fn text_index(text: &str) -> Option<usize> {
    text.strip_prefix("text-")?.parse().ok()
}

#[derive(Default)]
pub struct ScriptedVendor {
    pub moderation_calls: AtomicUsize,
    pub chat_calls: AtomicUsize,
    pub embed_calls: AtomicUsize,

    /// Sizes of the embedding batches received, in arrival order
    pub batch_sizes: Mutex<Vec<usize>>,

    pub moderation_reply: Mutex<Option<Result<ModerationResponse, VendorError>>>,
    pub chat_reply: Mutex<Option<Result<ChatCompletionResponse, VendorError>>>,

    /// A batch containing this text fails with the paired error
    pub fail_batch_with: Mutex<Vec<(String, VendorError)>>,

    /// A batch containing this text panics inside its task
    pub panic_on: Option<String>,

    /// Earlier batches sleep longer, so batches complete in reverse order
    pub reverse_completion: bool,

    /// Return envelopes without the embedding field
    pub strip_embeddings: bool,
}

impl ScriptedVendor {
    pub fn fail_batch_containing(&self, text: &str, error: VendorError) {
        self.fail_batch_with
            .lock()
            .unwrap()
            .push((text.to_string(), error));
    }

    pub fn total_calls(&self) -> usize {
        self.moderation_calls.load(Ordering::SeqCst)
            + self.chat_calls.load(Ordering::SeqCst)
            + self.embed_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VendorClient for ScriptedVendor {
    async fn moderate(&self, _request: ModerationRequest) -> Result<ModerationResponse, VendorError> {
        self.moderation_calls.fetch_add(1, Ordering::SeqCst);
        self.moderation_reply
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Ok(ModerationResponse::default()))
    }

    async fn chat_complete(
        &self,
        _request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, VendorError> {
        self.chat_calls.fetch_add(1, Ordering::SeqCst);
        self.chat_reply
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Ok(ChatCompletionResponse::default()))
    }

    async fn embed(&self, request: EmbeddingRequest) -> Result<EmbeddingResponse, VendorError> {
        self.embed_calls.fetch_add(1, Ordering::SeqCst);
        self.batch_sizes.lock().unwrap().push(request.input.len());

        if self.reverse_completion {
            let first = request.input.first().and_then(|t| text_index(t)).unwrap_or(0);
            let delay = 200u64.saturating_sub(first as u64);
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }

        if let Some(marker) = &self.panic_on {
            if request.input.contains(marker) {
                panic!("scripted panic for {marker}");
            }
        }

        let failure = self
            .fail_batch_with
            .lock()
            .unwrap()
            .iter()
            .find(|(marker, _)| request.input.contains(marker))
            .map(|(_, error)| error.clone());
        if let Some(error) = failure {
            return Err(error);
        }

        let data = request
            .input
            .iter()
            .enumerate()
            .map(|(i, text)| EmbeddingItem {
                embedding: (!self.strip_embeddings)
                    .then(|| vec![text_index(text).unwrap_or(i) as f32]),
                index: Some(i),
            })
            .collect();

        Ok(EmbeddingResponse { data: Some(data) })
    }
}

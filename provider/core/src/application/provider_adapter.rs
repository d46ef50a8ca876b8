// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Provider Adapter
//!
//! Caller-facing operations over a [`VendorClient`].
//!
//! # Architecture
//!
//! - **Layer:** Application Layer
//! - **Purpose:** Moderation and chat request/response mapping, plus the
//!   concurrent, all-or-nothing embedding pipeline

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::domain::chat::{
    is_supported_chat_model, ChatMessage, ChatOptions, FALLBACK_CHAT_MODEL,
};
use crate::domain::config::ProviderConfig;
use crate::domain::embedding::{
    aggregate_batches, partition_batches, unwrap_vectors, BatchOutcome, EmbeddingVector,
};
use crate::domain::error::ProviderError;
use crate::domain::moderation::ModerationResult;
use crate::domain::vendor::{
    ChatCompletionRequest, EmbeddingRequest, ModerationRequest, VendorClient, VendorError,
};
use crate::infrastructure::openai::OpenAiClient;

pub struct ProviderAdapter {
    client: Arc<dyn VendorClient>,
    config: ProviderConfig,
}

impl ProviderAdapter {
    pub fn new(client: Arc<dyn VendorClient>, config: ProviderConfig) -> Self {
        Self { client, config }
    }

    /// Adapter backed by the HTTP vendor client built from `config`
    pub fn from_config(config: ProviderConfig) -> anyhow::Result<Self> {
        config.validate()?;
        let client = OpenAiClient::from_config(&config)?;
        Ok(Self::new(Arc::new(client), config))
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    pub fn is_valid_chat_model(&self, model: &str) -> bool {
        is_supported_chat_model(model)
    }

    /// Classify `input` with the vendor moderation endpoint
    pub async fn check_safety(&self, input: &str) -> Result<ModerationResult, ProviderError> {
        let response = self
            .client
            .moderate(ModerationRequest {
                input: input.to_string(),
            })
            .await
            .map_err(|e| {
                error!("Moderation request failed: {}", e);
                ProviderError::upstream("createModeration", e)
            })?;

        let results = response.results.ok_or_else(|| {
            ProviderError::UpstreamProtocol("moderation response has no results".into())
        })?;

        let entry = results.into_iter().next().ok_or_else(|| {
            ProviderError::UpstreamProtocol("moderation response results are empty".into())
        })?;

        Ok(ModerationResult::from_categories(entry.flagged, &entry.categories))
    }

    /// Single chat completion with the configured model.
    ///
    /// The vendor receives an empty system message, then `history` in order,
    /// then `prompt` as the final user message.
    pub async fn send_chat(
        &self,
        history: &[ChatMessage],
        prompt: &str,
        options: &ChatOptions,
    ) -> Result<String, ProviderError> {
        let model = self.config.chat_model.clone().unwrap_or_default();
        if !self.is_valid_chat_model(&model) {
            return Err(ProviderError::InvalidModel(model));
        }

        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(ChatMessage::system(""));
        messages.extend_from_slice(history);
        messages.push(ChatMessage::user(prompt));

        let request = ChatCompletionRequest {
            model,
            messages,
            temperature: options.resolved_temperature(),
            n: Some(1),
        };
        debug!(model = %request.model, messages = request.messages.len(), "Sending chat completion");

        let response = self.client.chat_complete(request).await.map_err(|e| {
            error!("Chat completion failed: {}", e);
            ProviderError::upstream("createChatCompletion", e)
        })?;

        let choices = response.choices.ok_or_else(|| {
            ProviderError::UpstreamProtocol("chat response has no choices".into())
        })?;

        let choice = choices.into_iter().next().ok_or_else(|| {
            ProviderError::UpstreamProtocol("chat response choices are empty".into())
        })?;

        Ok(choice.message.content.unwrap_or_default())
    }

    /// Permissive sibling of [`send_chat`](Self::send_chat): `messages` are sent
    /// as given, the model falls back to `gpt-3.5-turbo` instead of being
    /// validated, and a response without choices yields `None`.
    pub async fn get_chat_completion(
        &self,
        messages: &[ChatMessage],
        options: &ChatOptions,
    ) -> Result<Option<String>, ProviderError> {
        let model = self
            .config
            .chat_model
            .clone()
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| FALLBACK_CHAT_MODEL.to_string());

        let request = ChatCompletionRequest {
            model,
            messages: messages.to_vec(),
            temperature: options.resolved_temperature(),
            n: None,
        };

        let response = self
            .client
            .chat_complete(request)
            .await
            .map_err(|e| ProviderError::upstream("createChatCompletion", e))?;

        Ok(response
            .choices
            .and_then(|choices| choices.into_iter().next())
            .map(|choice| choice.message.content.unwrap_or_default()))
    }

    /// Embed a single text. Returns an empty vector when the pipeline yields
    /// nothing usable.
    pub async fn embed_text_input(&self, text: &str) -> Result<EmbeddingVector, ProviderError> {
        let vectors = self.embed_chunks(&[text.to_string()]).await?;
        Ok(vectors
            .and_then(|v| v.into_iter().next())
            .unwrap_or_default())
    }

    /// Embed every text, index for index.
    ///
    /// Texts are split into batches of at most `embedding_chunk_limit`, one
    /// request per batch, all in flight at once. Every batch settles before
    /// the result is decided; if any failed, nothing is returned. `Ok(None)`
    /// means the vendor answered but produced no usable vectors.
    pub async fn embed_chunks(
        &self,
        text_chunks: &[String],
    ) -> Result<Option<Vec<EmbeddingVector>>, ProviderError> {
        if text_chunks.is_empty() {
            return Ok(Some(Vec::new()));
        }

        let batches = partition_batches(text_chunks, self.config.embedding_chunk_limit);
        debug!(
            texts = text_chunks.len(),
            batches = batches.len(),
            "Dispatching embedding batches"
        );

        let handles: Vec<_> = batches
            .into_iter()
            .map(|batch| {
                let client = Arc::clone(&self.client);
                let request = EmbeddingRequest {
                    model: self.config.embedding_model.clone(),
                    input: batch.to_vec(),
                };
                tokio::spawn(async move {
                    match client.embed(request).await {
                        Ok(response) => BatchOutcome::succeeded(response.data.unwrap_or_default()),
                        Err(e) => BatchOutcome::failed(e),
                    }
                })
            })
            .collect();

        // join_all keeps dispatch order, so completion order never reaches the output
        let outcomes: Vec<BatchOutcome> = futures::future::join_all(handles)
            .await
            .into_iter()
            .map(|joined| {
                joined.unwrap_or_else(|e| {
                    BatchOutcome::failed(VendorError::new("task_panicked", e.to_string()))
                })
            })
            .collect();

        let items = aggregate_batches(outcomes).map_err(|errors| {
            warn!(errors = errors.len(), "Embedding aborted, discarding all batches");
            ProviderError::EmbeddingAggregate { errors }
        })?;

        let vectors = unwrap_vectors(items);
        match &vectors {
            Some(v) => info!(vectors = v.len(), "Embedding complete"),
            None => warn!("Embedding response contained no usable vectors"),
        }

        Ok(vectors)
    }
}

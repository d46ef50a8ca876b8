// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Vendor
//!
//! Narrow port over the upstream vendor API.
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Purpose:** Anti-Corruption Layer boundary. The adapter only ever talks
//!   to these three calls; the HTTP implementation lives in
//!   `infrastructure::openai` and tests substitute a scripted fake.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::chat::ChatMessage;
use super::embedding::EmbeddingItem;

/// The three vendor endpoints the adapter depends on
#[async_trait]
pub trait VendorClient: Send + Sync {
    /// Classify `request.input` for unsafe content
    async fn moderate(&self, request: ModerationRequest) -> Result<ModerationResponse, VendorError>;

    /// Produce completion candidates for a message sequence
    async fn chat_complete(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, VendorError>;

    /// Embed one batch of texts
    async fn embed(&self, request: EmbeddingRequest) -> Result<EmbeddingResponse, VendorError>;
}

/// Error reported by the vendor or by the transport underneath it.
///
/// `kind` mirrors the vendor's `error.type` field; transport failures use
/// synthetic kinds such as `network` or `invalid_response`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
#[error("[{kind}]: {message}")]
pub struct VendorError {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub message: String,
}

impl VendorError {
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ModerationRequest {
    pub input: String,
}

/// `results` stays optional so a missing collection can be told apart from an
/// empty one.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModerationResponse {
    #[serde(default)]
    pub results: Option<Vec<ModerationEntry>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModerationEntry {
    #[serde(default)]
    pub flagged: bool,

    /// Category name -> flag, in vendor order
    #[serde(default)]
    pub categories: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Option<Vec<ChatChoice>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmbeddingRequest {
    pub model: String,
    pub input: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmbeddingResponse {
    #[serde(default)]
    pub data: Option<Vec<EmbeddingItem>>,
}

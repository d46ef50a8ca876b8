// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Chat
//!
//! Conversation types shared by the chat completion operations.
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Purpose:** Message history, per-call options and the chat model allow-list

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Chat models accepted by `send_chat`
pub const SUPPORTED_CHAT_MODELS: [&str; 2] = ["gpt-4", "gpt-3.5-turbo"];

/// Model used by `get_chat_completion` when none is configured
pub const FALLBACK_CHAT_MODEL: &str = "gpt-3.5-turbo";

/// Sampling temperature used when the caller supplies nothing usable
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Returns true if `model` is in the chat model allow-list
pub fn is_supported_chat_model(model: &str) -> bool {
    SUPPORTED_CHAT_MODELS.contains(&model)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// One entry of a conversation. History order is chronological.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Per-call chat options.
///
/// `temperature` is kept as raw JSON because it usually comes straight out of
/// stored workspace settings, where it may be a number or a numeric string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<Value>,
}

impl ChatOptions {
    pub fn with_temperature(temperature: f32) -> Self {
        Self {
            temperature: Some(Value::from(temperature)),
        }
    }

    /// Coerce the configured temperature to a number, falling back to
    /// [`DEFAULT_TEMPERATURE`] when it is unset or not numeric.
    pub fn resolved_temperature(&self) -> f32 {
        let coerced = match &self.temperature {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
            _ => None,
        };

        coerced
            .filter(|t| t.is_finite())
            .map(|t| t as f32)
            .unwrap_or(DEFAULT_TEMPERATURE)
    }
}

// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Domain layer: provider-neutral types, the vendor port and the error taxonomy.

pub mod chat;
pub mod config;
pub mod embedding;
pub mod error;
pub mod moderation;
pub mod vendor;

pub use chat::{ChatMessage, ChatOptions, ChatRole};
pub use config::ProviderConfig;
pub use embedding::{BatchOutcome, EmbeddingItem, EmbeddingVector};
pub use error::ProviderError;
pub use moderation::ModerationResult;
pub use vendor::{VendorClient, VendorError};

// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Lib
//!
//! Typed adapter over a single LLM vendor API.
//!
//! # Architecture
//!
//! - **Layer:** Core System
//! - **Purpose:** Moderation, chat completion and batched embeddings behind one
//!   [`ProviderAdapter`](application::ProviderAdapter)

pub mod domain;
pub mod application;
pub mod infrastructure;

pub use domain::*;
pub use application::ProviderAdapter;
pub use infrastructure::OpenAiClient;

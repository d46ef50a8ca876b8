// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Vendor Infrastructure - Anti-Corruption Layer Implementations
//
// Translates between the domain VendorClient port and the vendor's HTTP API.

pub mod openai;

pub use openai::OpenAiClient;

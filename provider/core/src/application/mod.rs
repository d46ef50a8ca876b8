// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

pub mod provider_adapter;

pub use provider_adapter::ProviderAdapter;

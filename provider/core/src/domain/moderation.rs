// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Moderation verdict as surfaced to callers.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModerationResult {
    pub safe: bool,

    /// Human-readable names of the flagged categories. Empty when safe.
    pub reasons: Vec<String>,
}

impl ModerationResult {
    pub fn safe() -> Self {
        Self {
            safe: true,
            reasons: Vec::new(),
        }
    }

    /// Build a verdict from the vendor's `flagged` bit and category map.
    ///
    /// Only categories whose value is exactly `true` become reasons, in the
    /// order the vendor listed them.
    pub fn from_categories(flagged: bool, categories: &Map<String, Value>) -> Self {
        if !flagged {
            return Self::safe();
        }

        let reasons = categories
            .iter()
            .filter(|(_, value)| matches!(value, Value::Bool(true)))
            .map(|(category, _)| humanize_category(category))
            .collect();

        Self {
            safe: false,
            reasons,
        }
    }
}

/// "violence/graphic" -> "violence or graphic"
fn humanize_category(category: &str) -> String {
    category.replacen('/', " or ", 1)
}

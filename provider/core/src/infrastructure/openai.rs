// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// OpenAI Vendor Client
//
// Anti-Corruption Layer for the OpenAI REST API.
// Also works with OpenAI-compatible APIs that expose the same three endpoints.

use crate::domain::config::ProviderConfig;
use crate::domain::vendor::{
    ChatCompletionRequest, ChatCompletionResponse, EmbeddingRequest, EmbeddingResponse,
    ModerationRequest, ModerationResponse, VendorClient, VendorError,
};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub struct OpenAiClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

/// Error body returned by the API on non-2xx responses
#[derive(Deserialize)]
struct ApiErrorBody {
    error: VendorError,
}

impl OpenAiClient {
    pub fn new(endpoint: String, api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
            api_key,
        }
    }

    pub fn from_config(config: &ProviderConfig) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
        })
    }

    async fn post<Req, Resp>(&self, path: &str, body: &Req) -> Result<Resp, VendorError>
    where
        Req: Serialize + Sync,
        Resp: DeserializeOwned + Send,
    {
        let url = format!("{}/{}", self.endpoint.trim_end_matches('/'), path);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(body)
            .send()
            .await
            .map_err(|e| VendorError::new("network", e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(match serde_json::from_str::<ApiErrorBody>(&error_text) {
                Ok(body) => body.error,
                Err(_) => VendorError::new(format!("http_{}", status.as_u16()), error_text),
            });
        }

        response
            .json()
            .await
            .map_err(|e| VendorError::new("invalid_response", format!("Failed to parse response: {}", e)))
    }
}

#[async_trait]
impl VendorClient for OpenAiClient {
    async fn moderate(&self, request: ModerationRequest) -> Result<ModerationResponse, VendorError> {
        self.post("moderations", &request).await
    }

    async fn chat_complete(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, VendorError> {
        self.post("chat/completions", &request).await
    }

    async fn embed(&self, request: EmbeddingRequest) -> Result<EmbeddingResponse, VendorError> {
        self.post("embeddings", &request).await
    }
}

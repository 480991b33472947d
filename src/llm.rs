// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::env;
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde::Serialize;

use crate::error::Error;
use crate::error::Fallible;

const DEFAULT_API_URL: &str = "http://localhost:11434/api/generate";
const DEFAULT_MODEL: &str = "llama3.1:latest";

/// How long to wait for the endpoint before giving up. Local models can be
/// slow to load on the first request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Configuration for the local text generation endpoint. Read once at
/// startup and passed explicitly.
#[derive(Clone, Debug)]
pub struct LlmConfig {
    pub api_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f64,
}

impl LlmConfig {
    pub fn from_env() -> Self {
        Self {
            api_url: env::var("API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            model: env::var("MODEL_NAME").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            max_tokens: 300,
            temperature: 0.7,
        }
    }
}

pub struct LlmClient {
    config: LlmConfig,
    client: Client,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    max_tokens: u32,
    temperature: f64,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

impl LlmClient {
    pub fn new(config: LlmConfig) -> Fallible<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::Generation(format!("could not build HTTP client: {e}")))?;
        Ok(Self { config, client })
    }

    /// Send a prompt to the generation endpoint and return the generated
    /// text.
    pub async fn generate(&self, prompt: &str) -> Fallible<String> {
        let request = GenerateRequest {
            model: &self.config.model,
            prompt,
            stream: false,
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };
        log::debug!(
            "Requesting completion from {} with model {}.",
            self.config.api_url,
            self.config.model
        );
        let response = self
            .client
            .post(&self.config.api_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                Error::Generation(format!("request to {} failed: {e}", self.config.api_url))
            })?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Generation(format!(
                "endpoint returned {status}: {body}"
            )));
        }
        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| Error::Generation(format!("could not decode response: {e}")))?;
        Ok(body.response)
    }
}

//! # API Module
//!
//! This module handles interactions with the remote description/embedding
//! service: turning an image into a caption, and turning text into a vector.
//!
//! Both operations are plain HTTP POSTs against the service rooted at
//! `MemeVaultConfig::api_base`. Any transport error or non-success status is
//! surfaced as a typed failure with no partial result, and no call is ever
//! retried here; retry, if desired, is a caller-level concern.
//!
//! # Example
//!
//! ```no_run
//! use meme_vault::api::EmbeddingClient;
//! use meme_vault::config::MemeVaultConfig;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = MemeVaultConfig {
//!     api_base: "http://localhost:8000/memeselector".to_string(),
//!     api_key: String::new(),
//! };
//! let client = EmbeddingClient::new(&config)?;
//! let vector = client.embed("confused guy looking at butterfly").await?;
//! println!("{} dimensions", vector.len());
//! # Ok(()) }
//! ```

use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tracing::debug;

use crate::config::MemeVaultConfig;
use crate::error::VaultError;

/// Path of the image description endpoint, relative to `api_base`.
const DESCRIBE_PATH: &str = "/describe-image";

/// Path of the text embedding endpoint, relative to `api_base`.
const EMBED_PATH: &str = "/embed-text";

#[derive(Debug, Deserialize)]
struct DescriptionResponse {
    description: String,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    vector: Vec<f32>,
}

/// Client for the two remote model endpoints.
///
/// Stateless: operations may run concurrently for independent inputs. The
/// index builder still calls them strictly describe-then-embed per file,
/// because the embed input is the describe output.
#[derive(Debug, Clone)]
pub struct EmbeddingClient {
    http: reqwest::Client,
    api_base: String,
    api_key: String,
}

impl EmbeddingClient {
    /// Creates a new client from configuration.
    ///
    /// # Parameters
    /// - `config: &MemeVaultConfig`: Configuration containing the service
    ///   base URL and optional API key.
    ///
    /// # Returns
    /// - `Result<EmbeddingClient, VaultError>`: Created client or an error if
    ///   the underlying HTTP client fails to initialize.
    pub fn new(config: &MemeVaultConfig) -> Result<Self, VaultError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| VaultError::Io(std::io::Error::other(e)))?;

        debug!("Client created for {}", config.api_base);

        Ok(Self {
            http,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    fn post(&self, url: &str) -> reqwest::RequestBuilder {
        let request = self.http.post(url);
        if self.api_key.is_empty() {
            request
        } else {
            request.bearer_auth(&self.api_key)
        }
    }

    /// Sends raw image bytes to the description endpoint and returns the
    /// generated caption.
    ///
    /// # Parameters
    /// - `file_name: &str`: Name the image is uploaded under; also used to
    ///   guess its MIME type.
    /// - `image: Vec<u8>`: The raw image payload.
    ///
    /// # Returns
    /// - `Ok(String)`: The caption.
    /// - `Err(VaultError::Describe)`: The call did not succeed, carrying no
    ///   partial result.
    pub async fn describe(&self, file_name: &str, image: Vec<u8>) -> Result<String, VaultError> {
        let mime = mime_guess::from_path(file_name).first_or_octet_stream();
        let part = Part::bytes(image)
            .file_name(file_name.to_string())
            .mime_str(mime.essence_str())
            .map_err(|e| VaultError::Describe(e.to_string()))?;
        let form = Form::new().part("file", part);

        let url = format!("{}{DESCRIBE_PATH}", self.api_base);
        debug!("Requesting description: {url}");

        let response = self
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| VaultError::Describe(e.to_string()))?;

        if !response.status().is_success() {
            return Err(VaultError::Describe(format!(
                "{url} returned {}",
                response.status()
            )));
        }

        let body: DescriptionResponse = response
            .json()
            .await
            .map_err(|e| VaultError::Describe(e.to_string()))?;

        Ok(body.description)
    }

    /// Sends text to the embedding endpoint and returns its vector.
    ///
    /// # Parameters
    /// - `text: &str`: A description or a free-text query.
    ///
    /// # Returns
    /// - `Ok(Vec<f32>)`: The embedding.
    /// - `Err(VaultError::Embed)`: The call did not succeed, carrying no
    ///   partial result.
    pub async fn embed(&self, text: &str) -> Result<Vec<f32>, VaultError> {
        let url = format!("{}{EMBED_PATH}", self.api_base);
        debug!("Requesting embedding: {url}");

        let response = self
            .post(&url)
            .form(&[("text", text)])
            .send()
            .await
            .map_err(|e| VaultError::Embed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(VaultError::Embed(format!(
                "{url} returned {}",
                response.status()
            )));
        }

        let body: EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| VaultError::Embed(e.to_string()))?;

        Ok(body.vector)
    }
}

use std::sync::mpsc::Sender;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::form::FormState;

/// What can go wrong between clicking Generate and getting a URL back.
/// Every variant ends up as a toast; none of them are fatal.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The service answered with a non-success status. The message is the
    /// service's own `error.message` when it sent one.
    #[error("{0}")]
    Api(String),
    #[error("No image URL in the response")]
    MissingUrl,
    #[error("Unexpected response from the server: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    #[error("Could not start the request runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

/// JSON body of the outbound request. Always asks for exactly one image at
/// 1024x1024; `model` is only present when the user filled the field in.
#[derive(Debug, Serialize)]
pub struct GenerateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    pub prompt: String,
    pub n: u32,
    pub size: String,
}

impl GenerateRequest {
    pub fn from_form(form: &FormState) -> Self {
        let model = form.model.trim();
        Self {
            model: (!model.is_empty()).then(|| model.to_string()),
            prompt: form.prompt.clone(),
            n: 1,
            size: "1024x1024".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    data: Vec<GeneratedImage>,
}

#[derive(Debug, Deserialize)]
struct GeneratedImage {
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: Option<ApiErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: Option<String>,
}

/// Maps a raw response to either the first image URL or a failure message.
fn parse_response(status: reqwest::StatusCode, body: &str) -> Result<String, GenerateError> {
    if !status.is_success() {
        let message = serde_json::from_str::<ApiErrorBody>(body)
            .ok()
            .and_then(|parsed| parsed.error)
            .and_then(|detail| detail.message)
            .unwrap_or_else(|| "Failed to generate image".to_string());
        return Err(GenerateError::Api(message));
    }

    let parsed: GenerateResponse = serde_json::from_str(body)?;
    parsed
        .data
        .into_iter()
        .next()
        .and_then(|image| image.url)
        .ok_or(GenerateError::MissingUrl)
}

/// Performs the single outbound request for one submission.
///
/// The client is built here, used once, and dropped with the call so the API
/// key is never cached anywhere between submissions.
pub async fn generate(
    endpoint: &str,
    api_key: &str,
    request: &GenerateRequest,
) -> Result<String, GenerateError> {
    let client = reqwest::Client::new();
    let response = client
        .post(endpoint)
        .bearer_auth(api_key)
        .json(request)
        .send()
        .await?;

    let status = response.status();
    log::debug!("image generation response: {status}");
    let body = response.text().await?;
    parse_response(status, &body)
}

/// Runs one generation on a background thread and reports back over `tx`.
/// Exactly one message is sent per call, whichever way the request ends, so
/// the UI can always leave its loading state.
pub fn spawn_generation(form: &FormState, tx: Sender<Result<String, GenerateError>>) {
    let endpoint = form.endpoint.trim().to_string();
    let api_key = form.api_key.trim().to_string();
    let request = GenerateRequest::from_form(form);

    log::info!("submitting image generation request to {endpoint}");

    std::thread::spawn(move || {
        let outcome = match tokio::runtime::Runtime::new() {
            Ok(rt) => rt.block_on(generate(&endpoint, &api_key, &request)),
            Err(e) => Err(GenerateError::Runtime(e)),
        };
        if let Err(e) = &outcome {
            log::warn!("image generation failed: {e}");
        }
        let _ = tx.send(outcome);
    });
}

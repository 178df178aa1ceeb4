//! Conversion explanations
//!
//! Sends a templated prompt to the Gemini `generateContent` endpoint and
//! returns the model's free-text answer verbatim.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::GeminiConfig;

/// Explanation error types
#[derive(Debug, Error)]
pub enum ExplainError {
    #[error("Explanations are disabled: GEMINI_API_KEY is not set")]
    MissingApiKey,

    #[error("Gemini request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Gemini API returned {status}: {message}")]
    Service { status: u16, message: String },

    #[error("Gemini API returned no text")]
    EmptyResponse,
}

/// Build the prompt sent to the explanation service
///
/// Numbers keep a decimal point (`1.0`, `250000.0`) and use a signed two-digit
/// exponent outside `1e-4..1e16` (`1e+16`, `1e-05`).
pub fn build_prompt(value: f64, from_unit: &str, to_unit: &str, result: f64) -> String {
    format!(
        "Explain the conversion of {} {} to {}. The result is {}.",
        prompt_number(value),
        from_unit,
        to_unit,
        prompt_number(result)
    )
}

fn prompt_number(v: f64) -> String {
    if v.is_nan() {
        return "nan".to_string();
    }
    // Debug already switches to exponent form at the same thresholds
    let s = format!("{:?}", v);
    match s.split_once('e') {
        Some((mantissa, exp)) => {
            let (sign, digits) = match exp.strip_prefix('-') {
                Some(d) => ('-', d),
                None => ('+', exp),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => s,
    }
}

/// Something that can turn a prompt into an explanation
#[async_trait]
pub trait Explainer: Send + Sync {
    async fn explain(&self, prompt: &str) -> Result<String, ExplainError>;

    /// Model identifier reported in responses
    fn model(&self) -> &str;
}

// -- Gemini wire types --

#[derive(Debug, Serialize)]
pub struct GenerateContentRequest<'a> {
    pub contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
pub struct RequestContent<'a> {
    pub parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
pub struct RequestPart<'a> {
    pub text: &'a str,
}

impl<'a> GenerateContentRequest<'a> {
    pub fn from_prompt(prompt: &'a str) -> Self {
        Self {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub struct ResponsePart {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

/// Extract a readable message from an error response body
fn service_error_message(body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.trim().to_string())
}

/// HTTP client for the Gemini API
pub struct GeminiClient {
    client: Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self, ExplainError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    /// Create a client if the configuration carries an API key
    pub fn from_config(config: Option<&GeminiConfig>) -> Result<Self, ExplainError> {
        let config = config.ok_or(ExplainError::MissingApiKey)?;
        Self::new(config.clone())
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url, self.config.model
        )
    }
}

#[async_trait]
impl Explainer for GeminiClient {
    async fn explain(&self, prompt: &str) -> Result<String, ExplainError> {
        let url = self.endpoint();
        tracing::debug!("POST {} ({} prompt chars)", url, prompt.len());

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(&GenerateContentRequest::from_prompt(prompt))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ExplainError::Service {
                status: status.as_u16(),
                message: service_error_message(&body),
            });
        }

        let parsed = response.json::<GenerateContentResponse>().await?;
        parsed.text().ok_or(ExplainError::EmptyResponse)
    }

    fn model(&self) -> &str {
        &self.config.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_build_prompt() {
        assert_eq!(
            build_prompt(1.0, "mile", "meter", 1609.34),
            "Explain the conversion of 1.0 mile to meter. The result is 1609.34."
        );
        assert_eq!(
            build_prompt(2.5, "bar", "pascal", 250000.0),
            "Explain the conversion of 2.5 bar to pascal. The result is 250000.0."
        );
    }

    #[test]
    fn test_prompt_number_exponents() {
        assert_eq!(prompt_number(1e16), "1e+16");
        assert_eq!(prompt_number(1.5e20), "1.5e+20");
        assert_eq!(prompt_number(0.00001), "1e-05");
        assert_eq!(prompt_number(0.0001), "0.0001");
        assert_eq!(prompt_number(-40.0), "-40.0");
        assert_eq!(prompt_number(f64::INFINITY), "inf");
        assert_eq!(prompt_number(f64::NAN), "nan");
    }

    #[test]
    fn test_request_body_shape() {
        let body = serde_json::to_value(GenerateContentRequest::from_prompt("hi")).unwrap();
        assert_eq!(body, serde_json::json!({"contents": [{"parts": [{"text": "hi"}]}]}));
    }

    #[test]
    fn test_response_text_joins_parts() {
        let raw = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "One mile "}, {"text": "is 1609.34 m."}], "role": "model"}},
                {"content": {"parts": [{"text": "ignored"}]}}
            ]
        }"#;
        let parsed: GenerateContentResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.text().as_deref(), Some("One mile is 1609.34 m."));
    }

    #[test]
    fn test_response_without_text() {
        let parsed: GenerateContentResponse = serde_json::from_str(r#"{"candidates": []}"#).unwrap();
        assert!(parsed.text().is_none());

        let parsed: GenerateContentResponse =
            serde_json::from_str(r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#).unwrap();
        assert!(parsed.text().is_none());
    }

    #[test]
    fn test_service_error_message() {
        let body = r#"{"error": {"code": 400, "message": "API key not valid.", "status": "INVALID_ARGUMENT"}}"#;
        assert_eq!(service_error_message(body), "API key not valid.");
        assert_eq!(service_error_message("Bad Gateway\n"), "Bad Gateway");
    }

    #[test]
    fn test_client_requires_key() {
        assert!(matches!(GeminiClient::from_config(None), Err(ExplainError::MissingApiKey)));
    }

    #[test]
    fn test_endpoint() {
        let client = GeminiClient::new(GeminiConfig {
            api_key: "k".to_string(),
            model: "gemini-2.0-flash".to_string(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            timeout: Duration::from_secs(1),
        })
        .unwrap();
        assert_eq!(
            client.endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent"
        );
        assert_eq!(client.model(), "gemini-2.0-flash");
    }
}

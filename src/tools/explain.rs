//! Explanation MCP Tool
//!
//! Converts first, then asks the explanation service about the result. A
//! failed or disabled explanation is reported as a notice next to the
//! already computed conversion.

use serde::Serialize;

use crate::explain::{build_prompt, ExplainError, Explainer};
use crate::tools::convert::{convert_units, ConversionRequest, ConvertResponse};

/// Response for explain_conversion
#[derive(Debug, Serialize)]
pub struct ExplainResponse {
    #[serde(flatten)]
    pub conversion: ConvertResponse,
    pub prompt: String,
    pub explanation: Option<String>,
    pub model: Option<String>,
    pub explained_at: Option<String>,
    /// User-visible message when no explanation could be produced
    pub notice: Option<String>,
}

/// Convert a value and request an explanation of the result
pub async fn explain_conversion(
    request: &ConversionRequest,
    explainer: Option<&dyn Explainer>,
) -> Result<ExplainResponse, String> {
    let conversion = convert_units(request)?;
    let prompt = build_prompt(
        conversion.value,
        &conversion.from_unit,
        &conversion.to_unit,
        conversion.result,
    );

    let mut response = ExplainResponse {
        conversion,
        prompt,
        explanation: None,
        model: None,
        explained_at: None,
        notice: None,
    };

    let Some(explainer) = explainer else {
        response.notice = Some(ExplainError::MissingApiKey.to_string());
        return Ok(response);
    };

    response.model = Some(explainer.model().to_string());
    match explainer.explain(&response.prompt).await {
        Ok(text) => {
            response.explanation = Some(text);
            response.explained_at = Some(chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string());
        }
        Err(e) => {
            tracing::warn!("Explanation failed: {}", e);
            response.notice = Some(format!("Explanation unavailable: {}", e));
        }
    }

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct EchoExplainer {
        prompts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Explainer for EchoExplainer {
        async fn explain(&self, prompt: &str) -> Result<String, ExplainError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok(format!("Because: {}", prompt))
        }

        fn model(&self) -> &str {
            "echo"
        }
    }

    struct FailingExplainer;

    #[async_trait]
    impl Explainer for FailingExplainer {
        async fn explain(&self, _prompt: &str) -> Result<String, ExplainError> {
            Err(ExplainError::Service {
                status: 503,
                message: "overloaded".to_string(),
            })
        }

        fn model(&self) -> &str {
            "failing"
        }
    }

    #[tokio::test]
    async fn test_explanation_returned_verbatim() {
        let explainer = EchoExplainer { prompts: Mutex::new(Vec::new()) };
        let request = ConversionRequest::new(1.0, "Length", "kilometer", "meter");
        let response = explain_conversion(&request, Some(&explainer)).await.unwrap();

        let expected_prompt = "Explain the conversion of 1.0 kilometer to meter. The result is 1000.0.";
        assert_eq!(response.prompt, expected_prompt);
        assert_eq!(response.explanation.as_deref(), Some(format!("Because: {}", expected_prompt).as_str()));
        assert_eq!(response.model.as_deref(), Some("echo"));
        assert!(response.explained_at.is_some());
        assert!(response.notice.is_none());
        assert_eq!(explainer.prompts.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_service_failure_keeps_result() {
        let request = ConversionRequest::new(1.0, "Pressure", "bar", "pascal");
        let response = explain_conversion(&request, Some(&FailingExplainer)).await.unwrap();

        assert_eq!(response.conversion.result, 100000.0);
        assert_eq!(response.conversion.formatted_result, "100000.00");
        assert!(response.explanation.is_none());
        let notice = response.notice.unwrap();
        assert!(notice.contains("503") && notice.contains("overloaded"), "{}", notice);
    }

    #[tokio::test]
    async fn test_missing_explainer_keeps_result() {
        let request = ConversionRequest::new(0.0, "Temperature", "celsius", "kelvin");
        let response = explain_conversion(&request, None).await.unwrap();

        assert_eq!(response.conversion.result, 273.15);
        assert!(response.notice.unwrap().contains("GEMINI_API_KEY"));
        assert!(response.model.is_none());
    }

    #[tokio::test]
    async fn test_invalid_unit_is_an_error_not_a_notice() {
        let explainer = EchoExplainer { prompts: Mutex::new(Vec::new()) };
        let request = ConversionRequest::new(1.0, "Length", "meter", "pound");
        assert!(explain_conversion(&request, Some(&explainer)).await.is_err());
        assert!(explainer.prompts.lock().unwrap().is_empty());
    }
}

//! Request and response bodies exchanged with the review backend

use std::fmt;

use crate::session::SessionContext;

/// Entry returned by the models endpoint
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ModelInfo {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
}

/// Body of a follow-up chat request
#[derive(Clone, serde::Serialize)]
pub struct ChatRequest {
    pub message: String,
    pub submittal_context: String,
    pub spec_context: String,
    pub api_key: String,
    pub model: String,
}

impl ChatRequest {
    pub fn new(message: &str, ctx: &SessionContext) -> Self {
        Self {
            message: message.to_string(),
            submittal_context: ctx.submittal_text.clone(),
            spec_context: ctx.spec_text.clone(),
            api_key: ctx.api_key.expose().to_string(),
            model: ctx.model.clone(),
        }
    }
}

impl fmt::Debug for ChatRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatRequest")
            .field("message", &self.message)
            .field("submittal_context_len", &self.submittal_context.len())
            .field("spec_context_len", &self.spec_context.len())
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

/// Chat reply: either `{response}` or `{error}`
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ChatResponse {
    /// An `error` field wins over `response`
    pub fn into_result(self) -> Result<String, String> {
        match (self.response, self.error) {
            (_, Some(error)) if !error.trim().is_empty() => Err(error),
            (Some(response), _) => Ok(response),
            _ => Err("chat response contained neither `response` nor `error`".to_string()),
        }
    }
}

/// `{error}` body sent with failed requests
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::ApiKey;
    use pretty_assertions::assert_eq;

    fn context() -> SessionContext {
        SessionContext {
            submittal_text: "Geotextile fabric product data".to_string(),
            spec_text: "Section 31 05 19 Geotextiles".to_string(),
            api_key: ApiKey::new("sk-test"),
            model: "gpt-4o".to_string(),
        }
    }

    #[test]
    fn test_chat_request_wire_names() {
        let request = ChatRequest::new("Is the grab strength adequate?", &context());
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "message": "Is the grab strength adequate?",
                "submittal_context": "Geotextile fabric product data",
                "spec_context": "Section 31 05 19 Geotextiles",
                "api_key": "sk-test",
                "model": "gpt-4o",
            })
        );
    }

    #[test]
    fn test_chat_request_debug_hides_key() {
        let request = ChatRequest::new("hello", &context());
        assert!(!format!("{:?}", request).contains("sk-test"));
    }

    #[test]
    fn test_chat_response_success() {
        let resp: ChatResponse = serde_json::from_str(r#"{"response": "Yes."}"#).unwrap();
        assert_eq!(resp.into_result(), Ok("Yes.".to_string()));
    }

    #[test]
    fn test_chat_response_error_wins() {
        let resp: ChatResponse =
            serde_json::from_str(r#"{"response": "ignored", "error": "Chat failed: quota"}"#)
                .unwrap();
        assert_eq!(resp.into_result(), Err("Chat failed: quota".to_string()));
    }

    #[test]
    fn test_chat_response_empty_body() {
        let resp: ChatResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.into_result().is_err());
    }

    #[test]
    fn test_model_info_provider_optional() {
        let models: Vec<ModelInfo> = serde_json::from_str(
            r#"[{"id": "gpt-4o", "name": "GPT-4o (Default)", "provider": "openai"},
                {"id": "gpt-4", "name": "GPT-4"}]"#,
        )
        .unwrap();
        assert_eq!(models.len(), 2);
        assert_eq!(models[0].provider.as_deref(), Some("openai"));
        assert_eq!(models[1].provider, None);
    }
}

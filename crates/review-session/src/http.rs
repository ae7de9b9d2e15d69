//! HTTP implementation of [`ReviewBackend`]

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use shared_types::{ChatRequest, ChatResponse, ErrorBody, ModelInfo};
use tracing::{debug, warn};

use crate::backend::{AnalyzeRequest, Document, ReviewBackend};
use crate::config::BackendConfig;
use crate::error::BackendError;

pub struct HttpBackend {
    client: Client,
    config: BackendConfig,
}

impl HttpBackend {
    pub fn new(config: BackendConfig) -> Result<Self, BackendError> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }
}

fn pdf_part(doc: &Document) -> Result<Part, BackendError> {
    Ok(Part::bytes(doc.bytes.clone())
        .file_name(doc.name.clone())
        .mime_str("application/pdf")?)
}

/// Body text of a 2xx response; otherwise the `{error}` it carried, or the
/// bare status when it carried none
async fn read_body(response: Response) -> Result<String, BackendError> {
    let status = response.status();
    let body = response.text().await?;
    if status.is_success() {
        return Ok(body);
    }

    match serde_json::from_str::<ErrorBody>(&body) {
        Ok(ErrorBody { error }) => {
            warn!("Backend returned {} with error: {}", status, error);
            Err(BackendError::Upstream(error))
        }
        Err(_) => Err(BackendError::Transport(format!(
            "HTTP error {}",
            status.as_u16()
        ))),
    }
}

#[async_trait]
impl ReviewBackend for HttpBackend {
    async fn analyze(&self, request: &AnalyzeRequest) -> Result<String, BackendError> {
        let form = Form::new()
            .part("submittal", pdf_part(&request.submittal)?)
            .part("spec", pdf_part(&request.spec)?);

        let url = self.config.url(&self.config.analyze_path);
        debug!("POST {} ({:?}, {:?})", url, request.submittal, request.spec);

        let response = self
            .client
            .post(&url)
            .header("X-API-KEY", request.api_key.expose())
            .header("X-MODEL-ID", &request.model)
            .multipart(form)
            .send()
            .await?;

        read_body(response).await
    }

    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, BackendError> {
        let url = self.config.url(&self.config.chat_path);
        debug!("POST {} {:?}", url, request);

        let response = self.client.post(&url).json(request).send().await?;
        let body = read_body(response).await?;
        serde_json::from_str(&body)
            .map_err(|e| BackendError::Transport(format!("invalid chat response: {}", e)))
    }

    async fn list_models(&self) -> Result<Vec<ModelInfo>, BackendError> {
        let url = self.config.url(&self.config.models_path);
        let response = self.client.get(&url).send().await?;
        let body = read_body(response).await?;
        serde_json::from_str(&body)
            .map_err(|e| BackendError::Transport(format!("invalid models response: {}", e)))
    }
}

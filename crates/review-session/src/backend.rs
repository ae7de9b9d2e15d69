//! The seam between the session and whatever answers its requests

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use shared_types::{ApiKey, ChatRequest, ChatResponse, ModelInfo};

use crate::error::BackendError;

/// An uploaded PDF
#[derive(Clone, PartialEq, Eq)]
pub struct Document {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl Document {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("name", &self.name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct AnalyzeRequest {
    pub submittal: Document,
    pub spec: Document,
    pub api_key: ApiKey,
    pub model: String,
}

/// Analysis, chat and model listing.
///
/// `analyze` returns the response body untouched; decoding it is the
/// caller's job so unparseable output can still be shown verbatim.
#[async_trait]
pub trait ReviewBackend: Send + Sync {
    async fn analyze(&self, request: &AnalyzeRequest) -> Result<String, BackendError>;

    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, BackendError>;

    async fn list_models(&self) -> Result<Vec<ModelInfo>, BackendError>;
}

#[async_trait]
impl<B: ReviewBackend + ?Sized> ReviewBackend for Arc<B> {
    async fn analyze(&self, request: &AnalyzeRequest) -> Result<String, BackendError> {
        (**self).analyze(request).await
    }

    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, BackendError> {
        (**self).chat(request).await
    }

    async fn list_models(&self) -> Result<Vec<ModelInfo>, BackendError> {
        (**self).list_models().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_debug_hides_bytes() {
        let doc = Document::new("submittal.pdf", b"%PDF-1.7 secret".to_vec());
        let printed = format!("{:?}", doc);
        assert!(printed.contains("submittal.pdf"));
        assert!(printed.contains("len: 15"));
        assert!(!printed.contains("secret"));
    }

    #[test]
    fn test_empty_document() {
        assert!(Document::new("a.pdf", Vec::new()).is_empty());
        assert!(!Document::new("a.pdf", b"x".to_vec()).is_empty());
    }
}

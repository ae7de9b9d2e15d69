//! Session state for submittal review
//!
//! Runs an analysis through a [`ReviewBackend`], keeps the extracted
//! document text in a [`ContextStore`], and carries follow-up questions
//! against that text into an ordered [`Transcript`].

pub mod backend;
pub mod config;
pub mod error;
pub mod http;
pub mod models;
pub mod session;
pub mod store;
pub mod transcript;

pub use backend::{AnalyzeRequest, Document, ReviewBackend};
pub use config::{BackendConfig, ClientConfig, ClientSettings, DEFAULT_MODEL};
pub use error::{BackendError, DocumentRole, Precondition, ReviewError};
pub use http::HttpBackend;
pub use models::select_model;
pub use session::{error_view, ReviewSession};
pub use store::{ContextSnapshot, ContextStore};
pub use transcript::{format_entries, Transcript};

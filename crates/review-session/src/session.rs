//! Analysis flow and follow-up chat turns
//!
//! A [`ReviewSession`] owns the context store and transcript for one user.
//! Only one analysis runs at a time; chat turns may overlap freely and are
//! recorded in the order they complete. Every request remembers the context
//! generation it was issued against, and a result that arrives after that
//! context was cleared or replaced is discarded.

use std::sync::atomic::{AtomicBool, Ordering};

use compliance_engine::render::unparsed_view;
use compliance_engine::{decode_response, AnalysisOutcome, AnalyzedReport, ReportView};
use shared_types::{ApiKey, ChatRequest, SessionContext};
use tracing::{info, warn};

use crate::backend::{AnalyzeRequest, Document, ReviewBackend};
use crate::error::{DocumentRole, Precondition, ReviewError};
use crate::store::{ContextSnapshot, ContextStore};
use crate::transcript::Transcript;

/// Holds the single-flight flag for as long as an analysis runs
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct ReviewSession<B> {
    backend: B,
    api_key: ApiKey,
    model: String,
    store: ContextStore,
    transcript: Transcript,
    analysis_in_flight: AtomicBool,
}

impl<B: ReviewBackend> ReviewSession<B> {
    pub fn new(backend: B, api_key: ApiKey, model: impl Into<String>) -> Self {
        Self {
            backend,
            api_key,
            model: model.into(),
            store: ContextStore::new(),
            transcript: Transcript::new(),
            analysis_in_flight: AtomicBool::new(false),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub async fn context(&self) -> Option<ContextSnapshot> {
        self.store.get().await
    }

    pub fn is_analyzing(&self) -> bool {
        self.analysis_in_flight.load(Ordering::Acquire)
    }

    /// Upload both documents and build the report.
    ///
    /// Clears the current context up front; it is repopulated only if a
    /// report comes back and nothing cleared the store in the meantime.
    pub async fn analyze(
        &self,
        submittal: Document,
        spec: Document,
    ) -> Result<AnalyzedReport, ReviewError> {
        if submittal.is_empty() {
            return Err(Precondition::MissingDocument(DocumentRole::Submittal).into());
        }
        if spec.is_empty() {
            return Err(Precondition::MissingDocument(DocumentRole::Specification).into());
        }
        if self.api_key.is_empty() {
            return Err(Precondition::MissingApiKey.into());
        }
        let _in_flight =
            InFlight::acquire(&self.analysis_in_flight).ok_or(Precondition::AnalysisInProgress)?;

        let ticket = self.store.clear().await;
        info!(
            "Starting analysis of {} against {} with model {}",
            submittal.name, spec.name, self.model
        );

        let request = AnalyzeRequest {
            submittal,
            spec,
            api_key: self.api_key.clone(),
            model: self.model.clone(),
        };
        let body = self.backend.analyze(&request).await?;

        let analyzed = match decode_response(&body) {
            AnalysisOutcome::Report(analyzed) => analyzed,
            AnalysisOutcome::Upstream(message) => return Err(ReviewError::Upstream(message)),
            AnalysisOutcome::Unparsed(err) => {
                warn!("Analysis result could not be structured: {}", err.reason);
                return Err(err.into());
            }
        };

        let context = SessionContext {
            submittal_text: extracted_text(&analyzed.submittal_text, DocumentRole::Submittal),
            spec_text: extracted_text(&analyzed.spec_text, DocumentRole::Specification),
            api_key: self.api_key.clone(),
            model: self.model.clone(),
        };
        if !self.store.set_if_current(ticket, context).await {
            warn!("Discarding analysis result: session changed while it was running");
            return Err(ReviewError::Stale);
        }

        info!(
            "Analysis finished with {} assessment rows",
            analyzed.report.compliance_assessment.len()
        );
        Ok(analyzed)
    }

    /// Send one follow-up question.
    ///
    /// Precondition failures return before any request and leave the
    /// transcript untouched. Every other outcome appends the question and
    /// then either the reply or an error entry, in one step.
    pub async fn send(&self, message: &str) -> Result<String, ReviewError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(Precondition::EmptyMessage.into());
        }
        let snapshot = self.store.get().await.ok_or(Precondition::NoContext)?;
        if snapshot.context().api_key.is_empty() {
            return Err(Precondition::MissingApiKey.into());
        }

        let request = ChatRequest::new(message, snapshot.context());
        let result = match self.backend.chat(&request).await {
            Ok(response) => response.into_result().map_err(ReviewError::Upstream),
            Err(err) => Err(err.into()),
        };

        // Held through the append so the context cannot change in between
        let Some(_current) = self.store.lock_if_current(&snapshot).await else {
            warn!("Discarding chat reply issued against an old context");
            self.transcript
                .append_failure(message, &ReviewError::Stale)
                .await;
            return Err(ReviewError::Stale);
        };

        match result {
            Ok(reply) => {
                self.transcript.append_exchange(message, &reply).await;
                Ok(reply)
            }
            Err(err) => {
                warn!("Chat turn failed: {}", err);
                self.transcript.append_failure(message, &err).await;
                Err(err)
            }
        }
    }

    /// Drop the analysis context. Requests still in flight are discarded
    /// when they complete.
    pub async fn end_session(&self) {
        self.store.clear().await;
        info!("Session ended");
    }
}

fn extracted_text(text: &Option<String>, role: DocumentRole) -> String {
    match text {
        Some(text) => text.clone(),
        None => {
            warn!("Analysis response carried no {} text; chat will lack it", role);
            String::new()
        }
    }
}

/// What the results area shows when an analysis fails
pub fn error_view(err: &ReviewError) -> ReportView {
    match err {
        ReviewError::Format(err) => unparsed_view(err),
        other => ReportView::Error {
            message: other.to_string(),
        },
    }
}

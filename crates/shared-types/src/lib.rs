pub mod session;
pub mod types;
pub mod wire;

pub use session::{ApiKey, ChatEntry, SessionContext};
pub use types::{
    ComplianceItem, ComplianceReport, Recommendation, ReportSchema, NO_INFORMATION,
    UNKNOWN_STATUS,
};
pub use wire::{ChatRequest, ChatResponse, ErrorBody, ModelInfo};

pub mod mapper;
pub mod orchestrator;

pub use mapper::{map_to_draft, JobDraftRecord, STATUS_SAVED};
pub use orchestrator::{ExtractionInput, Pipeline, PipelineError};

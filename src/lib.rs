//! Extraction pipeline for a personal job-application tracker.
//!
//! Takes either a job-posting URL (fetched through the bundled HTML fetch
//! proxy) or raw pasted text, refines it into clean prose, sends it through
//! a schema-constrained extraction call, and maps the result into a draft
//! record ready for the caller to review, edit, and persist.

pub mod config;
pub mod extraction;
pub mod network;
pub mod pipeline;
pub mod refinery;

pub use config::PipelineConfig;
pub use extraction::{ExtractedFields, ExtractionError};
pub use pipeline::mapper::{JobDraftRecord, STATUS_SAVED};
pub use pipeline::orchestrator::{ExtractionInput, Pipeline, PipelineError};

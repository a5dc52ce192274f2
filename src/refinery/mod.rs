// * The Refinery: turns raw posting markup into clean prose for extraction.
// * Normalization is best-effort by contract: malformed markup never errors,
// * the worst case is an empty string the orchestrator treats as fatal.

pub mod normalizer;
pub mod selector;

pub use normalizer::{normalize_html, normalize_text};
pub use selector::select_primary_content;

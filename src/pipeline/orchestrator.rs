use crate::config::PipelineConfig;
use crate::extraction::{ExtractedFields, ExtractionError, ExtractionRequester};
use crate::network::errors::ProxyError;
use crate::network::proxy_client::ProxyClient;
use crate::pipeline::mapper::{map_to_draft, JobDraftRecord};
use crate::refinery;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use thiserror::Error;

// * Terminal failure taxonomy for one pipeline run. Nothing here is retried
// * automatically; the caller re-initiates from scratch.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("no input: supply a posting url or paste the posting text")]
    NoInput,

    #[error("could not fetch the posting ({0}); try pasting the text instead")]
    SourceFetch(#[from] ProxyError),

    #[error("the page yielded no readable text; try pasting the text instead")]
    EmptyContent,

    #[error("field extraction failed: {0}")]
    Extraction(#[from] ExtractionError),
}

/// Where a run's text comes from.
///
/// Precedence: a non-blank URL wins even when pasted text is also present;
/// the text is only consulted when the URL is blank after trimming.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractionInput {
    Url(String),
    Text(String),
}

impl ExtractionInput {
    pub fn resolve(url: &str, pasted_text: &str) -> Option<Self> {
        let url = url.trim();
        if !url.is_empty() {
            return Some(Self::Url(url.to_string()));
        }

        let text = pasted_text.trim();
        if !text.is_empty() {
            return Some(Self::Text(text.to_string()));
        }

        None
    }
}

pub type AsyncResult<T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send>>;

/// Seam over the fetch proxy so runs are testable without a network.
pub trait SourceFetcher: Send + Sync {
    fn fetch(&self, url: &str) -> AsyncResult<String, ProxyError>;
}

/// Seam over the structured-extraction service.
pub trait FieldExtractor: Send + Sync {
    fn extract_fields(&self, text: &str) -> AsyncResult<ExtractedFields, ExtractionError>;
}

impl SourceFetcher for ProxyClient {
    fn fetch(&self, url: &str) -> AsyncResult<String, ProxyError> {
        let client = self.clone();
        let url = url.to_string();
        Box::pin(async move { client.fetch(&url).await })
    }
}

impl FieldExtractor for ExtractionRequester {
    fn extract_fields(&self, text: &str) -> AsyncResult<ExtractedFields, ExtractionError> {
        let requester = self.clone();
        let text = text.to_string();
        Box::pin(async move { requester.extract(&text).await })
    }
}

/// Sequences the run: source resolution, fetch, refinement, truncation, one
/// extraction call, and mapping. Single-pass and stateless between runs;
/// re-running with the same input is idempotent apart from the date field.
pub struct Pipeline {
    config: PipelineConfig,
    fetcher: Arc<dyn SourceFetcher>,
    extractor: Arc<dyn FieldExtractor>,
}

impl Pipeline {
    /// Wires the real collaborators from `config`.
    pub fn new(config: PipelineConfig) -> Result<Self, PipelineError> {
        let fetcher = ProxyClient::new(&config.proxy_endpoint, config.fetch_timeout)?;
        let extractor = ExtractionRequester::new(
            &config.extraction_endpoint,
            &config.extraction_api_key,
            config.extraction_timeout,
        )?;

        Ok(Self {
            config,
            fetcher: Arc::new(fetcher),
            extractor: Arc::new(extractor),
        })
    }

    /// Wires explicit collaborators; the seam tests and embedders use.
    pub fn with_collaborators(
        config: PipelineConfig,
        fetcher: Arc<dyn SourceFetcher>,
        extractor: Arc<dyn FieldExtractor>,
    ) -> Self {
        Self {
            config,
            fetcher,
            extractor,
        }
    }

    /// Runs the pipeline once, producing a draft or a classified error.
    pub async fn run(&self, url: &str, pasted_text: &str) -> Result<JobDraftRecord, PipelineError> {
        let input = ExtractionInput::resolve(url, pasted_text).ok_or(PipelineError::NoInput)?;

        let (normalized, link) = match input {
            ExtractionInput::Url(url) => {
                // * Fetch failure stops the run; there is no fallback to
                // * pasted text even when it is present.
                let body = self.fetcher.fetch(&url).await?;
                let text = refinery::normalize_html(&body, self.config.min_landmark_chars);
                if text.is_empty() {
                    return Err(PipelineError::EmptyContent);
                }
                (text, url)
            }
            ExtractionInput::Text(text) => (refinery::normalize_text(&text), String::new()),
        };

        let normalized = truncate_chars(normalized, self.config.max_text_chars);

        let fields = self.extractor.extract_fields(&normalized).await?;
        Ok(map_to_draft(fields, &link))
    }
}

// * Cuts text to exactly `cap` characters from the start. No ellipsis, no
// * word-boundary adjustment: the cap bounds extraction cost, it does not
// * try to preserve meaning.
fn truncate_chars(mut text: String, cap: usize) -> String {
    if let Some((idx, _)) = text.char_indices().nth(cap) {
        tracing::info!(
            cap,
            dropped_bytes = text.len() - idx,
            "Normalized text over cap, truncating"
        );
        text.truncate(idx);
    }
    text
}

// * Structured field extraction through a schema-constrained generation call.
// * One request per pipeline run: an instruction prompt embedding the
// * normalized posting text verbatim, plus a response schema pinning the
// * four expected fields. No retry, no streaming.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

// * Failure classification for the extraction hop, distinct from the proxy
// * hop. Request: the call itself failed. MalformedResponse: 2xx but the
// * envelope carried no candidate text. InvalidJson: the candidate text is
// * not valid data matching the schema. Parse failures are hard failures,
// * never partially accepted.
#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("extraction request failed: {0}")]
    Request(String),

    #[error("malformed extraction response: {0}")]
    MalformedResponse(String),

    #[error("extraction payload is not valid JSON: {0}")]
    InvalidJson(String),
}

/// The fields the extraction schema declares. `companyName` and `role` are
/// marked required by the schema; `location` and `summary` default when the
/// upstream omits them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedFields {
    pub company_name: String,
    pub role: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub summary: String,
}

const EXTRACTION_INSTRUCTION: &str = "You are given the text of a job posting. \
     Extract the company name, the role title, the location if one is stated, \
     and a one or two sentence summary of the position.";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: serde_json::Value,
}

// * Response envelope. Every level is optional: absence anywhere downgrades
// * to a MalformedResponse rather than a deserialization panic.
#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

fn response_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "OBJECT",
        "properties": {
            "companyName": { "type": "STRING" },
            "role": { "type": "STRING" },
            "location": { "type": "STRING", "nullable": true },
            "summary": { "type": "STRING" }
        },
        "required": ["companyName", "role"]
    })
}

fn build_request(text: &str) -> GenerateRequest {
    GenerateRequest {
        contents: vec![Content {
            parts: vec![Part {
                text: format!("{EXTRACTION_INSTRUCTION}\n\n{text}"),
            }],
        }],
        generation_config: GenerationConfig {
            response_mime_type: "application/json",
            response_schema: response_schema(),
        },
    }
}

fn candidate_text(envelope: GenerateResponse) -> Result<String, ExtractionError> {
    envelope
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().next())
        .and_then(|p| p.text)
        .ok_or_else(|| {
            ExtractionError::MalformedResponse("response carried no candidate text".to_string())
        })
}

fn decode_fields(payload: &str) -> Result<ExtractedFields, ExtractionError> {
    serde_json::from_str(payload).map_err(|e| ExtractionError::InvalidJson(e.to_string()))
}

/// Client for the structured-extraction service.
#[derive(Clone)]
pub struct ExtractionRequester {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl ExtractionRequester {
    pub fn new(endpoint: &str, api_key: &str, timeout: Duration) -> Result<Self, ExtractionError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ExtractionError::Request(e.to_string()))?;

        Ok(Self {
            http,
            endpoint: endpoint.to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Sends one structured-output request embedding `text` verbatim and
    /// decodes the candidate payload into [`ExtractedFields`].
    pub async fn extract(&self, text: &str) -> Result<ExtractedFields, ExtractionError> {
        let request = build_request(text);

        let resp = self
            .http
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| ExtractionError::Request(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let detail = resp.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "Extraction call rejected");
            return Err(ExtractionError::Request(format!(
                "HTTP {}: {}",
                status.as_u16(),
                detail
            )));
        }

        let envelope: GenerateResponse = resp
            .json()
            .await
            .map_err(|e| ExtractionError::MalformedResponse(e.to_string()))?;

        decode_fields(&candidate_text(envelope)?)
    }
}

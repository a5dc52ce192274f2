use crate::network::errors::ProxyError;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

// * Error envelope the fetch proxy returns on non-2xx responses.
#[derive(Deserialize)]
struct ProxyErrorBody {
    error: String,
    details: Option<String>,
}

// * Client for the server-side HTML fetch proxy.
// * One attempt per call, no retries; a slow upstream is bounded by the
// * request timeout and surfaces as a Transport error.
#[derive(Clone)]
pub struct ProxyClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl ProxyClient {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, ProxyError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            endpoint: Url::parse(endpoint)?,
        })
    }

    // * Fetches the target URL through the proxy and returns the raw body.
    pub async fn fetch(&self, target: &str) -> Result<String, ProxyError> {
        let mut route = self.endpoint.join("proxy")?;
        route.query_pairs_mut().append_pair("url", target);

        let resp = self.http.get(route).send().await?;
        let status = resp.status();

        if !status.is_success() {
            // * Any non-2xx is an Http error regardless of payload shape.
            let status_line = status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string();
            let detail = match resp.json::<ProxyErrorBody>().await {
                Ok(body) => body.details.unwrap_or(body.error),
                Err(_) => status_line,
            };
            tracing::warn!(status = status.as_u16(), detail = %detail, "Proxy fetch rejected");
            return Err(ProxyError::Http {
                status: status.as_u16(),
                detail,
            });
        }

        Ok(resp.text().await?)
    }
}

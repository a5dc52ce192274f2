// * The HTML Fetch Proxy daemon.
// * Browsers cannot fetch arbitrary posting pages cross-origin, so the
// * tracker UI routes fetches through this relay. Contract:
// *   GET /health      -> 200 "OK"
// *   GET /proxy?url=X -> 200 raw body, or non-200 with {error, details?}

use hyper::service::{make_service_fn, service_fn};
use hyper::{Body, Request, Response, Server};
use serde_json::json;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::oneshot;

// * Browser-like identity for the upstream request; bare library UAs get
// * blocked by most job boards.
const UPSTREAM_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

const UPSTREAM_TIMEOUT_SECS: u64 = 20;

#[derive(Error, Debug)]
pub enum ProxyServeError {
    #[error("failed to bind proxy listener: {0}")]
    Bind(#[from] hyper::Error),

    #[error("failed to build upstream client: {0}")]
    Upstream(#[from] reqwest::Error),
}

/// Handle for graceful shutdown of a running proxy daemon.
pub struct ProxyServerHandle {
    shutdown_tx: Option<oneshot::Sender<()>>,
    local_addr: SocketAddr,
    running: Arc<AtomicBool>,
}

impl ProxyServerHandle {
    /// The bound address; useful when started on an ephemeral port.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    /// Signals the daemon to shut down. `is_running` flips to false once
    /// the server task has actually drained and exited.
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// Starts the fetch proxy on the given port (0 picks an ephemeral port).
pub async fn start_proxy_server(port: u16) -> Result<ProxyServerHandle, ProxyServeError> {
    let upstream = reqwest::Client::builder()
        .user_agent(UPSTREAM_USER_AGENT)
        .timeout(Duration::from_secs(UPSTREAM_TIMEOUT_SECS))
        .build()?;

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let running = Arc::new(AtomicBool::new(true));
    let running_task = running.clone();

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let make_svc = make_service_fn(move |_conn| {
        let upstream = upstream.clone();
        async move {
            Ok::<_, Infallible>(service_fn(move |req| handle_request(req, upstream.clone())))
        }
    });

    let server = Server::try_bind(&addr)?.serve(make_svc);
    let local_addr = server.local_addr();
    let server = server.with_graceful_shutdown(async {
        let _ = shutdown_rx.await;
    });

    tokio::spawn(async move {
        tracing::info!(addr = %local_addr, "Fetch proxy started");
        if let Err(e) = server.await {
            tracing::error!(error = %e, "Fetch proxy server error");
        }
        running_task.store(false, Ordering::Relaxed);
        tracing::info!("Fetch proxy stopped");
    });

    Ok(ProxyServerHandle {
        shutdown_tx: Some(shutdown_tx),
        local_addr,
        running,
    })
}

async fn handle_request(
    req: Request<Body>,
    upstream: reqwest::Client,
) -> Result<Response<Body>, Infallible> {
    match req.uri().path() {
        "/health" => Ok(plain_response(200, "OK")),
        "/proxy" => Ok(handle_proxy(req, upstream).await),
        _ => Ok(plain_response(404, "Not Found")),
    }
}

async fn handle_proxy(req: Request<Body>, upstream: reqwest::Client) -> Response<Body> {
    let target = req.uri().query().and_then(|q| {
        url::form_urlencoded::parse(q.as_bytes())
            .find(|(k, _)| k == "url")
            .map(|(_, v)| v.into_owned())
    });

    let target = match target {
        Some(t) if !t.trim().is_empty() => t,
        _ => return error_response(400, "missing url parameter", None),
    };

    tracing::debug!(url = %target, "Proxying upstream fetch");

    match upstream.get(&target).send().await {
        Ok(resp) => {
            let status = resp.status();
            if !status.is_success() {
                // * Upstream non-2xx surfaces as a 500 with the status in details.
                return error_response(
                    500,
                    "upstream fetch failed",
                    Some(&format!("upstream returned HTTP {}", status.as_u16())),
                );
            }
            match resp.text().await {
                Ok(body) => Response::builder()
                    .status(200)
                    .header("Content-Type", "text/plain; charset=utf-8")
                    .header("Access-Control-Allow-Origin", "*")
                    .body(Body::from(body))
                    .unwrap(),
                Err(e) => error_response(500, "failed to read upstream body", Some(&e.to_string())),
            }
        }
        Err(e) => error_response(500, "upstream fetch failed", Some(&e.to_string())),
    }
}

fn plain_response(status: u16, body: &'static str) -> Response<Body> {
    Response::builder()
        .status(status)
        .body(Body::from(body))
        .unwrap()
}

fn error_response(status: u16, error: &str, details: Option<&str>) -> Response<Body> {
    let mut payload = json!({ "error": error });
    if let Some(details) = details {
        payload["details"] = json!(details);
    }

    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .body(Body::from(payload.to_string()))
        .unwrap()
}

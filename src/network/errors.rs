use thiserror::Error;

// * Failure classification for the proxy hop.
// * Transport: the request never produced an HTTP response (connect failure,
// * timeout). Http: the proxy answered non-2xx; detail carries whatever the
// * proxy's error envelope supplied, or the status line text otherwise.
#[derive(Error, Debug)]
pub enum ProxyError {
    #[error("proxy request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("proxy returned HTTP {status}: {detail}")]
    Http { status: u16, detail: String },

    #[error("invalid proxy url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

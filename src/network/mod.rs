pub mod errors;
pub mod proxy_client;
pub mod server;

pub use errors::ProxyError;
pub use proxy_client::ProxyClient;

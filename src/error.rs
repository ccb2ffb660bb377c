use thiserror::Error;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Failed to load configuration: {0}")]
    Config(String),

    #[error("Upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),

    #[error("API error: {status}")]
    UpstreamStatus {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Failed to bind to address {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),
}

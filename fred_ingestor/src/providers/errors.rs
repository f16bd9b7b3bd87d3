use thiserror::Error;

/// Errors that can occur within a `DataSourceAdapter` implementation.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// An error during an API request (e.g., network failure, timeout).
    #[error("API request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The upstream API returned a specific error (e.g., bad key, 4xx/5xx).
    #[error("API error: {0}")]
    Api(String),

    /// The response body could not be decoded into the expected shape.
    #[error("Failed to decode API response: {0}")]
    Decode(String),
}

/// Errors that can occur while constructing a provider.
#[derive(Debug, Error)]
pub enum ProviderInitError {
    /// A required environment variable is not set or empty.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    /// The underlying HTTP client could not be built.
    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

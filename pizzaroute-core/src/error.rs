use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid route: {0}")]
    InvalidRoute(String),
    #[error("Invalid range: {0}")]
    Range(String),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("GeoJSON error: {0}")]
    GeoJsonError(String),
    /// Failure reported by a places provider, passed through untouched
    #[error(transparent)]
    Upstream(Box<dyn std::error::Error + Send + Sync>),
}

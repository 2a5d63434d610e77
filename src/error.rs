use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse WKT: {0}")]
    WktError(String),
    #[error("Failed to parse GeoJSON: {0}")]
    GeoJsonError(String),
    #[error("Failed to parse CSV: {0}")]
    CsvError(#[from] csv::Error),
    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Unsupported input: {0}")]
    Unsupported(String),
    #[error(transparent)]
    Core(#[from] pizzaroute_core::Error),
}

use thiserror::Error;

/// Application-specific errors for the CLI
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid band order: {order}. Expected exactly three positive band indices")]
    InvalidBandOrder { order: String },

    #[error("Failed to load config {path}: {source}")]
    Config {
        path: String,
        #[source]
        source: lsmosaic::Error,
    },
}

use actix_web::http::StatusCode;
use actix_web::ResponseError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CspError {
    #[error("Unsupported directive value: {0}")]
    StructuralInput(String),

    #[error("Policy document error: {0}")]
    Import(#[from] serde_json::Error),

    #[error("Policy document is not a directive mapping: {0}")]
    ImportShape(String),

    #[error("Invalid hash algorithm: {0}")]
    InvalidHashAlgorithm(String),

    #[error("Crypto error: {0}")]
    CryptoError(String),

    #[error("Invalid header value: {0}")]
    InvalidHeaderValue(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CspError {
    pub(crate) fn structural(what: impl std::fmt::Display) -> Self {
        Self::StructuralInput(what.to_string())
    }
}

impl ResponseError for CspError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::StructuralInput(_)
            | Self::Import(_)
            | Self::ImportShape(_)
            | Self::InvalidHashAlgorithm(_) => StatusCode::BAD_REQUEST,

            Self::CryptoError(_) | Self::InvalidHeaderValue(_) | Self::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Machine-readable classification carried on the wire next to the
/// human-readable error text, so clients can branch on a tag instead of
/// matching message substrings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Validation,
    NotFound,
    Auth,
    Timeout,
    Upstream,
    Internal,
}

/// Service error taxonomy. Display texts are the fixed Spanish messages the
/// result region shows verbatim; they are part of the observable contract.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClimaError {
    #[error("Nombre de ciudad inválido")]
    InvalidCity,
    #[error("Falta el parámetro 'ciudad'")]
    MissingCity,
    #[error("Ciudad '{0}' no encontrada")]
    CityNotFound(String),
    #[error("Error de autenticación con el servicio")]
    UpstreamAuth,
    #[error("La consulta tardó demasiado tiempo")]
    UpstreamTimeout,
    #[error("Error de conexión con el servicio meteorológico")]
    UpstreamConnection,
    #[error("Error del servicio: {0}")]
    UpstreamStatus(String),
    #[error("Datos incompletos del servicio meteorológico")]
    IncompleteData,
    #[error("Error de red al consultar el clima")]
    Network,
    #[error("Error interno del servidor")]
    Internal,
}

impl ClimaError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidCity | Self::MissingCity => ErrorCode::Validation,
            Self::CityNotFound(_) => ErrorCode::NotFound,
            Self::UpstreamAuth => ErrorCode::Auth,
            Self::UpstreamTimeout => ErrorCode::Timeout,
            Self::UpstreamConnection | Self::UpstreamStatus(_) | Self::Network => {
                ErrorCode::Upstream
            }
            Self::IncompleteData => ErrorCode::Upstream,
            Self::Internal => ErrorCode::Internal,
        }
    }

    /// HTTP status for the error reply. Every lookup failure is a client
    /// error on this API; only unexpected failures are 500s.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::Internal => 500,
            _ => 400,
        }
    }
}

use std::time::Duration;

use shared::error::ErrorCode;
use thiserror::Error;

use crate::classify::infer_code;

/// Shown verbatim when a submission carries no city name.
pub const EMPTY_INPUT_MESSAGE: &str = "Por favor, ingresa el nombre de una ciudad";

/// Prefix for failures where the request itself could not complete.
pub const CONNECTION_ERROR_PREFIX: &str = "Error de conexión: ";

/// Client-side error taxonomy for one query cycle. Every variant is fully
/// recovered at the controller boundary and rendered into the result region;
/// nothing propagates past `submit_query`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum QueryError {
    /// Input was empty after trimming; no request was dispatched.
    #[error("{EMPTY_INPUT_MESSAGE}")]
    EmptyInput,
    /// HTTP success, but the payload carried an `error` field.
    #[error("{message}")]
    Server {
        message: String,
        code: Option<ErrorCode>,
    },
    /// Non-success HTTP status. `message` is the payload's `error` field if
    /// present, else a generic text naming the status.
    #[error("{message}")]
    Http {
        status: u16,
        message: String,
        code: Option<ErrorCode>,
    },
    /// The request exceeded its time limit. Kept distinct from `Transport`
    /// so callers can branch on it without matching message text.
    #[error("tiempo de espera agotado tras {} segundos", .limit.as_secs())]
    Timeout { limit: Duration },
    /// The request could not complete (DNS, refused connection, broken
    /// stream).
    #[error("{0}")]
    Transport(String),
    /// The response body was not a decodable payload.
    #[error("{0}")]
    MalformedReply(String),
}

impl QueryError {
    /// The text the result region displays. Server-provided messages appear
    /// verbatim; request failures get the fixed connection-error prefix.
    pub fn display_message(&self) -> String {
        match self {
            Self::EmptyInput | Self::Server { .. } | Self::Http { .. } => self.to_string(),
            Self::Timeout { .. } | Self::Transport(_) | Self::MalformedReply(_) => {
                format!("{CONNECTION_ERROR_PREFIX}{self}")
            }
        }
    }

    /// Structured classification: the server's tag when it sent one, else a
    /// category inferred from the message text (legacy servers).
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::EmptyInput => ErrorCode::Validation,
            Self::Server { message, code } | Self::Http { message, code, .. } => match code {
                Some(code) => *code,
                None => infer_code(message),
            },
            Self::Timeout { .. } => ErrorCode::Timeout,
            Self::Transport(_) | Self::MalformedReply(_) => ErrorCode::Upstream,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_displays_verbatim() {
        let err = QueryError::Server {
            message: "city not found".into(),
            code: None,
        };
        assert_eq!(err.display_message(), "city not found");
    }

    #[test]
    fn request_failures_get_the_connection_prefix() {
        let err = QueryError::Timeout {
            limit: Duration::from_secs(15),
        };
        assert_eq!(
            err.display_message(),
            "Error de conexión: tiempo de espera agotado tras 15 segundos"
        );

        let err = QueryError::Transport("connection refused".into());
        assert_eq!(err.display_message(), "Error de conexión: connection refused");
    }

    #[test]
    fn explicit_code_wins_over_inference() {
        let err = QueryError::Server {
            message: "mensaje sin pistas".into(),
            code: Some(ErrorCode::NotFound),
        };
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[test]
    fn timeout_code_needs_no_message_matching() {
        let err = QueryError::Timeout {
            limit: Duration::from_secs(15),
        };
        assert_eq!(err.code(), ErrorCode::Timeout);
    }
}

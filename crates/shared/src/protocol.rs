use serde::{Deserialize, Serialize};

use crate::error::{ClimaError, ErrorCode};

/// Query parameters of `GET /clima_actual`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CityQuery {
    #[serde(default)]
    pub ciudad: Option<String>,
}

/// Body of a `/clima_actual` reply. The server populates exactly one of
/// `resultado`/`error`; clients must tolerate either (or neither, from a
/// misbehaving server). `code` tags errors for clients that prefer a
/// structured classification over message text; legacy servers omit it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClimaReply {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resultado: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<ErrorCode>,
}

impl ClimaReply {
    pub fn ok(resultado: impl Into<String>) -> Self {
        Self {
            resultado: Some(resultado.into()),
            ..Self::default()
        }
    }

    pub fn failure(error: &ClimaError) -> Self {
        Self {
            error: Some(error.to_string()),
            code: Some(error.code()),
            ..Self::default()
        }
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReply {
    pub status: String,
    pub timestamp: String,
    pub service: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_reply_serializes_only_resultado() {
        let reply = ClimaReply::ok("Soleado, 25°C");
        let json = serde_json::to_value(&reply).expect("serialize");
        assert_eq!(json, serde_json::json!({ "resultado": "Soleado, 25°C" }));
    }

    #[test]
    fn failure_reply_carries_message_and_code() {
        let reply = ClimaReply::failure(&ClimaError::CityNotFound("Atlantis".into()));
        let json = serde_json::to_value(&reply).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({
                "error": "Ciudad 'Atlantis' no encontrada",
                "code": "not_found",
            })
        );
    }

    #[test]
    fn legacy_error_body_without_code_still_decodes() {
        let reply: ClimaReply =
            serde_json::from_str(r#"{"error": "city not found"}"#).expect("decode");
        assert_eq!(reply.error.as_deref(), Some("city not found"));
        assert!(reply.code.is_none());
        assert!(reply.resultado.is_none());
    }
}

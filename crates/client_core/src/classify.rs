//! Message-text classification. Kept as the fallback layer for servers that
//! send no structured `code`; replies that do carry one never reach the
//! substring paths.

use shared::error::ErrorCode;

/// Known error phrases and their friendly renderings, for frontends that
/// want a softer line under the verbatim message.
const KNOWN_PHRASES: &[(&str, &str)] = &[
    (
        "city not found",
        "Ciudad no encontrada. Verifica el nombre e intenta nuevamente.",
    ),
    ("invalid api key", "Error de configuración del servicio."),
    ("timeout", "La consulta tardó demasiado. Intenta nuevamente."),
    (
        "network error",
        "Error de conexión. Verifica tu conexión a internet.",
    ),
];

/// Infers a category from message text, for logging and frontend branching
/// when the reply carried no `code`.
pub fn infer_code(message: &str) -> ErrorCode {
    let lower = message.to_lowercase();
    if lower.contains("no encontrada") || lower.contains("not found") || lower.contains("404") {
        ErrorCode::NotFound
    } else if lower.contains("autenticación")
        || lower.contains("unauthorized")
        || lower.contains("api key")
        || lower.contains("401")
    {
        ErrorCode::Auth
    } else if lower.contains("tardó demasiado")
        || lower.contains("tiempo de espera")
        || lower.contains("timeout")
    {
        ErrorCode::Timeout
    } else if lower.contains("inválido")
        || lower.contains("falta el parámetro")
        || lower.contains("ingresa el nombre")
    {
        ErrorCode::Validation
    } else if lower.contains("conexión")
        || lower.contains("red")
        || lower.contains("servicio")
        || lower.contains("network")
    {
        ErrorCode::Upstream
    } else {
        ErrorCode::Internal
    }
}

/// Legacy display-formatting table. Returns the friendly text when the
/// message contains a known phrase.
pub fn friendly_hint(message: &str) -> Option<&'static str> {
    let lower = message.to_lowercase();
    KNOWN_PHRASES
        .iter()
        .find(|(phrase, _)| lower.contains(phrase))
        .map(|(_, hint)| *hint)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infers_categories_from_spanish_and_english_phrases() {
        assert_eq!(infer_code("Ciudad 'X' no encontrada"), ErrorCode::NotFound);
        assert_eq!(infer_code("city not found"), ErrorCode::NotFound);
        assert_eq!(
            infer_code("Error de autenticación con el servicio"),
            ErrorCode::Auth
        );
        assert_eq!(
            infer_code("La consulta tardó demasiado tiempo"),
            ErrorCode::Timeout
        );
        assert_eq!(infer_code("Nombre de ciudad inválido"), ErrorCode::Validation);
        assert_eq!(
            infer_code("Error de conexión con el servicio meteorológico"),
            ErrorCode::Upstream
        );
        assert_eq!(infer_code("algo totalmente inesperado"), ErrorCode::Internal);
    }

    #[test]
    fn friendly_hint_matches_known_phrases_case_insensitively() {
        assert_eq!(
            friendly_hint("City Not Found"),
            Some("Ciudad no encontrada. Verifica el nombre e intenta nuevamente.")
        );
        assert_eq!(
            friendly_hint("request timeout exceeded"),
            Some("La consulta tardó demasiado. Intenta nuevamente.")
        );
        assert_eq!(friendly_hint("Soleado, 25°C"), None);
    }
}

use std::{
    sync::atomic::{AtomicU64, Ordering},
    time::Duration,
};

use reqwest::Client;
use shared::{domain::CityName, protocol::ClimaReply};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

pub mod classify;
pub mod error;
pub mod surface;

pub use error::{QueryError, CONNECTION_ERROR_PREFIX, EMPTY_INPUT_MESSAGE};
pub use surface::QuerySurface;

/// Time limit for one lookup request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Observable state of the query cycle. Exactly one is active; `Success` and
/// `Error` persist until the next submission.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ControllerState {
    #[default]
    Idle,
    Loading,
    Success(String),
    Error(String),
}

/// Owns the form lifecycle: validates input, issues the lookup request, and
/// renders idle/loading/terminal states onto its surface. The surface and
/// the busy flag are mutated by this controller only.
pub struct QueryController<S: QuerySurface> {
    http: Client,
    base_url: String,
    surface: S,
    request_timeout: Duration,
    state: Mutex<ControllerState>,
    // Latest submission wins: resolutions carrying an older number are
    // dropped before touching the surface.
    seq: AtomicU64,
}

impl<S: QuerySurface> QueryController<S> {
    pub fn new(base_url: impl Into<String>, surface: S) -> Self {
        let base_url = base_url.into();
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            surface,
            request_timeout: REQUEST_TIMEOUT,
            state: Mutex::new(ControllerState::Idle),
            seq: AtomicU64::new(0),
        }
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub async fn state(&self) -> ControllerState {
        self.state.lock().await.clone()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Submits one query. Empty input (after trimming) renders the fixed
    /// message without any network activity; otherwise the cycle is
    /// loading → request → terminal state, with the busy condition restored
    /// on every branch. Errors never propagate out of this call.
    pub async fn submit_query(&self, raw_input: &str) {
        let seq = self.seq.fetch_add(1, Ordering::SeqCst) + 1;

        let Some(city) = CityName::parse(raw_input) else {
            self.finish(seq, Err(QueryError::EmptyInput)).await;
            return;
        };

        info!(ciudad = %city, "consultando clima");
        self.surface.set_busy(true);
        self.surface.show_loading();
        *self.state.lock().await = ControllerState::Loading;

        let outcome = self.dispatch(&city).await;
        self.finish(seq, outcome).await;
    }

    async fn dispatch(&self, city: &CityName) -> Result<String, QueryError> {
        let response = self
            .http
            .get(format!("{}/clima_actual", self.base_url))
            .query(&[("ciudad", city.as_str())])
            .timeout(self.request_timeout)
            .send()
            .await
            .map_err(|e| self.classify_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            // A failed status wins over body shape; the error text is the
            // payload's if it has one, else a generic line with the status.
            let reply = response.json::<ClimaReply>().await.unwrap_or_default();
            let message = reply.error.unwrap_or_else(|| {
                let reason = status
                    .canonical_reason()
                    .map(str::to_string)
                    .unwrap_or_else(|| status.as_u16().to_string());
                format!("Error del servidor: {reason}")
            });
            return Err(QueryError::Http {
                status: status.as_u16(),
                message,
                code: reply.code,
            });
        }

        let reply = response
            .json::<ClimaReply>()
            .await
            .map_err(|e| QueryError::MalformedReply(e.to_string()))?;

        if let Some(message) = reply.error {
            return Err(QueryError::Server {
                message,
                code: reply.code,
            });
        }

        reply
            .resultado
            .ok_or_else(|| QueryError::MalformedReply("respuesta sin campo resultado".to_string()))
    }

    fn classify_send_error(&self, e: reqwest::Error) -> QueryError {
        if e.is_timeout() {
            QueryError::Timeout {
                limit: self.request_timeout,
            }
        } else {
            QueryError::Transport(e.to_string())
        }
    }

    /// Applies a resolution: restores the not-busy condition, renders the
    /// terminal state, records it. A resolution from a superseded submission
    /// is dropped whole.
    async fn finish(&self, seq: u64, outcome: Result<String, QueryError>) {
        if self.seq.load(Ordering::SeqCst) != seq {
            debug!(seq, "descartando respuesta de una consulta superada");
            return;
        }

        self.surface.set_busy(false);
        let state = match outcome {
            Ok(resultado) => {
                self.surface.show_success(&resultado);
                ControllerState::Success(resultado)
            }
            Err(err) => {
                let message = err.display_message();
                warn!(code = ?err.code(), %message, "consulta fallida");
                self.surface.show_error(&message);
                ControllerState::Error(message)
            }
        };
        *self.state.lock().await = state;
    }
}

#[cfg(test)]
mod tests;

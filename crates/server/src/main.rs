use std::{net::SocketAddr, sync::Arc, time::Duration};

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::Utc;
use openweather::OpenWeatherClient;
use shared::{
    error::{ClimaError, ErrorCode},
    protocol::{CityQuery, ClimaReply, HealthReply},
};
use tower_http::timeout::TimeoutLayer;
use tracing::{info, warn};

mod config;

use config::{load_settings, require_api_key};

const SERVICE_NAME: &str = "Consultor del Clima";

/// Ceiling for a whole request, above the upstream's own limit.
const REQUEST_DEADLINE: Duration = Duration::from_secs(30);

#[derive(Clone)]
struct AppState {
    clima: Arc<OpenWeatherClient>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let settings = load_settings();
    let api_key = require_api_key(&settings)?;
    let clima = OpenWeatherClient::new(api_key)
        .with_base_url(settings.openweather_base_url.clone())
        .with_timeout(Duration::from_secs(settings.upstream_timeout_seconds));

    let app = build_router(AppState {
        clima: Arc::new(clima),
    });

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(%addr, "servidor escuchando");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/clima_actual", get(clima_actual))
        .route("/health", get(health))
        .fallback(endpoint_not_found)
        .layer(TimeoutLayer::new(REQUEST_DEADLINE))
        .with_state(state)
}

async fn clima_actual(
    State(state): State<AppState>,
    Query(q): Query<CityQuery>,
) -> (StatusCode, Json<ClimaReply>) {
    let ciudad = q
        .ciudad
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty());
    let Some(ciudad) = ciudad else {
        warn!("solicitud sin parámetro 'ciudad'");
        return error_reply(&ClimaError::MissingCity);
    };

    match state.clima.lookup(ciudad).await {
        Ok(resultado) => (StatusCode::OK, Json(ClimaReply::ok(resultado))),
        Err(err) => {
            warn!(%ciudad, %err, "error de clima");
            error_reply(&err)
        }
    }
}

fn error_reply(err: &ClimaError) -> (StatusCode, Json<ClimaReply>) {
    let status = StatusCode::from_u16(err.http_status())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(ClimaReply::failure(err)))
}

async fn health() -> Json<HealthReply> {
    Json(HealthReply {
        status: "healthy".into(),
        timestamp: Utc::now().to_rfc3339(),
        service: SERVICE_NAME.into(),
    })
}

async fn endpoint_not_found() -> (StatusCode, Json<ClimaReply>) {
    (
        StatusCode::NOT_FOUND,
        Json(ClimaReply {
            error: Some("Endpoint no encontrado".into()),
            code: Some(ErrorCode::NotFound),
            ..ClimaReply::default()
        }),
    )
}

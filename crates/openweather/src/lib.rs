use std::time::Duration;

use chrono::{Local, TimeZone};
use reqwest::Client;
use serde::Deserialize;
use shared::error::ClimaError;
use tracing::{error, info, warn};

pub const DEFAULT_BASE_URL: &str = "http://api.openweathermap.org/data/2.5";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const MIN_CITY_LEN: usize = 2;
const MAX_CITY_LEN: usize = 50;

/// Current-conditions subset of the OpenWeatherMap reply that the report
/// needs. Anything missing here surfaces as `ClimaError::IncompleteData`.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentConditions {
    pub name: String,
    pub sys: SysInfo,
    pub main: MainMetrics,
    pub weather: Vec<WeatherDescription>,
    pub wind: Wind,
    pub dt: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SysInfo {
    pub country: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MainMetrics {
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: i64,
    pub pressure: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeatherDescription {
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Wind {
    pub speed: f64,
}

#[derive(Debug, Deserialize)]
struct UpstreamError {
    #[serde(default)]
    message: Option<String>,
}

pub struct OpenWeatherClient {
    http: Client,
    api_key: String,
    base_url: String,
    timeout: Duration,
}

impl OpenWeatherClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Looks up the current weather for `ciudad` and renders the report.
    pub async fn lookup(&self, ciudad: &str) -> Result<String, ClimaError> {
        info!(%ciudad, "consultando clima");

        if !is_valid_city(ciudad) {
            warn!(%ciudad, "nombre de ciudad rechazado");
            return Err(ClimaError::InvalidCity);
        }

        let conditions = self.current_conditions(ciudad).await?;
        let report = format_report(&conditions);
        info!(%ciudad, "clima obtenido");
        Ok(report)
    }

    pub async fn current_conditions(
        &self,
        ciudad: &str,
    ) -> Result<CurrentConditions, ClimaError> {
        let url = format!("{}/weather", self.base_url);
        let response = self
            .http
            .get(url)
            .query(&[
                ("q", ciudad.trim()),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
                ("lang", "es"),
            ])
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| classify_transport_error(ciudad, &e))?;

        let status = response.status();
        if status.is_success() {
            return response.json::<CurrentConditions>().await.map_err(|e| {
                error!(%ciudad, %e, "respuesta del servicio incompleta");
                ClimaError::IncompleteData
            });
        }

        let detail = response
            .json::<UpstreamError>()
            .await
            .ok()
            .and_then(|body| body.message)
            .unwrap_or_else(|| "Error desconocido".to_string());

        warn!(%ciudad, %status, %detail, "el servicio meteorológico devolvió error");
        match status.as_u16() {
            404 => Err(ClimaError::CityNotFound(ciudad.trim().to_string())),
            401 => Err(ClimaError::UpstreamAuth),
            _ => Err(ClimaError::UpstreamStatus(detail)),
        }
    }
}

fn classify_transport_error(ciudad: &str, e: &reqwest::Error) -> ClimaError {
    if e.is_timeout() {
        error!(%ciudad, "timeout al consultar clima");
        ClimaError::UpstreamTimeout
    } else if e.is_connect() {
        error!(%ciudad, "error de conexión al consultar clima");
        ClimaError::UpstreamConnection
    } else {
        error!(%ciudad, %e, "error de red al consultar clima");
        ClimaError::Network
    }
}

fn is_valid_city(ciudad: &str) -> bool {
    let len = ciudad.trim().chars().count();
    (MIN_CITY_LEN..=MAX_CITY_LEN).contains(&len)
}

/// Renders the fixed Spanish report. Line layout and emoji are part of the
/// observable output; `resultado` reaches the result region verbatim.
pub fn format_report(conditions: &CurrentConditions) -> String {
    let descripcion = conditions
        .weather
        .first()
        .map(|w| title_case(&w.description))
        .unwrap_or_default();

    let hora_local = Local
        .timestamp_opt(conditions.dt, 0)
        .single()
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "desconocida".to_string());

    format!(
        "🌤️  CLIMA ACTUAL EN {ciudad}, {pais}\n\
         {separador}\n\
         📅 Fecha y hora: {hora_local}\n\
         🌡️  Temperatura: {temp}°C (Sensación térmica: {sensacion}°C)\n\
         ☁️  Condición: {descripcion}\n\
         💧 Humedad: {humedad}%\n\
         🌪️  Presión: {presion} hPa\n\
         💨 Viento: {viento} m/s",
        ciudad = conditions.name.to_uppercase(),
        pais = conditions.sys.country,
        separador = "=".repeat(50),
        temp = conditions.main.temp,
        sensacion = conditions.main.feels_like,
        humedad = conditions.main.humidity,
        presion = conditions.main.pressure,
        viento = conditions.wind.speed,
    )
}

fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests;

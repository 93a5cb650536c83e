//! OpenWeatherMap fetch orchestrator and provider payload schema.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use crate::{
    error::FetchError,
    model::{CurrentWeather, ForecastWeather, Units},
    normalize,
};

use super::WeatherProvider;

pub const BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
/// The free forecast feed covers at most five days.
pub const MAX_FORECAST_DAYS: u8 = 5;

const CURRENT_ENDPOINT: &str = "/weather";
const FORECAST_ENDPOINT: &str = "/forecast";

/// Fetches from OpenWeatherMap and normalizes into the internal model.
///
/// One outbound request per call, bounded by a per-request timeout. No
/// retries, no caching. The credential and endpoint are held explicitly so
/// the orchestrator stays free of ambient process state.
#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    timeout: Duration,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            http: Client::new(),
        }
    }

    /// Point the provider at a different endpoint, mainly for tests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Issue one GET against `endpoint` and return the success body.
    ///
    /// Transport failures (connect, DNS, timeout) surface as
    /// [`FetchError::Transient`]; a non-2xx answer as [`FetchError::Upstream`]
    /// carrying the status and raw body.
    async fn get_body(
        &self,
        endpoint: &str,
        location: &str,
        units: Units,
    ) -> Result<String, FetchError> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!(%url, location, units = units.as_str(), "requesting weather data");

        let res = self
            .http
            .get(&url)
            .timeout(self.timeout)
            .query(&[
                ("q", location),
                ("appid", self.api_key.as_str()),
                ("units", units.as_str()),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            warn!(
                status = status.as_u16(),
                body = %truncate_body(&body),
                "weather provider request failed"
            );
            return Err(FetchError::Upstream { status: status.as_u16(), body });
        }

        Ok(body)
    }

    async fn fetch_current(
        &self,
        location: &str,
        units: Units,
    ) -> Result<CurrentWeather, FetchError> {
        let body = self.get_body(CURRENT_ENDPOINT, location, units).await?;
        let parsed: OwCurrentResponse = serde_json::from_str(&body)?;

        Ok(normalize::current_weather(parsed))
    }

    async fn fetch_forecast(
        &self,
        location: &str,
        units: Units,
        days: u8,
    ) -> Result<ForecastWeather, FetchError> {
        // Second line of defense; callers are expected to validate [1,5].
        let days = days.clamp(1, MAX_FORECAST_DAYS);

        let body = self.get_body(FORECAST_ENDPOINT, location, units).await?;
        let parsed: OwForecastResponse = serde_json::from_str(&body)?;

        Ok(normalize::forecast_weather(parsed, usize::from(days)))
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current_weather(
        &self,
        location: &str,
        units: Units,
    ) -> Result<CurrentWeather, FetchError> {
        self.fetch_current(location, units).await
    }

    async fn forecast(
        &self,
        location: &str,
        units: Units,
        days: u8,
    ) -> Result<ForecastWeather, FetchError> {
        self.fetch_forecast(location, units, days).await
    }
}

/// Condition descriptor shared by both payloads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OwWeather {
    pub main: String,
    pub description: String,
    #[serde(default)]
    pub icon: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OwMain {
    pub temp: f64,
    #[serde(default)]
    pub feels_like: f64,
    #[serde(default)]
    pub temp_min: f64,
    #[serde(default)]
    pub temp_max: f64,
    #[serde(default)]
    pub pressure: f64,
    pub humidity: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OwWind {
    pub speed: f64,
    #[serde(default)]
    pub deg: i64,
    #[serde(default)]
    pub gust: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OwClouds {
    #[serde(default)]
    pub all: i64,
}

/// Rain or snow volume over the preceding three hours.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OwPrecipitation {
    #[serde(rename = "3h", default)]
    pub three_hour: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OwCoord {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OwSys {
    #[serde(default)]
    pub country: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OwCurrentResponse {
    #[serde(default)]
    pub coord: OwCoord,
    #[serde(default)]
    pub weather: Vec<OwWeather>,
    pub main: OwMain,
    pub wind: OwWind,
    #[serde(default)]
    pub clouds: OwClouds,
    pub dt: i64,
    #[serde(default)]
    pub sys: OwSys,
    #[serde(default)]
    pub name: String,
}

/// One 3-hour forecast sample.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OwForecastEntry {
    pub dt: i64,
    pub main: OwMain,
    #[serde(default)]
    pub weather: Vec<OwWeather>,
    #[serde(default)]
    pub clouds: OwClouds,
    pub wind: OwWind,
    #[serde(default)]
    pub rain: OwPrecipitation,
    #[serde(default)]
    pub snow: OwPrecipitation,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OwCity {
    pub name: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub coord: OwCoord,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OwForecastResponse {
    pub list: Vec<OwForecastEntry>,
    pub city: OwCity,
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

use crate::{
    Config,
    error::FetchError,
    model::{CurrentWeather, ForecastWeather, Units},
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Capability of fetching upstream weather data and normalizing it into the
/// internal model. A second provider can be added by implementing this trait
/// without touching the aggregation layer.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Fetch and normalize current conditions for a location.
    async fn current_weather(
        &self,
        location: &str,
        units: Units,
    ) -> Result<CurrentWeather, FetchError>;

    /// Fetch the 3-hour forecast feed for a location and aggregate it into at
    /// most `days` daily summaries.
    async fn forecast(
        &self,
        location: &str,
        units: Units,
        days: u8,
    ) -> Result<ForecastWeather, FetchError>;
}

/// Construct the OpenWeatherMap provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No API key configured.\n\
             Hint: run `weathering configure` and enter your OpenWeatherMap API key,\n\
             or set the {} environment variable.",
            crate::config::API_KEY_ENV
        )
    })?;

    let provider = OpenWeatherProvider::new(api_key.to_owned()).with_timeout(config.timeout());

    Ok(Box::new(provider))
}

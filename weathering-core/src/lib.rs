//! Core library for the `weathering` app.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeatherMap provider behind a provider-agnostic capability trait
//! - Normalization of provider payloads into the internal weather model
//! - Aggregation of 3-hour forecast samples into daily summaries
//!
//! It is used by `weathering-cli`, but can also be reused by other binaries or
//! services.

pub mod aggregate;
pub mod config;
pub mod error;
pub mod model;
pub mod normalize;
pub mod provider;

pub use config::Config;
pub use error::FetchError;
pub use model::{CurrentWeather, DailyForecast, ForecastWeather, Location, Units};
pub use provider::openweather::OpenWeatherProvider;
pub use provider::{WeatherProvider, provider_from_config};

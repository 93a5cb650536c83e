use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};

use weathering_core::{
    Config, CurrentWeather, FetchError, ForecastWeather, Units, provider_from_config,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weathering", version, about = "Current weather and daily forecasts")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeatherMap API key in the config file.
    Configure,

    /// Show current weather for a location.
    Current {
        /// City name, e.g. "London" or "London,GB".
        location: String,

        /// Measurement units: metric, imperial or kelvin.
        #[arg(long, default_value = "")]
        units: String,

        /// Print the normalized model as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show an aggregated daily forecast for a location.
    Forecast {
        /// City name, e.g. "London" or "London,GB".
        location: String,

        /// Number of forecast days.
        #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u8).range(1..=5))]
        days: u8,

        /// Measurement units: metric, imperial or kelvin.
        #[arg(long, default_value = "")]
        units: String,

        /// Print the normalized model as JSON.
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Current { location, units, json } => {
                let (location, units) = validate_request(&location, &units)?;
                let config = Config::load()?;
                let provider = provider_from_config(&config)?;

                let current = provider
                    .current_weather(&location, units)
                    .await
                    .map_err(describe_fetch_error)?;

                if json {
                    println!("{}", serde_json::to_string_pretty(&current)?);
                } else {
                    print_current(&current);
                }
                Ok(())
            }
            Command::Forecast { location, days, units, json } => {
                let (location, units) = validate_request(&location, &units)?;
                let config = Config::load()?;
                let provider = provider_from_config(&config)?;

                let forecast = provider
                    .forecast(&location, units, days)
                    .await
                    .map_err(describe_fetch_error)?;

                if json {
                    println!("{}", serde_json::to_string_pretty(&forecast)?);
                } else {
                    print_forecast(&forecast);
                }
                Ok(())
            }
        }
    }
}

/// Reject malformed caller input before the provider is ever invoked.
///
/// Returns the trimmed location, so the value that passed the length check is
/// the one sent upstream.
fn validate_request(location: &str, units: &str) -> Result<(String, Units)> {
    let trimmed = location.trim();
    if trimmed.len() < 2 {
        bail!("Location must be at least 2 characters long");
    }
    if trimmed.len() > 100 {
        bail!("Location must be less than 100 characters");
    }

    Ok((trimmed.to_string(), Units::try_from(units)?))
}

/// Translate known fetch failures into user-facing messages.
fn describe_fetch_error(err: FetchError) -> anyhow::Error {
    match err.upstream_status() {
        Some(401) => anyhow::anyhow!("Invalid API key. Please check your OpenWeatherMap API key."),
        Some(404) => anyhow::anyhow!("Location not found."),
        Some(429) => anyhow::anyhow!("Rate limit exceeded. Please try again later."),
        _ => {
            if err.is_retryable() {
                anyhow::Error::new(err)
                    .context("Weather service temporarily unavailable. Please try again later.")
            } else {
                anyhow::Error::new(err)
            }
        }
    }
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let api_key = inquire::Password::new("OpenWeatherMap API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    config.set_api_key(api_key);
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

fn print_current(current: &CurrentWeather) {
    println!("{}, {}", current.location.name, current.location.country);
    println!(
        "  {} ({:.1}°, feels like {:.1}°)",
        current.description, current.temperature, current.feels_like
    );
    println!(
        "  humidity {}%  pressure {:.0} hPa  cloud cover {}%",
        current.humidity, current.pressure, current.cloud_cover
    );
    println!(
        "  wind {:.1} at {}°",
        current.wind_speed, current.wind_direction
    );
    println!("  updated {}", current.last_updated.format("%Y-%m-%d %H:%M UTC"));
}

fn print_forecast(forecast: &ForecastWeather) {
    println!("{}, {}", forecast.location.name, forecast.location.country);
    for day in &forecast.days {
        let mut line = format!(
            "  {}  {:.1}° / {:.1}°  avg {:.1}°  {}",
            day.date, day.min_temp, day.max_temp, day.avg_temp, day.description
        );
        if day.precipitation > 0.0 {
            line.push_str(&format!("  precip {:.1} mm", day.precipitation));
        }
        println!("{line}");
    }
}

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Geographic location shared by current and forecast responses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Normalized current conditions for one location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub location: Location,
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity: i64,
    pub pressure: f64,
    pub wind_speed: f64,
    pub wind_direction: i64,
    pub wind_gust: f64,
    pub cloud_cover: i64,
    pub condition: String,
    pub description: String,
    pub icon: String,
    pub last_updated: DateTime<Utc>,
}

/// Aggregated forecast for a single calendar day.
///
/// For a non-empty sample group `min_temp <= avg_temp <= max_temp` holds; an
/// empty group carries only the date with every numeric field at zero.
/// `chance_of_rain` and `uv_index` are reserved for provider fields not yet
/// exposed by the free forecast feed and stay at zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyForecast {
    pub date: NaiveDate,
    pub min_temp: f64,
    pub max_temp: f64,
    pub avg_temp: f64,
    pub condition: String,
    pub description: String,
    pub icon: String,
    pub humidity: i64,
    pub wind_speed: f64,
    pub precipitation: f64,
    pub chance_of_rain: i64,
    pub uv_index: f64,
}

impl DailyForecast {
    /// Degenerate summary for a date with no samples.
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            min_temp: 0.0,
            max_temp: 0.0,
            avg_temp: 0.0,
            condition: String::new(),
            description: String::new(),
            icon: String::new(),
            humidity: 0,
            wind_speed: 0.0,
            precipitation: 0.0,
            chance_of_rain: 0,
            uv_index: 0.0,
        }
    }
}

/// Normalized multi-day forecast, days ordered by date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastWeather {
    pub location: Location,
    pub days: Vec<DailyForecast>,
}

/// Measurement system requested from the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Units {
    #[default]
    Metric,
    Imperial,
    Kelvin,
}

impl Units {
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
            Units::Kelvin => "kelvin",
        }
    }

    pub const fn all() -> &'static [Units] {
        &[Units::Metric, Units::Imperial, Units::Kelvin]
    }
}

impl std::fmt::Display for Units {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Units {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            // Empty means "use the default".
            "" => Ok(Units::default()),
            "metric" => Ok(Units::Metric),
            "imperial" => Ok(Units::Imperial),
            "kelvin" => Ok(Units::Kelvin),
            _ => Err(anyhow::anyhow!(
                "Unknown units '{value}'. Supported units: metric, imperial, kelvin."
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn units_as_str_roundtrip() {
        for units in Units::all() {
            let s = units.as_str();
            let parsed = Units::try_from(s).expect("roundtrip should succeed");
            assert_eq!(*units, parsed);
        }
    }

    #[test]
    fn empty_units_means_default() {
        let parsed = Units::try_from("").expect("empty string is the default");
        assert_eq!(parsed, Units::Metric);
    }

    #[test]
    fn units_parse_is_case_insensitive() {
        assert_eq!(Units::try_from("Imperial").unwrap(), Units::Imperial);
    }

    #[test]
    fn unknown_units_error() {
        let err = Units::try_from("fahrenheit").unwrap_err();
        assert!(err.to_string().contains("Unknown units"));
    }

    #[test]
    fn empty_forecast_is_all_zero() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();
        let f = DailyForecast::empty(date);
        assert_eq!(f.date, date);
        assert_eq!(f.min_temp, 0.0);
        assert_eq!(f.max_temp, 0.0);
        assert_eq!(f.avg_temp, 0.0);
        assert_eq!(f.humidity, 0);
        assert_eq!(f.precipitation, 0.0);
        assert!(f.condition.is_empty());
    }
}

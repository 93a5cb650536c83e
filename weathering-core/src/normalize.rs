//! Mapping of raw OpenWeatherMap payloads onto the provider-agnostic model.

use chrono::{DateTime, Utc};

use crate::aggregate;
use crate::model::{CurrentWeather, ForecastWeather, Location};
use crate::provider::openweather::{OwCurrentResponse, OwForecastResponse};

/// Map a decoded current-weather payload onto [`CurrentWeather`].
///
/// Condition, description and icon come from the first element of the
/// provider's condition list, or stay empty if the list is. The free-text
/// description is title-cased for display consistency.
pub fn current_weather(raw: OwCurrentResponse) -> CurrentWeather {
    let (condition, description, icon) = raw
        .weather
        .first()
        .map(|w| (w.main.clone(), title_case(&w.description), w.icon.clone()))
        .unwrap_or_default();

    CurrentWeather {
        location: Location {
            name: raw.name,
            country: raw.sys.country,
            latitude: raw.coord.lat,
            longitude: raw.coord.lon,
        },
        temperature: raw.main.temp,
        feels_like: raw.main.feels_like,
        humidity: raw.main.humidity,
        pressure: raw.main.pressure,
        wind_speed: raw.wind.speed,
        wind_direction: raw.wind.deg,
        wind_gust: raw.wind.gust,
        cloud_cover: raw.clouds.all,
        condition,
        description,
        icon,
        last_updated: DateTime::from_timestamp(raw.dt, 0).unwrap_or_else(Utc::now),
    }
}

/// Map a decoded forecast payload onto [`ForecastWeather`], reducing the
/// 3-hour sample list to at most `max_days` daily summaries.
pub fn forecast_weather(raw: OwForecastResponse, max_days: usize) -> ForecastWeather {
    ForecastWeather {
        location: Location {
            name: raw.city.name,
            country: raw.city.country,
            latitude: raw.city.coord.lat,
            longitude: raw.city.coord.lon,
        },
        days: aggregate::aggregate_daily(&raw.list, max_days),
    }
}

/// Capitalize the first letter of every whitespace-separated word, leaving
/// the rest of each word untouched. Locale-neutral; already-mixed-case input
/// passes through with only the first letters raised.
pub(crate) fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::openweather::{
        OwCity, OwClouds, OwCoord, OwForecastEntry, OwMain, OwSys, OwWeather, OwWind,
    };

    fn testville_current() -> OwCurrentResponse {
        OwCurrentResponse {
            coord: OwCoord { lat: 1.23, lon: 4.56 },
            weather: vec![OwWeather {
                main: "Clear".to_string(),
                description: "clear sky".to_string(),
                icon: "01d".to_string(),
            }],
            main: OwMain {
                temp: 10.5,
                feels_like: 9.0,
                temp_min: 8.0,
                temp_max: 12.0,
                pressure: 1012.0,
                humidity: 80,
            },
            wind: OwWind { speed: 3.4, deg: 180, gust: 5.1 },
            clouds: OwClouds { all: 0 },
            dt: 1_700_000_000,
            sys: OwSys { country: "GB".to_string() },
            name: "Testville".to_string(),
        }
    }

    #[test]
    fn current_weather_maps_all_fields() {
        let data = current_weather(testville_current());

        assert_eq!(data.location.name, "Testville");
        assert_eq!(data.location.country, "GB");
        assert_eq!(data.location.latitude, 1.23);
        assert_eq!(data.location.longitude, 4.56);
        assert_eq!(data.temperature, 10.5);
        assert_eq!(data.feels_like, 9.0);
        assert_eq!(data.humidity, 80);
        assert_eq!(data.pressure, 1012.0);
        assert_eq!(data.wind_speed, 3.4);
        assert_eq!(data.wind_direction, 180);
        assert_eq!(data.wind_gust, 5.1);
        assert_eq!(data.cloud_cover, 0);
        assert_eq!(data.condition, "Clear");
        assert_eq!(data.description, "Clear Sky");
        assert_eq!(data.icon, "01d");
        assert_eq!(data.last_updated.timestamp(), 1_700_000_000);
    }

    #[test]
    fn current_weather_tolerates_empty_condition_list() {
        let mut raw = testville_current();
        raw.weather.clear();

        let data = current_weather(raw);
        assert!(data.condition.is_empty());
        assert!(data.description.is_empty());
        assert!(data.icon.is_empty());
    }

    #[test]
    fn forecast_weather_reads_location_from_city() {
        let raw = OwForecastResponse {
            list: vec![OwForecastEntry { dt: 1_700_000_000, ..Default::default() }],
            city: OwCity {
                name: "Testville".to_string(),
                country: "GB".to_string(),
                coord: OwCoord { lat: 1.23, lon: 4.56 },
            },
        };

        let data = forecast_weather(raw, 5);
        assert_eq!(data.location.name, "Testville");
        assert_eq!(data.location.country, "GB");
        assert_eq!(data.days.len(), 1);
    }

    #[test]
    fn title_case_capitalizes_each_word() {
        assert_eq!(title_case("clear sky"), "Clear Sky");
        assert_eq!(title_case("light intensity drizzle"), "Light Intensity Drizzle");
    }

    #[test]
    fn title_case_leaves_mixed_case_tails_alone() {
        assert_eq!(title_case("cLEar sKY"), "CLEar SKY");
    }

    #[test]
    fn title_case_of_empty_string_is_empty() {
        assert_eq!(title_case(""), "");
    }
}

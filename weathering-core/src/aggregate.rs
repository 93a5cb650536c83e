//! Reduction of the provider's 3-hour forecast feed into daily summaries.

use chrono::{DateTime, NaiveDate};

use crate::model::DailyForecast;
use crate::normalize::title_case;
use crate::provider::openweather::OwForecastEntry;

/// Group 3-hour samples by calendar date and reduce each group to one
/// [`DailyForecast`].
///
/// Groups open in first-seen order; once `max_days` distinct dates have been
/// opened, samples for any further date are dropped. The finished summaries
/// are sorted by date, so callers get chronological output even if the
/// upstream stream ever arrives out of order.
pub fn aggregate_daily(samples: &[OwForecastEntry], max_days: usize) -> Vec<DailyForecast> {
    let mut groups: Vec<(NaiveDate, Vec<&OwForecastEntry>)> = Vec::new();

    for sample in samples {
        let Some(date) = sample_date(sample) else {
            continue;
        };

        if let Some((_, group)) = groups.iter_mut().find(|(d, _)| *d == date) {
            group.push(sample);
        } else if groups.len() < max_days {
            groups.push((date, vec![sample]));
        }
    }

    let mut days: Vec<DailyForecast> = groups
        .into_iter()
        .map(|(date, group)| daily_summary(date, &group))
        .collect();
    days.sort_by_key(|day| day.date);
    days
}

/// Calendar date of a sample in the provider's reporting time zone (UTC).
fn sample_date(sample: &OwForecastEntry) -> Option<NaiveDate> {
    DateTime::from_timestamp(sample.dt, 0).map(|dt| dt.date_naive())
}

/// Reduce one day's samples to a single summary.
///
/// Min/max come from the per-sample `temp_min`/`temp_max` extremes, the
/// average from the instantaneous `temp`. The representative condition is the
/// one reported by the middle sample of the day; a missing condition list
/// there yields empty strings. An empty group yields the date with all
/// numeric fields at zero.
fn daily_summary(date: NaiveDate, samples: &[&OwForecastEntry]) -> DailyForecast {
    if samples.is_empty() {
        return DailyForecast::empty(date);
    }

    let mut min_temp = samples[0].main.temp_min;
    let mut max_temp = samples[0].main.temp_max;
    let mut total_temp = 0.0;
    let mut total_humidity = 0.0;
    let mut total_wind = 0.0;
    let mut precipitation = 0.0;

    for sample in samples {
        min_temp = min_temp.min(sample.main.temp_min);
        max_temp = max_temp.max(sample.main.temp_max);

        total_temp += sample.main.temp;
        total_humidity += sample.main.humidity as f64;
        total_wind += sample.wind.speed;

        if sample.rain.three_hour > 0.0 {
            precipitation += sample.rain.three_hour;
        }
        if sample.snow.three_hour > 0.0 {
            precipitation += sample.snow.three_hour;
        }
    }

    let count = samples.len() as f64;

    let (condition, description, icon) = samples[samples.len() / 2]
        .weather
        .first()
        .map(|w| (w.main.clone(), title_case(&w.description), w.icon.clone()))
        .unwrap_or_default();

    DailyForecast {
        date,
        min_temp,
        max_temp,
        avg_temp: total_temp / count,
        condition,
        description,
        icon,
        // truncated, not rounded
        humidity: (total_humidity / count) as i64,
        wind_speed: total_wind / count,
        precipitation,
        chance_of_rain: 0,
        uv_index: 0.0,
    }
}

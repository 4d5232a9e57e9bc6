use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::{
    CurrentWeather, FetchError, ForecastDay, Location,
    http::get_json,
    provider::{Service, WeatherProvider},
};

pub const OPEN_METEO_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// Longest forecast Open-Meteo will serve.
pub const MAX_FORECAST_DAYS: usize = 16;

const DAILY_FIELDS: &str = "weathercode,temperature_2m_max,temperature_2m_min,precipitation_sum";

/// Open-Meteo needs no API key.
#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    http: Client,
    base_url: String,
}

impl OpenMeteoProvider {
    pub fn new(http: Client) -> Self {
        Self { http, base_url: OPEN_METEO_URL.to_string() }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn coordinates(location: &Location) -> [(&'static str, String); 2] {
        [("latitude", location.latitude.to_string()), ("longitude", location.longitude.to_string())]
    }
}

#[derive(Debug, Deserialize)]
struct OmCurrentWeather {
    temperature: f64,
    #[serde(alias = "weather_code")]
    weathercode: f64,
    windspeed: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OmCurrentResponse {
    current_weather: OmCurrentWeather,
}

impl From<OmCurrentWeather> for CurrentWeather {
    fn from(cw: OmCurrentWeather) -> Self {
        CurrentWeather {
            temperature: cw.temperature,
            weathercode: wmo_code(cw.weathercode),
            windspeed: cw.windspeed,
        }
    }
}

#[derive(Debug, Deserialize)]
struct OmDaily {
    time: Vec<String>,
    #[serde(alias = "weather_code")]
    weathercode: Vec<f64>,
    temperature_2m_max: Vec<f64>,
    temperature_2m_min: Vec<f64>,
    precipitation_sum: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct OmForecastResponse {
    daily: OmDaily,
}

impl OmDaily {
    /// Zip the parallel arrays; the shortest one bounds the result.
    fn into_days(self, requested: usize) -> Vec<ForecastDay> {
        self.time
            .into_iter()
            .zip(self.weathercode)
            .zip(self.temperature_2m_max.into_iter().zip(self.temperature_2m_min))
            .zip(self.precipitation_sum)
            .take(requested)
            .map(|(((date, code), (temp_max, temp_min)), precipitation)| ForecastDay {
                date,
                temp_max,
                temp_min,
                precipitation: precipitation.unwrap_or(0.0),
                weathercode: wmo_code(code),
            })
            .collect()
    }
}

fn wmo_code(raw: f64) -> i32 {
    raw.round() as i32
}

#[async_trait]
impl WeatherProvider for OpenMeteoProvider {
    async fn current(&self, location: &Location) -> Result<CurrentWeather, FetchError> {
        debug!(lat = location.latitude, lon = location.longitude, "fetching current weather");

        let request = self
            .http
            .get(self.base_url.as_str())
            .query(&Self::coordinates(location))
            .query(&[("current_weather", "true")]);

        let parsed: OmCurrentResponse = get_json(Service::OpenMeteo, request).await?;
        debug!(?parsed, "current weather");

        Ok(parsed.current_weather.into())
    }

    async fn forecast(
        &self,
        location: &Location,
        days: usize,
    ) -> Result<Vec<ForecastDay>, FetchError> {
        let forecast_days = days.clamp(1, MAX_FORECAST_DAYS);
        debug!(lat = location.latitude, lon = location.longitude, forecast_days, "fetching forecast");
        let forecast_days = forecast_days.to_string();

        let request = self
            .http
            .get(self.base_url.as_str())
            .query(&Self::coordinates(location))
            .query(&[
                ("daily", DAILY_FIELDS),
                ("timezone", "auto"),
                ("forecast_days", forecast_days.as_str()),
            ]);

        let parsed: OmForecastResponse = get_json(Service::OpenMeteo, request).await?;
        let days = parsed.daily.into_days(days);

        if days.is_empty() {
            return Err(FetchError::invalid(Service::OpenMeteo, "forecast contained no days"));
        }

        Ok(days)
    }
}

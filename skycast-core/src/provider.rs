use crate::{CurrentWeather, FetchError, ForecastDay, Location, MoonPhase};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::fmt::Debug;

pub mod openmeteo;
pub mod visualcrossing;

pub use openmeteo::OpenMeteoProvider;
pub use visualcrossing::VisualCrossingProvider;

/// Upstream services skycast talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    OpenMeteo,
    VisualCrossing,
    IpInfo,
    IpApi,
}

impl Service {
    pub fn as_str(&self) -> &'static str {
        match self {
            Service::OpenMeteo => "Open-Meteo",
            Service::VisualCrossing => "Visual Crossing",
            Service::IpInfo => "ipinfo.io",
            Service::IpApi => "ip-api.com",
        }
    }

    pub const fn all() -> &'static [Service] {
        &[Service::OpenMeteo, Service::VisualCrossing, Service::IpInfo, Service::IpApi]
    }
}

impl std::fmt::Display for Service {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current conditions and daily forecast for a coordinate.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current(&self, location: &Location) -> Result<CurrentWeather, FetchError>;

    /// Up to `days` entries; fewer when the upstream returns less.
    async fn forecast(&self, location: &Location, days: usize)
    -> Result<Vec<ForecastDay>, FetchError>;
}

#[async_trait]
pub trait MoonProvider: Send + Sync + Debug {
    async fn moon_phase(&self, location: &Location, date: NaiveDate)
    -> Result<MoonPhase, FetchError>;
}

use serde::{Deserialize, Serialize};

/// Where the coordinates of a [`Location`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationSource {
    IpInfo,
    IpApi,
    Default,
    Manual,
}

impl LocationSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            LocationSource::IpInfo => "ipinfo.io",
            LocationSource::IpApi => "ip-api.com",
            LocationSource::Default => "built-in default",
            LocationSource::Manual => "command line",
        }
    }
}

impl std::fmt::Display for LocationSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub city: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    pub source: LocationSource,
}

impl Location {
    pub const DEFAULT_CITY: &'static str = "Singapore";
    pub const DEFAULT_COUNTRY: &'static str = "SG";
    pub const DEFAULT_LATITUDE: f64 = 1.29;
    pub const DEFAULT_LONGITUDE: f64 = 103.85;

    /// Static location used when every lookup fails.
    pub fn fallback() -> Self {
        Self {
            city: Self::DEFAULT_CITY.to_string(),
            country: Self::DEFAULT_COUNTRY.to_string(),
            latitude: Self::DEFAULT_LATITUDE,
            longitude: Self::DEFAULT_LONGITUDE,
            source: LocationSource::Default,
        }
    }

    /// Replace the coordinates, keeping city and country.
    pub fn with_coordinates(self, latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude, source: LocationSource::Manual, ..self }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    /// Degrees Celsius.
    pub temperature: f64,
    pub weathercode: i32,
    /// km/h, when reported.
    pub windspeed: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    /// ISO date (`YYYY-MM-DD`) in the location's timezone.
    pub date: String,
    pub temp_max: f64,
    pub temp_min: f64,
    /// Millimetres.
    pub precipitation: f64,
    pub weathercode: i32,
}

/// Position in the lunar cycle: 0 and 1 are new moon, 0.5 is full moon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64")]
pub struct MoonPhase(f64);

impl MoonPhase {
    pub fn new(fraction: f64) -> Option<Self> {
        (0.0..=1.0).contains(&fraction).then_some(Self(fraction))
    }

    pub fn fraction(&self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for MoonPhase {
    type Error = String;

    fn try_from(fraction: f64) -> Result<Self, Self::Error> {
        Self::new(fraction).ok_or_else(|| format!("moon phase {fraction} is outside [0, 1]"))
    }
}

//! Core library for the `skycast` CLI.
//!
//! This crate defines:
//! - Configuration & API key handling
//! - Location resolution with an IP-lookup fallback chain
//! - Open-Meteo and Visual Crossing providers
//! - Weather/moon icon mapping and the lunar calendar
//!
//! It is used by `skycast-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod http;
pub mod icon;
pub mod location;
pub mod lunar;
pub mod model;
pub mod provider;

pub use config::Config;
pub use error::FetchError;
pub use icon::{MoonIcon, WeatherIcon};
pub use location::{LocationProvider, LocationResolver, Resolved};
pub use lunar::LunarDate;
pub use model::{CurrentWeather, ForecastDay, Location, LocationSource, MoonPhase};
pub use provider::{MoonProvider, Service, WeatherProvider};

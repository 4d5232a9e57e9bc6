use anyhow::{Context, anyhow, bail};
use chrono::{Local, NaiveDate};
use clap::{ArgAction, Parser, Subcommand};
use skycast_core::{
    Config, Location, LocationResolver, LunarDate, MoonProvider, WeatherProvider,
    config::API_KEY_ENV,
    http::{self, Client},
    location::override_coordinates,
    provider::{OpenMeteoProvider, VisualCrossingProvider},
};
use tracing::debug;

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "skycast",
    version,
    about = "Current weather, forecast and moon phase as ASCII art"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Show current weather.
    #[arg(short, long)]
    pub weather: bool,

    /// Show the moon phase (needs a Visual Crossing API key).
    #[arg(short, long)]
    pub moon: bool,

    /// Show the daily forecast.
    #[arg(short = 'F', long)]
    pub forecast: bool,

    /// Show the date in the Chinese lunar calendar.
    #[arg(short = 'L', long)]
    pub lunar: bool,

    /// Show every section. This is the default when no section is chosen.
    #[arg(short, long)]
    pub all: bool,

    /// Number of forecast days.
    #[arg(
        short = 'D',
        long,
        default_value_t = 3,
        value_parser = clap::value_parser!(u8).range(1..=16)
    )]
    pub forecast_days: u8,

    /// Latitude. Together with --lon, replaces the IP-based location.
    #[arg(long, allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Longitude. Together with --lat, replaces the IP-based location.
    #[arg(long, allow_negative_numbers = true)]
    pub lon: Option<f64>,

    /// Visual Crossing API key; overrides API_KEY and the config file.
    #[arg(long)]
    pub api_key: Option<String>,

    /// Day for the moon and lunar sections (YYYY-MM-DD); defaults to today.
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Disable coloured output.
    #[arg(long)]
    pub no_color: bool,

    /// More log output on stderr (-v info, -vv debug).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, Subcommand)]
pub enum Command {
    /// Store the Visual Crossing API key in the config file.
    Configure,
}

/// Which panels to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sections {
    pub weather: bool,
    pub forecast: bool,
    pub moon: bool,
    pub lunar: bool,
}

impl Sections {
    pub const ALL: Sections = Sections { weather: true, forecast: true, moon: true, lunar: true };

    /// The lunar panel is computed locally; everything else needs coordinates.
    pub fn needs_location(&self) -> bool {
        self.weather || self.forecast || self.moon
    }
}

impl Cli {
    pub fn sections(&self) -> Sections {
        let picked = Sections {
            weather: self.weather,
            forecast: self.forecast,
            moon: self.moon,
            lunar: self.lunar,
        };

        if self.all || picked == Sections::default() { Sections::ALL } else { picked }
    }

    pub async fn run(self) -> anyhow::Result<()> {
        if self.no_color {
            colored::control::set_override(false);
        }

        match self.command {
            Some(Command::Configure) => configure(),
            None => self.show().await,
        }
    }

    async fn show(self) -> anyhow::Result<()> {
        let sections = self.sections();
        debug!(?sections, "selected sections");

        let config = Config::load()?;

        // Checked before any request goes out.
        let moon_key = if sections.moon {
            let key = config.resolve_api_key(self.api_key.clone(), std::env::var(API_KEY_ENV).ok());
            Some(key.ok_or_else(|| {
                anyhow!(
                    "You must provide a Visual Crossing API key to show the moon phase.\n\
                     Hint: pass --api-key, set {API_KEY_ENV} in the environment or .env, \
                     or run `skycast configure`."
                )
            })?)
        } else {
            None
        };

        let date = self.date.unwrap_or_else(|| Local::now().date_naive());
        let http = http::client(config.timeout())?;

        if sections.needs_location() {
            let location = self.locate(&http).await;
            let weather = OpenMeteoProvider::new(http.clone());

            if sections.weather {
                match weather.current(&location).await {
                    Ok(current) => println!("{}", render::weather(&location, &current)),
                    Err(e) => println!("{}", render::failure("Weather", &e)),
                }
            }

            if sections.forecast {
                match weather.forecast(&location, usize::from(self.forecast_days)).await {
                    Ok(days) => println!("{}", render::forecast(&location, &days)),
                    Err(e) => println!("{}", render::failure("Forecast", &e)),
                }
            }

            if let Some(api_key) = moon_key {
                let moon = VisualCrossingProvider::new(api_key, http.clone());
                match moon.moon_phase(&location, date).await {
                    Ok(phase) => println!("{}", render::moon(phase, date)),
                    Err(e) => println!("{}", render::failure("Moon", &e)),
                }
            }
        }

        if sections.lunar {
            println!("{}", render::lunar(date, LunarDate::from_solar(date)));
        }

        Ok(())
    }

    async fn locate(&self, http: &Client) -> Location {
        let resolved = LocationResolver::with_default_providers(http.clone()).resolve().await;
        for failure in &resolved.failures {
            println!("{}", render::failure("Location", failure));
        }

        override_coordinates(resolved.location, self.lat, self.lon)
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = inquire::Password::new("Visual Crossing API key:")
        .without_confirmation()
        .with_help_message("Used for moon phase lookups")
        .prompt()
        .context("Failed to read API key")?;

    let api_key = api_key.trim();
    if api_key.is_empty() {
        bail!("API key must not be empty");
    }

    config.set_api_key(api_key.to_string());
    config.save()?;

    println!("Saved API key to {}", Config::config_file_path()?.display());
    Ok(())
}

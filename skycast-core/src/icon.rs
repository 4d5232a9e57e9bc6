//! Map weather codes and moon phase fractions onto a fixed set of ASCII art.

use crate::MoonPhase;

const SUNNY: &str = r"
          |
          |   .
   `.  *  |     .'
     `. ._|_* .'  .
   . * .'   `.  *
-------|     |-------
   .  *`.___.' *  .
      .'  |* `.  *
    .' *  |  . `.
        . |
          | jgs
";

const CLOUDY: &str = r"
     .--.
  .-(    ).
 (___.__)__)
";

const RAIN: &str = r"
 , // ,,/ ,.// ,/ ,// / /, // ,/, /, // ,/,
 /, .-'   `-. ,// ////, // ,/,/, // ///
";

const SNOW: &str = r"
    *  .  *
  . _\/ \/_ .
   \  \ /  /
  -==>: X :<==-
";

const STORM: &str = r"
   .-.
  (   )
 (___)
  ⚡⚡⚡
";

const MOON_NEW: &str = r"
     *****
   *********
  ***********
  ***********
   *********
     *****
";

const MOON_FIRST_QUARTER: &str = r"
     *****
   ***     *
  ***      *
  ***      *
   ***     *
     *****
";

const MOON_FULL: &str = r"
     *****
   *******
  *********
  *********
   *******
     *****
";

const MOON_LAST_QUARTER: &str = r"
     *****
   *     ***
  *      ***
  *      ***
   *     ***
     *****
";

/// WMO weather interpretation codes, bucketed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeatherIcon {
    Sunny,
    Cloudy,
    Rain,
    Snow,
    Storm,
}

impl WeatherIcon {
    /// Total over all codes; anything unrecognised is cloudy.
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => WeatherIcon::Sunny,
            1..=3 => WeatherIcon::Cloudy,
            51..=67 | 80..=82 => WeatherIcon::Rain,
            71..=77 | 85..=86 => WeatherIcon::Snow,
            95..=99 => WeatherIcon::Storm,
            _ => WeatherIcon::Cloudy,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WeatherIcon::Sunny => "Sunny",
            WeatherIcon::Cloudy => "Cloudy",
            WeatherIcon::Rain => "Rain",
            WeatherIcon::Snow => "Snow",
            WeatherIcon::Storm => "Thunderstorm",
        }
    }

    pub fn art(&self) -> &'static str {
        match self {
            WeatherIcon::Sunny => SUNNY,
            WeatherIcon::Cloudy => CLOUDY,
            WeatherIcon::Rain => RAIN,
            WeatherIcon::Snow => SNOW,
            WeatherIcon::Storm => STORM,
        }
    }

    pub const fn all() -> &'static [WeatherIcon] {
        &[
            WeatherIcon::Sunny,
            WeatherIcon::Cloudy,
            WeatherIcon::Rain,
            WeatherIcon::Snow,
            WeatherIcon::Storm,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoonIcon {
    New,
    FirstQuarter,
    Full,
    LastQuarter,
}

impl MoonIcon {
    /// Buckets are closed below and open above. New moon wraps around
    /// 0/1, and anything unmatched (NaN included) is new.
    #[allow(clippy::manual_range_contains)]
    pub fn from_fraction(p: f64) -> Self {
        if p < 0.125 || p > 0.875 {
            MoonIcon::New
        } else if (0.125..0.375).contains(&p) {
            MoonIcon::FirstQuarter
        } else if (0.375..0.625).contains(&p) {
            MoonIcon::Full
        } else if (0.625..0.875).contains(&p) {
            MoonIcon::LastQuarter
        } else {
            MoonIcon::New
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MoonIcon::New => "New Moon",
            MoonIcon::FirstQuarter => "First Quarter",
            MoonIcon::Full => "Full Moon",
            MoonIcon::LastQuarter => "Last Quarter",
        }
    }

    pub fn art(&self) -> &'static str {
        match self {
            MoonIcon::New => MOON_NEW,
            MoonIcon::FirstQuarter => MOON_FIRST_QUARTER,
            MoonIcon::Full => MOON_FULL,
            MoonIcon::LastQuarter => MOON_LAST_QUARTER,
        }
    }
}

impl From<MoonPhase> for MoonIcon {
    fn from(phase: MoonPhase) -> Self {
        MoonIcon::from_fraction(phase.fraction())
    }
}

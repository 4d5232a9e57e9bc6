//! Terminal panels.
//!
//! Every function returns the finished text so callers decide where it goes.

use std::fmt::{Display, Write};

use chrono::NaiveDate;
use colored::{Color, Colorize};
use skycast_core::{
    CurrentWeather, ForecastDay, Location, LunarDate, MoonIcon, MoonPhase, WeatherIcon,
};
use unicode_width::UnicodeWidthStr;

/// Draw `body` inside a rounded box with `title` in the top border.
pub fn panel(title: &str, body: &str, color: Color) -> String {
    let lines = body_lines(body);
    let title_width = title.width();
    let inner = lines.iter().map(|l| l.width()).max().unwrap_or(0).max(title_width + 2);

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}{}{}",
        "╭─ ".color(color),
        title.bold(),
        format!(" {}╮", "─".repeat(inner - title_width - 1)).color(color),
    );
    for line in &lines {
        let pad = " ".repeat(inner - line.width());
        let _ = writeln!(out, "{} {line}{pad} {}", "│".color(color), "│".color(color));
    }
    let _ = write!(out, "{}", format!("╰{}╯", "─".repeat(inner + 2)).color(color));
    out
}

/// Drop blank lines at either end; keep interior spacing.
fn body_lines(body: &str) -> Vec<&str> {
    let lines: Vec<&str> = body.lines().map(str::trim_end).collect();
    let start = lines.iter().position(|l| !l.is_empty()).unwrap_or(lines.len());
    let end = lines.iter().rposition(|l| !l.is_empty()).map_or(start, |i| i + 1);
    lines[start..end].to_vec()
}

fn weather_color(icon: WeatherIcon) -> Color {
    match icon {
        WeatherIcon::Sunny => Color::Yellow,
        WeatherIcon::Cloudy => Color::White,
        WeatherIcon::Rain => Color::Blue,
        WeatherIcon::Snow => Color::Cyan,
        WeatherIcon::Storm => Color::Magenta,
    }
}

pub fn weather(location: &Location, current: &CurrentWeather) -> String {
    let icon = WeatherIcon::from_code(current.weathercode);

    let mut body = format!("{}\n{}  {:.1}°C", icon.art(), icon.label(), current.temperature);
    if let Some(wind) = current.windspeed {
        let _ = write!(body, "  wind {wind:.0} km/h");
    }
    let _ = write!(
        body,
        "\n{:.2}, {:.2} via {}",
        location.latitude, location.longitude, location.source
    );

    panel(
        &format!("Weather in {}, {}", location.city, location.country),
        &body,
        weather_color(icon),
    )
}

pub fn forecast(location: &Location, days: &[ForecastDay]) -> String {
    let mut body = String::new();
    for day in days {
        let icon = WeatherIcon::from_code(day.weathercode);
        let _ = writeln!(
            body,
            "{}  {:<12} {:>5.1}°C / {:>5.1}°C  {:>5.1} mm",
            day.date,
            icon.label(),
            day.temp_max,
            day.temp_min,
            day.precipitation,
        );
    }

    panel(&format!("{}-day forecast for {}", days.len(), location.city), &body, Color::Green)
}

pub fn moon(phase: MoonPhase, date: NaiveDate) -> String {
    let icon = MoonIcon::from(phase);
    let body = format!("{}\n{}  {date}", icon.art(), icon.label());

    panel(&format!("Moon Phase ({:.2})", phase.fraction()), &body, Color::BrightBlue)
}

pub fn lunar(date: NaiveDate, lunar: Option<LunarDate>) -> String {
    let body = match lunar {
        Some(l) => format!("{date}  ->  lunar {l}\nYear of the {}", l.zodiac()),
        None => {
            let range = skycast_core::lunar::supported_range();
            format!(
                "{date} is outside the supported range ({} to {})",
                range.start(),
                range.end()
            )
        }
    };

    panel("Lunar Calendar", &body, Color::Red)
}

/// One-line report for a section that could not be fetched.
pub fn failure(section: &str, err: &impl Display) -> String {
    format!("[{section} fetch failed: {err}]").yellow().to_string()
}

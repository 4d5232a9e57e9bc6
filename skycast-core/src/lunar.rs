//! Gregorian to Chinese lunisolar calendar conversion, backed by
//! `chinese-lunisolar-calendar`.

use std::{fmt, ops::RangeInclusive};

use chinese_lunisolar_calendar::{
    LunisolarDate, MAX_LUNISOLAR_DATE_IN_SOLAR_DATE, MIN_LUNISOLAR_DATE_IN_SOLAR_DATE,
};
use chrono::NaiveDate;

/// Solar dates that can be converted.
pub fn supported_range() -> RangeInclusive<NaiveDate> {
    MIN_LUNISOLAR_DATE_IN_SOLAR_DATE.to_naive_date()..=MAX_LUNISOLAR_DATE_IN_SOLAR_DATE.to_naive_date()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LunarDate {
    pub year: i32,
    pub month: u8,
    pub day: u8,
    /// The date falls in the intercalary copy of `month`.
    pub is_leap_month: bool,
}

impl LunarDate {
    /// `None` outside [`supported_range`].
    pub fn from_solar(date: NaiveDate) -> Option<Self> {
        let lunisolar = LunisolarDate::from_date(date).ok()?;
        let month = lunisolar.to_lunar_month();

        Some(Self {
            year: i32::from(lunisolar.to_lunisolar_year().to_u16()),
            month: month.to_u8(),
            day: lunisolar.to_lunar_day().to_u8(),
            is_leap_month: month.is_leap_month(),
        })
    }

    pub fn zodiac(&self) -> &'static str {
        const ANIMALS: [&str; 12] = [
            "Rat", "Ox", "Tiger", "Rabbit", "Dragon", "Snake", "Horse", "Goat", "Monkey",
            "Rooster", "Dog", "Pig",
        ];
        ANIMALS[(self.year - 4).rem_euclid(12) as usize]
    }
}

impl fmt::Display for LunarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}-{:02}", self.year, self.month, self.day)?;
        if self.is_leap_month {
            f.write_str(" (leap month)")?;
        }
        Ok(())
    }
}

//! Display helpers shared by the list and detail views.

use time::macros::format_description;
use time::{Date, Month};

pub const UNKNOWN_DATE: &str = "Unknown Date";

/// Render a snapshot `release_date` (`DD/MM/YY` or `DD/MM/YYYY`) as `M/D/YYYY`.
///
/// Two-digit years below 50 land in the 2000s, the rest in the 1900s. Empty or
/// absent input gives [`UNKNOWN_DATE`]; anything that doesn't parse into a real
/// calendar date comes back unchanged.
pub fn parse_release_date(raw: Option<&str>) -> String {
    let raw = match raw {
        Some(s) if !s.is_empty() => s,
        _ => return UNKNOWN_DATE.to_string(),
    };
    let parts: Vec<&str> = raw.split('/').collect();
    if parts.len() != 3 {
        return raw.to_string();
    }
    let format = format_description!("[month padding:none]/[day padding:none]/[year]");
    calendar_date(parts[0], parts[1], parts[2])
        .and_then(|d| d.format(&format).ok())
        .unwrap_or_else(|| raw.to_string())
}

fn calendar_date(day: &str, month: &str, year: &str) -> Option<Date> {
    let day: u8 = day.trim().parse().ok()?;
    let month: u8 = month.trim().parse().ok()?;
    let mut year: i32 = year.trim().parse().ok()?;
    if year < 100 {
        year += if year < 50 { 2000 } else { 1900 };
    }
    Date::from_calendar_date(year, Month::try_from(month).ok()?, day).ok()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingColor {
    Green,
    Orange,
    Red,
}

impl RatingColor {
    pub fn hex(self) -> &'static str {
        match self {
            RatingColor::Green => "#4caf50",
            RatingColor::Orange => "#ff9800",
            RatingColor::Red => "#f44336",
        }
    }

    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            RatingColor::Green => (0x4c, 0xaf, 0x50),
            RatingColor::Orange => (0xff, 0x98, 0x00),
            RatingColor::Red => (0xf4, 0x43, 0x36),
        }
    }
}

/// A missing rating is treated like a low one.
pub fn rating_color(rating: Option<f64>) -> RatingColor {
    match rating {
        Some(r) if r >= 8.0 => RatingColor::Green,
        Some(r) if r >= 6.0 => RatingColor::Orange,
        _ => RatingColor::Red,
    }
}

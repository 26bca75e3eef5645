use std::fmt::Display;

use chrono::{DateTime, TimeZone};

const AVATAR_BASE_URL: &str = "https://i.pravatar.cc/40";

/// Avatar URL for a subject. Only the first space of the name is dropped,
/// so "Ana Maria Torres" becomes "AnaMaria Torres".
pub fn avatar_url(name: &str) -> String {
    format!("{}?u={}", AVATAR_BASE_URL, name.replacen(' ', "", 1))
}

/// Kiosk clock format, e.g. `19:05:32`.
pub fn format_clock<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    at.format("%H:%M:%S").to_string()
}

/// Kiosk date format, e.g. `16/10/2026` or `5/3/2026`.
pub fn format_day<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    at.format("%-d/%-m/%Y").to_string()
}

/// Hour of a formatted clock string: the leading digits before the first colon.
pub fn leading_hour(time: &str) -> Option<u32> {
    let head = time.split(':').next()?.trim_start();
    let digits: String = head.chars().take_while(|c| c.is_ascii_digit()).collect();

    if digits.is_empty() {
        return None;
    }

    digits.parse::<u32>().ok()
}

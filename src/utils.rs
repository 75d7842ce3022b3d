use chrono::{DateTime, Local, TimeZone};
use reqwest::Client;
use std::time::Duration;

/// Build the HTTP client shared by both providers
pub fn build_http_client(timeout_secs: u64) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
}

/// Uppercase the first character and lowercase the rest ("light rain" -> "Light rain")
pub fn capitalize(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// True for absolute http(s) URLs; false for Reddit placeholders like "self" or "default"
pub fn is_http_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

/// Escape text for HTML element content and quoted attribute values
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Wall-clock time as HH:MM:SS
pub fn clock_time<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format("%H:%M:%S").to_string()
}

/// The `last_updated` stamp the API returns
pub fn last_updated() -> String {
    clock_time(&Local::now())
}

/// Temperature with one decimal place
pub fn format_temperature(celsius: f64) -> String {
    format!("{:.1}°C", celsius)
}

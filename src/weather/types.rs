use serde::{Deserialize, Serialize};

/// Normalized current conditions for one city.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherSummary {
    pub city: String,
    /// Degrees Celsius.
    pub temp: f64,
    pub description: String,
}

// Raw shape of `/data/2.5/weather`. Fields are optional so a partial payload
// can be reported by name instead of as a serde error.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentWeatherResponse {
    pub name: Option<String>,
    pub main: Option<CurrentWeatherMain>,
    #[serde(default)]
    pub weather: Vec<CurrentWeatherCondition>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CurrentWeatherMain {
    pub temp: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CurrentWeatherCondition {
    pub description: Option<String>,
}

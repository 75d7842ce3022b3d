pub mod openweather;
pub mod types;

pub use openweather::OpenWeatherClient;
pub use types::WeatherSummary;

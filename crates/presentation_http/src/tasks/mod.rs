//! Background tasks for the HTTP presentation layer

mod weather_updater;

pub use weather_updater::spawn_weather_updater;

//! Open-Meteo weather integration
//!
//! Client for the Open-Meteo forecast API (<https://open-meteo.com>).
//! Fetches current conditions plus the day's sunrise and sunset in the
//! location's own UTC offset. No API key is required.

pub mod client;
mod models;

pub use client::{OpenMeteoClient, WeatherClient, WeatherConfig, WeatherError};
pub use models::CurrentConditions;

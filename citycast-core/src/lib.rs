//! Core library for the `citycast` weather lookup.
//!
//! This crate defines:
//! - The request controller (`Idle → Loading → Success/Error`)
//! - A WeatherAPI.com client behind the [`WeatherProvider`] trait
//! - Shared domain models, the condition icon lookup and configuration
//!
//! It is used by `citycast-cli`, but any front end can drive a
//! [`RequestController`] and render from its [`WeatherResult`].

pub mod config;
pub mod controller;
pub mod error;
pub mod icon;
pub mod model;
pub mod provider;

pub use config::{Config, ProviderConfig};
pub use controller::RequestController;
pub use error::WeatherError;
pub use icon::WeatherIcon;
pub use model::{
    Condition, CurrentConditions, ForecastDay, Location, WeatherPayload, WeatherQuery,
    WeatherResult,
};
pub use provider::{WeatherProvider, provider_from_config};

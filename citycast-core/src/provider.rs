use crate::{
    Config, WeatherError, WeatherPayload, WeatherQuery, provider::weatherapi::WeatherApiProvider,
};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

pub mod weatherapi;

/// One-shot weather lookup: a single request, no retries.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn fetch(&self, query: &WeatherQuery, days: u8) -> Result<WeatherPayload, WeatherError>;
}

/// Construct the WeatherAPI.com provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Arc<dyn WeatherProvider>> {
    let provider_config = config.weatherapi.as_ref().ok_or_else(|| {
        anyhow::anyhow!(
            "No API key configured for weatherapi.\n\
                 Hint: run `citycast configure` and enter your WeatherAPI.com key."
        )
    })?;

    let mut provider = WeatherApiProvider::new(provider_config.api_key.clone());
    if let Some(base_url) = &provider_config.base_url {
        provider = provider.base_url(base_url.as_str());
    }

    Ok(Arc::new(provider))
}

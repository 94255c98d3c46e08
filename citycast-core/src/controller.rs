//! Request controller: owns the observable [`WeatherResult`] and drives it
//! through `Loading` to `Success`/`Error` for every submitted city.

use std::sync::Arc;

use log::{error, info};
use tokio::{sync::watch, task::JoinHandle};

use crate::{WeatherError, WeatherProvider, WeatherQuery, WeatherResult};

#[derive(Debug, Clone)]
pub struct RequestController {
    provider: Arc<dyn WeatherProvider>,
    forecast_days: u8,
    state: Arc<watch::Sender<WeatherResult>>,
}

impl RequestController {
    pub fn new(provider: Arc<dyn WeatherProvider>, forecast_days: u8) -> Self {
        let (state, _) = watch::channel(WeatherResult::Idle);
        Self { provider, forecast_days, state: Arc::new(state) }
    }

    /// Receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<WeatherResult> {
        self.state.subscribe()
    }

    /// Snapshot of the current state.
    pub fn current(&self) -> WeatherResult {
        self.state.borrow().clone()
    }

    /// Move to `Loading` right away, then fetch `city` on a spawned task.
    ///
    /// Must be called from within a tokio runtime. Earlier in-flight requests
    /// are not cancelled; whichever request completes last owns the final state.
    /// Dropping the returned handle does not abort the request.
    pub fn submit(&self, city: &str) -> JoinHandle<()> {
        self.state.send_replace(WeatherResult::Loading);

        let query = WeatherQuery::new(city);
        let provider = Arc::clone(&self.provider);
        let state = Arc::clone(&self.state);
        let days = self.forecast_days;

        tokio::spawn(async move {
            let outcome = match query {
                Ok(query) => {
                    info!("Fetching weather for {} ({days} days)", query.city());
                    provider.fetch(&query, days).await
                }
                Err(err) => Err(err),
            };

            if let Err(err) = &outcome {
                log_failure(err);
            }

            state.send_replace(WeatherResult::from_outcome(outcome));
        })
    }
}

fn log_failure(err: &WeatherError) {
    match err {
        WeatherError::Http { status, body } => error!("HTTP error: {status}, {body}"),
        WeatherError::Network(source) => error!("Failed to fetch data: {source}"),
        WeatherError::Decode(source) => error!("Failed to decode data: {source}"),
        WeatherError::EmptyQuery => info!("Ignoring empty city name"),
    }
}

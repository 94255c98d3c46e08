use thiserror::Error;

/// Message shown for failures that carry no status code.
pub const GENERIC_FAILURE: &str = "Failed to load data";

/// Everything that can go wrong between a submitted city and a decoded payload.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("city name must not be empty")]
    EmptyQuery,

    #[error("request to weather provider failed")]
    Network(#[from] reqwest::Error),

    #[error("weather provider returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("failed to decode weather provider response")]
    Decode(#[from] serde_json::Error),
}

impl WeatherError {
    /// Short string surfaced to the user in the `Error` state.
    pub fn user_message(&self) -> String {
        match self {
            WeatherError::EmptyQuery => "Please enter a city name".to_string(),
            WeatherError::Http { status, .. } => format!("{GENERIC_FAILURE}: {status}"),
            WeatherError::Network(_) | WeatherError::Decode(_) => GENERIC_FAILURE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_message_carries_status_code() {
        let err = WeatherError::Http { status: 400, body: "bad".into() };
        assert_eq!(err.user_message(), "Failed to load data: 400");
    }

    #[test]
    fn decode_error_message_is_generic() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = WeatherError::from(source);
        assert_eq!(err.user_message(), GENERIC_FAILURE);
    }

    #[test]
    fn empty_query_asks_for_a_city() {
        assert_eq!(WeatherError::EmptyQuery.user_message(), "Please enter a city name");
    }
}

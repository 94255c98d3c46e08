use async_trait::async_trait;
use log::debug;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::{
    error::WeatherError,
    model::{Condition, CurrentConditions, ForecastDay, Location, WeatherPayload, WeatherQuery},
};

use super::WeatherProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.weatherapi.com/v1";

/// Client for the WeatherAPI.com `forecast.json` endpoint.
#[derive(Debug, Clone)]
pub struct WeatherApiProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl WeatherApiProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_client(api_key, Client::new())
    }

    /// Reuse an existing HTTP client (connection pool, proxy settings, ...).
    pub fn with_client(api_key: String, http: Client) -> Self {
        Self { api_key, base_url: DEFAULT_BASE_URL.to_string(), http }
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn forecast_url(&self) -> String {
        format!("{}/forecast.json", self.base_url)
    }
}

#[async_trait]
impl WeatherProvider for WeatherApiProvider {
    async fn fetch(&self, query: &WeatherQuery, days: u8) -> Result<WeatherPayload, WeatherError> {
        let url = self.forecast_url();
        let days = days.to_string();
        debug!("GET {url} q={} days={days}", query.city());

        let res = self
            .http
            .get(&url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("q", query.city()),
                ("days", days.as_str()),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        decode_forecast(status, &body)
    }
}

/// Turn a raw provider answer into a payload.
///
/// Non-2xx statuses become [`WeatherError::Http`] regardless of the body; a 2xx
/// body that does not match the expected shape becomes [`WeatherError::Decode`].
pub fn decode_forecast(status: StatusCode, body: &str) -> Result<WeatherPayload, WeatherError> {
    if !status.is_success() {
        return Err(WeatherError::Http { status: status.as_u16(), body: truncate_body(body) });
    }

    let parsed: WaForecastResponse = serde_json::from_str(body)?;
    Ok(parsed.into())
}

#[derive(Debug, Deserialize)]
struct WaLocation {
    name: String,
    #[serde(default)]
    country: String,
    #[serde(default)]
    localtime: String,
}

#[derive(Debug, Deserialize)]
struct WaCondition {
    text: String,
    code: u32,
}

#[derive(Debug, Deserialize)]
struct WaCurrent {
    temp_c: f64,
    feelslike_c: f64,
    condition: WaCondition,
    precip_mm: f64,
    wind_kph: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct WaDay {
    maxtemp_c: f64,
    mintemp_c: f64,
    condition: WaCondition,
    #[serde(default)]
    totalprecip_mm: f64,
    #[serde(default)]
    daily_chance_of_rain: u8,
}

#[derive(Debug, Deserialize)]
struct WaForecastDay {
    date: String,
    day: WaDay,
}

#[derive(Debug, Deserialize)]
struct WaForecast {
    forecastday: Vec<WaForecastDay>,
}

#[derive(Debug, Deserialize)]
struct WaForecastResponse {
    location: WaLocation,
    current: WaCurrent,
    #[serde(default)]
    forecast: Option<WaForecast>,
}

impl From<WaCondition> for Condition {
    fn from(c: WaCondition) -> Self {
        Condition { code: c.code, text: c.text }
    }
}

impl From<WaForecastResponse> for WeatherPayload {
    fn from(r: WaForecastResponse) -> Self {
        let location = Location {
            name: r.location.name,
            country: r.location.country,
            localtime: r.location.localtime,
        };

        let current = CurrentConditions {
            temperature_c: r.current.temp_c,
            feels_like_c: r.current.feelslike_c,
            condition: r.current.condition.into(),
            precipitation_mm: r.current.precip_mm,
            wind_kph: r.current.wind_kph,
            humidity_pct: r.current.humidity,
        };

        let forecast = r.forecast.map(|f| {
            f.forecastday
                .into_iter()
                .map(|d| ForecastDay {
                    date: d.date,
                    min_temp_c: d.day.mintemp_c,
                    max_temp_c: d.day.maxtemp_c,
                    condition: d.day.condition.into(),
                    total_precipitation_mm: d.day.totalprecip_mm,
                    chance_of_rain_pct: d.day.daily_chance_of_rain,
                })
                .collect()
        });

        WeatherPayload { location, current, forecast }
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }

    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::TcpListener,
        task::JoinHandle,
    };

    const FIXTURE: &str = include_str!("../../fixtures/forecast_london.json");

    #[test]
    fn decodes_fixture() {
        let payload = decode_forecast(StatusCode::OK, FIXTURE).expect("fixture decodes");

        assert_eq!(payload.location.name, "London");
        assert_eq!(payload.location.country, "United Kingdom");
        assert_eq!(payload.current.temperature_c, 11.3);
        assert_eq!(payload.current.condition.code, 1183);
        assert_eq!(payload.current.precipitation_mm, 0.4);

        let days = payload.forecast.expect("fixture has a forecast");
        assert_eq!(days.len(), 3);
        assert_eq!(days[0].date, "2024-03-18");
        assert_eq!(days[0].min_temp_c, 6.1);
        assert_eq!(days[0].max_temp_c, 12.4);
        assert_eq!(days[2].condition.code, 1000);
        assert_eq!(days[1].chance_of_rain_pct, 87);
    }

    #[test]
    fn null_forecast_is_absent() {
        let body = r#"{
            "location": {
                "name": "Oslo", "country": "Norway", "localtime": "2024-03-18 09:00"
            },
            "current": {
                "temp_c": -2.0, "feelslike_c": -6.5, "precip_mm": 0.0, "wind_kph": 14.4,
                "humidity": 80, "condition": {"text": "Light snow", "code": 1213}
            },
            "forecast": null
        }"#;

        let payload = decode_forecast(StatusCode::OK, body).expect("null forecast decodes");
        assert_eq!(payload.location.name, "Oslo");
        assert!(payload.forecast.is_none());
    }

    #[test]
    fn missing_forecast_is_absent() {
        let body = r#"{
            "location": {"name": "Oslo"},
            "current": {
                "temp_c": -2.0, "feelslike_c": -6.5, "precip_mm": 0.0, "wind_kph": 14.4,
                "humidity": 80, "condition": {"text": "Light snow", "code": 1213}
            }
        }"#;

        let payload = decode_forecast(StatusCode::OK, body).expect("missing forecast decodes");
        assert!(payload.forecast.is_none());
        assert_eq!(payload.location.localtime, "");
    }

    #[test]
    fn non_success_status_is_http_error() {
        let body = r#"{"error":{"code":1006,"message":"No matching location found."}}"#;
        let err = decode_forecast(StatusCode::BAD_REQUEST, body).unwrap_err();

        match err {
            WeatherError::Http { status, body } => {
                assert_eq!(status, 400);
                assert!(body.contains("No matching location"));
            }
            other => panic!("expected Http error, got {other:?}"),
        }
    }

    #[test]
    fn malformed_body_is_decode_error() {
        let err = decode_forecast(StatusCode::OK, r#"{"current": {}}"#).unwrap_err();
        assert!(matches!(err, WeatherError::Decode(_)));

        let err = decode_forecast(StatusCode::OK, "<html>").unwrap_err();
        assert!(matches!(err, WeatherError::Decode(_)));
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let body = "é".repeat(150);
        let truncated = truncate_body(&body);
        assert!(truncated.ends_with("..."));
        assert!(truncated.len() <= 203);

        assert_eq!(truncate_body("short"), "short");
    }

    #[test]
    fn base_url_drops_trailing_slash() {
        let provider =
            WeatherApiProvider::new("KEY".into()).base_url("http://localhost:9999/v1/");
        assert_eq!(provider.forecast_url(), "http://localhost:9999/v1/forecast.json");
    }

    /// Answers one connection with `status_line` and `body`, returning the request line.
    async fn serve_once(
        status_line: &'static str,
        body: &'static str,
    ) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}/v1", listener.local_addr().unwrap());

        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut chunk = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&chunk[..n]);
            }

            let response = format!(
                "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\n\
                 content-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();

            String::from_utf8_lossy(&request).lines().next().unwrap_or_default().to_string()
        });

        (base_url, server)
    }

    #[tokio::test]
    async fn fetch_sends_key_city_and_days() {
        let body = r#"{"error":{"code":1006,"message":"No matching location found."}}"#;
        let (base_url, server) = serve_once("400 Bad Request", body).await;
        let provider = WeatherApiProvider::new("KEY".into()).base_url(base_url);
        let query = WeatherQuery::new("London").unwrap();

        let err = provider.fetch(&query, 3).await.unwrap_err();
        let request_line = server.await.unwrap();

        assert_eq!(request_line, "GET /v1/forecast.json?key=KEY&q=London&days=3 HTTP/1.1");
        assert!(matches!(err, WeatherError::Http { status: 400, .. }), "{err:?}");
    }

    #[tokio::test]
    async fn fetch_decodes_successful_response() {
        let (base_url, server) = serve_once("200 OK", FIXTURE).await;
        let provider = WeatherApiProvider::new("KEY".into()).base_url(base_url);
        let query = WeatherQuery::new("London").unwrap();

        let payload = provider.fetch(&query, 3).await.expect("fixture decodes");
        let request_line = server.await.unwrap();

        assert!(request_line.contains("days=3"), "{request_line}");
        assert_eq!(payload.location.name, "London");
        assert_eq!(payload.forecast.map(|days| days.len()), Some(3));
    }

    #[tokio::test]
    async fn unreachable_host_is_network_error() {
        let provider = WeatherApiProvider::new("KEY".into()).base_url("http://127.0.0.1:1");
        let query = WeatherQuery::new("London").unwrap();

        let err = provider.fetch(&query, 3).await.unwrap_err();
        assert!(matches!(err, WeatherError::Network(_)));
    }
}

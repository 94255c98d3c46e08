//! Plain-text rendering of the controller state.

use citycast_core::{ForecastDay, WeatherIcon, WeatherPayload, WeatherResult};

pub const IDLE_HINT: &str = "Search for a city to see the weather.";
pub const LOADING: &str = "Loading...";

pub fn render(state: &WeatherResult) -> String {
    match state {
        WeatherResult::Idle => IDLE_HINT.to_string(),
        WeatherResult::Loading => LOADING.to_string(),
        WeatherResult::Error(message) => message.clone(),
        WeatherResult::Success(payload) => render_payload(payload),
    }
}

fn render_payload(payload: &WeatherPayload) -> String {
    let current = &payload.current;
    let icon = WeatherIcon::from_code(current.condition.code);

    let place = match payload.location.country.as_str() {
        "" => payload.location.name.clone(),
        country => format!("{}, {country}", payload.location.name),
    };
    let mut lines = vec![format!("{}°C", current.temperature_c.round() as i64), place];

    let when = match payload.location.local_time() {
        Some(time) => time.format("%A %H:%M").to_string(),
        None => payload.location.localtime.clone(),
    };
    match when.as_str() {
        "" => lines.push(current.condition.text.clone()),
        when => lines.push(format!("{when}  {}", current.condition.text)),
    }

    lines.push(String::new());
    lines.push(format!("{} {}", icon.glyph(), icon));
    lines.push(String::new());
    lines.push(format!(
        "Precipitation: {:.1} mm    Wind: {} m/s",
        current.precipitation_mm,
        current.wind_speed_mps().round() as i64
    ));
    lines.push(format!(
        "Feels like: {}°C    Humidity: {}%",
        current.feels_like_c.round() as i64,
        current.humidity_pct
    ));

    if let Some(days) = payload.forecast.as_deref().filter(|days| !days.is_empty()) {
        lines.push(String::new());
        lines.extend(days.iter().map(forecast_line));
    }

    lines.join("\n")
}

fn forecast_line(day: &ForecastDay) -> String {
    let (weekday, date) = match day.parsed_date() {
        Some(date) => (date.format("%a").to_string(), date.format("%m/%d").to_string()),
        None => ("N/A".to_string(), "N/A".to_string()),
    };
    let icon = WeatherIcon::from_code(day.condition.code);

    format!(
        "{weekday:<3} {date:<5}  {} {:>3}° / {:>3}°C  {:>3}% rain  {:.1} mm",
        icon.glyph(),
        day.min_temp_c.round() as i64,
        day.max_temp_c.round() as i64,
        day.chance_of_rain_pct,
        day.total_precipitation_mm
    )
}

/// Display icon for a WeatherAPI.com condition code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeatherIcon {
    Sunny,
    Cloudy,
    Rainy,
    Thunder,
    Snowy,
}

impl WeatherIcon {
    /// Unknown codes fall back to `Cloudy`.
    pub fn from_code(code: u32) -> Self {
        match code {
            1000 => WeatherIcon::Sunny,
            1003 | 1006 | 1009 => WeatherIcon::Cloudy,
            1063 | 1180 | 1183 | 1186 | 1189 | 1192 | 1195 => WeatherIcon::Rainy,
            1087 | 1273 | 1276 => WeatherIcon::Thunder,
            1066 | 1114 | 1210 | 1213 | 1216 | 1219 | 1222 | 1225 => WeatherIcon::Snowy,
            _ => WeatherIcon::Cloudy,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherIcon::Sunny => "sunny",
            WeatherIcon::Cloudy => "cloudy",
            WeatherIcon::Rainy => "rainy",
            WeatherIcon::Thunder => "thunder",
            WeatherIcon::Snowy => "snowy",
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            WeatherIcon::Sunny => "☀",
            WeatherIcon::Cloudy => "☁",
            WeatherIcon::Rainy => "🌧",
            WeatherIcon::Thunder => "⛈",
            WeatherIcon::Snowy => "❄",
        }
    }
}

impl std::fmt::Display for WeatherIcon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

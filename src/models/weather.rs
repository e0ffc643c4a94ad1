use serde::{Deserialize, Serialize};

/// Weather situation as coded in the `weathersit` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WeatherSituation {
    Clear = 1,
    Mist = 2,
    LightPrecipitation = 3,
    HeavyPrecipitation = 4,
}

impl WeatherSituation {
    pub const ALL: [WeatherSituation; 4] = [
        WeatherSituation::Clear,
        WeatherSituation::Mist,
        WeatherSituation::LightPrecipitation,
        WeatherSituation::HeavyPrecipitation,
    ];

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(WeatherSituation::Clear),
            2 => Some(WeatherSituation::Mist),
            3 => Some(WeatherSituation::LightPrecipitation),
            4 => Some(WeatherSituation::HeavyPrecipitation),
            _ => None,
        }
    }

    pub fn code(&self) -> u8 {
        *self as u8
    }

    pub fn description(&self) -> &'static str {
        match self {
            WeatherSituation::Clear => "Clear",
            WeatherSituation::Mist => "Mist",
            WeatherSituation::LightPrecipitation => "Light Rain/Snow",
            WeatherSituation::HeavyPrecipitation => "Heavy Rain/Snow",
        }
    }
}

impl std::fmt::Display for WeatherSituation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.code(), self.description())
    }
}

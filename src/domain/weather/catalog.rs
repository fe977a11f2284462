use crate::cli::IconMode;

use BackgroundCategory as Bg;
use EffectTag as Fx;
use SunVisibility as Sun;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackgroundCategory {
    Clear,
    PartlyCloudy,
    Cloudy,
    Foggy,
    Rainy,
    Snowy,
    Thunderstorm,
}

impl BackgroundCategory {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Clear => "clear",
            Self::PartlyCloudy => "partly-cloudy",
            Self::Cloudy => "cloudy",
            Self::Foggy => "foggy",
            Self::Rainy => "rainy",
            Self::Snowy => "snowy",
            Self::Thunderstorm => "thunderstorm",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectTag {
    SunRays,
    MovingClouds,
    DenseClouds,
    Fog,
    Frost,
    ModerateRain,
    HeavyRain,
    StormyRain,
    LightSnow,
    ModerateSnow,
    HeavySnow,
    Lightning,
    Thunder,
}

impl EffectTag {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SunRays => "sun-rays",
            Self::MovingClouds => "moving-clouds",
            Self::DenseClouds => "dense-clouds",
            Self::Fog => "fog",
            Self::Frost => "frost",
            Self::ModerateRain => "moderate-rain",
            Self::HeavyRain => "heavy-rain",
            Self::StormyRain => "stormy-rain",
            Self::LightSnow => "light-snow",
            Self::ModerateSnow => "moderate-snow",
            Self::HeavySnow => "heavy-snow",
            Self::Lightning => "lightning",
            Self::Thunder => "thunder",
        }
    }
}

/// How much of the sun shows through a given condition during daytime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SunVisibility {
    Visible,
    Hidden,
    Dimmed,
    Intermittent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeatherCondition {
    pub code: u8,
    pub icon: &'static str,
    pub ascii_icon: &'static str,
    pub description: &'static str,
    pub background: BackgroundCategory,
    pub effects: &'static [EffectTag],
    pub sun: SunVisibility,
}

impl WeatherCondition {
    #[must_use]
    pub fn has_effect(&self, tag: EffectTag) -> bool {
        self.effects.contains(&tag)
    }
}

const STORM_EFFECTS: &[EffectTag] = &[Fx::HeavyRain, Fx::Lightning, Fx::Thunder, Fx::StormyRain];

const fn entry(
    code: u8,
    icon: &'static str,
    ascii_icon: &'static str,
    description: &'static str,
    background: BackgroundCategory,
    effects: &'static [EffectTag],
    sun: SunVisibility,
) -> WeatherCondition {
    WeatherCondition {
        code,
        icon,
        ascii_icon,
        description,
        background,
        effects,
        sun,
    }
}

// Index 0 doubles as the fallback for unmapped codes.
const CATALOG: &[WeatherCondition] = &[
    entry(0, "☀️", "SUN", "Clear sky", Bg::Clear, &[Fx::SunRays], Sun::Visible),
    entry(1, "🌤️", "SUN", "Mainly clear", Bg::Clear, &[Fx::SunRays], Sun::Visible),
    entry(2, "⛅", "PCL", "Partly cloudy", Bg::PartlyCloudy, &[Fx::MovingClouds], Sun::Intermittent),
    entry(3, "☁️", "CLD", "Overcast", Bg::Cloudy, &[Fx::DenseClouds], Sun::Hidden),
    entry(45, "🌫️", "FOG", "Fog", Bg::Foggy, &[Fx::Fog], Sun::Dimmed),
    entry(48, "🌫️", "FOG", "Depositing rime fog", Bg::Foggy, &[Fx::Fog, Fx::Frost], Sun::Dimmed),
    entry(51, "🌦️", "DRZ", "Light drizzle", Bg::Rainy, &[Fx::ModerateRain], Sun::Hidden),
    entry(53, "🌦️", "DRZ", "Moderate drizzle", Bg::Rainy, &[Fx::ModerateRain], Sun::Hidden),
    entry(55, "🌧️", "DRZ", "Dense drizzle", Bg::Rainy, &[Fx::HeavyRain], Sun::Hidden),
    entry(56, "🌧️", "FZD", "Light freezing drizzle", Bg::Snowy, &[Fx::LightSnow, Fx::Frost], Sun::Dimmed),
    entry(57, "🌨️", "FZD", "Dense freezing drizzle", Bg::Snowy, &[Fx::HeavySnow, Fx::Frost], Sun::Hidden),
    entry(61, "🌦️", "RAN", "Slight rain", Bg::Rainy, &[Fx::ModerateRain], Sun::Hidden),
    entry(63, "🌧️", "RAN", "Moderate rain", Bg::Rainy, &[Fx::ModerateRain], Sun::Hidden),
    entry(65, "🌧️", "RAN", "Heavy rain", Bg::Rainy, &[Fx::HeavyRain], Sun::Hidden),
    entry(66, "🌨️", "FZR", "Light freezing rain", Bg::Snowy, &[Fx::LightSnow, Fx::Frost], Sun::Hidden),
    entry(67, "❄️", "FZR", "Heavy freezing rain", Bg::Snowy, &[Fx::HeavySnow, Fx::Frost], Sun::Hidden),
    entry(71, "🌨️", "SNW", "Slight snow", Bg::Snowy, &[Fx::LightSnow], Sun::Dimmed),
    entry(73, "🌨️", "SNW", "Moderate snow", Bg::Snowy, &[Fx::ModerateSnow], Sun::Hidden),
    entry(75, "❄️", "SNW", "Heavy snow", Bg::Snowy, &[Fx::HeavySnow], Sun::Hidden),
    entry(77, "❄️", "SNW", "Snow grains", Bg::Snowy, &[Fx::ModerateSnow], Sun::Hidden),
    entry(80, "🌦️", "SHR", "Slight rain showers", Bg::Rainy, &[Fx::ModerateRain], Sun::Hidden),
    entry(81, "🌧️", "SHR", "Moderate rain showers", Bg::Rainy, &[Fx::ModerateRain], Sun::Hidden),
    entry(82, "⛈️", "SHR", "Violent rain showers", Bg::Rainy, &[Fx::HeavyRain], Sun::Hidden),
    entry(85, "🌨️", "SNS", "Slight snow showers", Bg::Snowy, &[Fx::LightSnow], Sun::Dimmed),
    entry(86, "❄️", "SNS", "Heavy snow showers", Bg::Snowy, &[Fx::HeavySnow], Sun::Hidden),
    entry(95, "⛈️", "THN", "Thunderstorm", Bg::Thunderstorm, STORM_EFFECTS, Sun::Hidden),
    entry(96, "⛈️", "THN", "Thunderstorm slight hail", Bg::Thunderstorm, STORM_EFFECTS, Sun::Hidden),
    entry(99, "⛈️", "THN", "Thunderstorm heavy hail", Bg::Thunderstorm, STORM_EFFECTS, Sun::Hidden),
];

/// Resolves a WMO code. Unmapped codes resolve to the clear-sky entry, so the
/// lookup never fails.
#[must_use]
pub fn condition_for(code: u8) -> &'static WeatherCondition {
    CATALOG
        .iter()
        .find(|condition| condition.code == code)
        .unwrap_or(&CATALOG[0])
}

#[must_use]
pub fn weather_icon(code: u8, mode: IconMode) -> &'static str {
    let condition = condition_for(code);
    match mode {
        IconMode::Emoji => condition.icon,
        IconMode::Ascii => condition.ascii_icon,
    }
}

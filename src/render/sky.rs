use chrono::Timelike;

use super::RenderCoordinator;
use crate::domain::weather::{BackgroundCategory, EffectTag, SunVisibility, condition_for};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkyBackground {
    Clear,
    Night,
    PartlyCloudy,
    Cloudy,
    Foggy,
    Rainy,
    Snowy,
    Thunderstorm,
}

impl SkyBackground {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Clear => "clear",
            Self::Night => "night",
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
pub enum TemperatureBand {
    Hot,
    Warm,
    Mild,
    Cold,
}

impl TemperatureBand {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hot => "hot",
            Self::Warm => "warm",
            Self::Mild => "mild",
            Self::Cold => "cold",
        }
    }

    fn from_celsius(value: f32) -> Self {
        if value >= 30.0 {
            Self::Hot
        } else if value >= 20.0 {
            Self::Warm
        } else if value >= 10.0 {
            Self::Mild
        } else {
            Self::Cold
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindStreaks {
    pub count: u32,
    pub strong: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkyView {
    pub background: SkyBackground,
    pub is_day: bool,
    pub sun_opacity: f32,
    pub sun_rays: bool,
    /// `None` while the sun is up.
    pub moon_opacity: Option<f32>,
    pub star_count: u32,
    pub effects: &'static [EffectTag],
    pub wind: Option<WindStreaks>,
    pub mist: bool,
    pub temperature_band: TemperatureBand,
}

fn sun_opacity(sun: SunVisibility, cloud_cover: f32) -> f32 {
    match sun {
        SunVisibility::Visible => 1.0,
        SunVisibility::Hidden => 0.0,
        SunVisibility::Dimmed => 0.3,
        SunVisibility::Intermittent if cloud_cover > 70.0 => 0.2,
        SunVisibility::Intermittent => 0.8,
    }
}

pub(super) fn build(view: &RenderCoordinator<'_>) -> SkyView {
    let selected = view.selected_conditions();
    let condition = condition_for(selected.weather_code.unwrap_or(0));
    let time = selected.time.unwrap_or(view.now);
    let is_day = selected
        .is_day
        .unwrap_or_else(|| (6..20).contains(&time.hour()));
    let temperature = selected.temperature_2m_c.unwrap_or(20.0);
    let cloud = selected.cloud_cover.unwrap_or(0.0);
    let wind = selected.wind_speed_10m.unwrap_or(0.0);
    let humidity = selected.relative_humidity_2m.unwrap_or(50.0);

    let background = match condition.background {
        BackgroundCategory::Clear if is_day => SkyBackground::Clear,
        BackgroundCategory::Clear => SkyBackground::Night,
        BackgroundCategory::PartlyCloudy => SkyBackground::PartlyCloudy,
        BackgroundCategory::Cloudy => SkyBackground::Cloudy,
        BackgroundCategory::Foggy => SkyBackground::Foggy,
        BackgroundCategory::Rainy => SkyBackground::Rainy,
        BackgroundCategory::Snowy => SkyBackground::Snowy,
        BackgroundCategory::Thunderstorm => SkyBackground::Thunderstorm,
    };

    let (sun_opacity, moon_opacity, star_count) = if is_day {
        (sun_opacity(condition.sun, cloud), None, 0)
    } else {
        let moon = if cloud > 80.0 { 0.3 } else { 1.0 };
        let stars = (150.0 - cloud / 1.5).max(50.0).ceil() as u32;
        (0.0, Some(moon), stars)
    };

    SkyView {
        background,
        is_day,
        sun_opacity,
        sun_rays: is_day && condition.sun == SunVisibility::Visible,
        moon_opacity,
        star_count,
        effects: condition.effects,
        wind: (wind >= 15.0).then(|| WindStreaks {
            count: ((wind / 2.0).floor() as u32).min(30),
            strong: wind >= 30.0,
        }),
        mist: humidity >= 85.0 && !condition.has_effect(EffectTag::Fog),
        temperature_band: TemperatureBand::from_celsius(temperature),
    }
}

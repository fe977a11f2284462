use super::RenderCoordinator;
use crate::domain::weather::format_temperature;

const MAX_INSIGHTS: usize = 4;
const WEEK_DAYS: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsightKind {
    TemperatureFeel,
    UvProtection,
    StrongWinds,
    Breezy,
    VeryPoorVisibility,
    ReducedVisibility,
    Thunderstorm,
    Winter,
    Rain,
    WeekAhead,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Insight {
    pub kind: InsightKind,
    pub icon: &'static str,
    pub title: &'static str,
    pub content: String,
}

impl Insight {
    fn new(kind: InsightKind, icon: &'static str, title: &'static str, content: String) -> Self {
        Self {
            kind,
            icon,
            title,
            content,
        }
    }
}

pub(super) fn build(view: &RenderCoordinator<'_>) -> Vec<Insight> {
    let selected = view.selected_conditions();
    let units = view.units;
    let mut out = Vec::new();

    let temp = selected.temperature_2m_c.unwrap_or(0.0);
    let feels = selected.apparent_temperature_c.unwrap_or(0.0);
    if (temp - feels).abs() >= 3.0 {
        let cause = if feels > temp {
            "humidity/heat index"
        } else {
            "wind chill"
        };
        out.push(Insight::new(
            InsightKind::TemperatureFeel,
            "🌡️",
            "Temperature Feel",
            format!(
                "It feels {} but actual is {} due to {cause}.",
                format_temperature(Some(feels), units),
                format_temperature(Some(temp), units)
            ),
        ));
    }

    let uv = selected.uv_index.unwrap_or(0.0);
    if uv >= 6.0 {
        out.push(Insight::new(
            InsightKind::UvProtection,
            "🧴",
            "UV Protection",
            format!(
                "High UV index of {}. Wear SPF 30+, sunglasses, and protective clothing.",
                uv.round()
            ),
        ));
    }

    let wind = selected.wind_speed_10m.unwrap_or(0.0);
    if wind >= 25.0 {
        out.push(Insight::new(
            InsightKind::StrongWinds,
            "💨",
            "Strong Winds",
            format!(
                "Winds at {} km/h. Secure loose items and be cautious outdoors.",
                wind.round()
            ),
        ));
    } else if wind >= 15.0 {
        out.push(Insight::new(
            InsightKind::Breezy,
            "🍃",
            "Breezy Conditions",
            format!(
                "Winds at {} km/h. Good for kites; secure lightweight items.",
                wind.round()
            ),
        ));
    }

    // Missing visibility reads as 10 km.
    let visibility_km = selected
        .visibility_m
        .filter(|m| *m > 0.0)
        .unwrap_or(10_000.0)
        / 1000.0;
    if visibility_km < 1.0 {
        out.push(Insight::new(
            InsightKind::VeryPoorVisibility,
            "🚗",
            "Very Poor Visibility",
            format!(
                "Visibility ~{} km. Use fog lights and drive slowly.",
                (visibility_km * 100.0).round() / 100.0
            ),
        ));
    } else if visibility_km < 5.0 {
        out.push(Insight::new(
            InsightKind::ReducedVisibility,
            "⚠️",
            "Reduced Visibility",
            format!(
                "Visibility ~{} km. Drive carefully with headlights on.",
                visibility_km.round()
            ),
        ));
    }

    match selected.weather_code.unwrap_or(0) {
        95 | 96 | 99 => out.push(Insight::new(
            InsightKind::Thunderstorm,
            "⛈️",
            "Thunderstorm Safety",
            "Stay indoors, avoid windows/electronics, and wait 30 minutes after last thunder."
                .to_string(),
        )),
        71..=77 => out.push(Insight::new(
            InsightKind::Winter,
            "🧣",
            "Winter Conditions",
            "Dress warmly in layers; roads can be slippery. Allow extra travel time.".to_string(),
        )),
        61..=67 | 80..=82 => out.push(Insight::new(
            InsightKind::Rain,
            "☔",
            "Rainy Weather",
            "Carry an umbrella and wear waterproof clothing. Roads may be wet and visibility reduced."
                .to_string(),
        )),
        _ => {}
    }

    let week = &view.store.daily()[..view.store.daily_len().min(WEEK_DAYS)];
    let week_max = week
        .iter()
        .filter_map(|day| day.temperature_max_c)
        .reduce(f32::max);
    let week_min = week
        .iter()
        .filter_map(|day| day.temperature_min_c)
        .reduce(f32::min);
    if let (Some(max), Some(min)) = (week_max, week_min) {
        let range = max - min;
        let outlook = if range >= 20.0 {
            "Highly variable conditions; dress in layers."
        } else if range <= 10.0 {
            "Stable pattern with consistent temperatures."
        } else {
            "Moderate variations expected."
        };
        out.push(Insight::new(
            InsightKind::WeekAhead,
            "📅",
            "Week Ahead",
            format!(
                "This week's temperature range {} to {}. {outlook}",
                format_temperature(Some(min), units),
                format_temperature(Some(max), units)
            ),
        ));
    }

    out.truncate(MAX_INSIGHTS);
    out
}

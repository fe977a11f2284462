use super::*;
use crate::cli::IconMode;

#[test]
fn freezing_drizzle_codes_have_labels() {
    assert_eq!(condition_for(56).description, "Light freezing drizzle");
    assert_eq!(condition_for(57).description, "Dense freezing drizzle");
}

#[test]
fn unmapped_codes_fall_back_to_clear_sky() {
    for code in [4_u8, 50, 98, 200] {
        let condition = condition_for(code);
        assert_eq!(condition.code, 0);
        assert_eq!(condition.description, "Clear sky");
        assert_eq!(condition.background, BackgroundCategory::Clear);
    }
}

#[test]
fn thunderstorm_entries_share_storm_effects() {
    for code in [95_u8, 96, 99] {
        let condition = condition_for(code);
        assert_eq!(condition.background, BackgroundCategory::Thunderstorm);
        assert!(condition.has_effect(EffectTag::Lightning));
        assert!(condition.has_effect(EffectTag::Thunder));
        assert_eq!(condition.sun, SunVisibility::Hidden);
    }
}

#[test]
fn rime_fog_carries_frost() {
    let condition = condition_for(48);
    assert!(condition.has_effect(EffectTag::Fog));
    assert!(condition.has_effect(EffectTag::Frost));
    assert_eq!(condition.sun, SunVisibility::Dimmed);
}

#[test]
fn icon_mode_selects_glyph_set() {
    assert_eq!(weather_icon(0, IconMode::Ascii), "SUN");
    assert_eq!(weather_icon(0, IconMode::Emoji), "☀️");
    assert_eq!(weather_icon(63, IconMode::Ascii), "RAN");
}

#[test]
fn fahrenheit_conversion_rounding() {
    assert_eq!(round_temp(convert_temp(0.0, Units::Fahrenheit)), 32);
    assert_eq!(round_temp(convert_temp(20.0, Units::Fahrenheit)), 68);
    assert_eq!(round_temp(convert_temp(-3.6, Units::Celsius)), -4);
}

#[test]
fn temperature_placeholder_when_unknown() {
    assert_eq!(format_temperature(None, Units::Celsius), "--°");
    assert_eq!(format_temperature(Some(21.4), Units::Celsius), "21°");
    assert_eq!(format_temperature(Some(100.0), Units::Fahrenheit), "212°");
}

#[test]
fn uv_level_boundaries() {
    assert_eq!(uv_level(0), "Low");
    assert_eq!(uv_level(2), "Low");
    assert_eq!(uv_level(3), "Moderate");
    assert_eq!(uv_level(6), "High");
    assert_eq!(uv_level(8), "Very High");
    assert_eq!(uv_level(11), "Extreme");
}

#[test]
fn same_hour_ignores_minutes_but_not_date() {
    let a = parse_datetime("2026-02-12T10:05").unwrap();
    let b = parse_datetime("2026-02-12T10:59").unwrap();
    let c = parse_datetime("2026-02-13T10:05").unwrap();
    assert!(same_hour(a, b));
    assert!(!same_hour(a, c));
}

#[test]
fn relative_day_helpers() {
    let today = parse_date("2026-02-12").unwrap();
    assert!(is_tomorrow(parse_date("2026-02-13").unwrap(), today));
    assert!(is_yesterday(parse_date("2026-02-11").unwrap(), today));
    assert!(!is_tomorrow(today, today));
    assert_eq!(weekday_label(today), "Thu, Feb 12");
}

#[test]
fn conditions_merge_prefers_own_fields() {
    let own = Conditions {
        temperature_2m_c: Some(10.0),
        ..Conditions::UNKNOWN
    };
    let fallback = Conditions {
        temperature_2m_c: Some(99.0),
        relative_humidity_2m: Some(40.0),
        is_day: Some(false),
        ..Conditions::UNKNOWN
    };

    let merged = own.or(fallback);
    assert_eq!(merged.temperature_2m_c, Some(10.0));
    assert_eq!(merged.relative_humidity_2m, Some(40.0));
    assert_eq!(merged.is_day, Some(false));
    assert_eq!(merged.uv_index, None);
}

#[test]
fn provenance_labels() {
    assert_eq!(Provenance::Gps.label(), "Exact Location");
    assert_eq!(Provenance::Ip.label(), "IP Location");
    assert_eq!(Provenance::Search.label(), "Search Result");
    assert_eq!(Provenance::Default.label(), "Default Location");
}

#[test]
fn location_details_include_accuracy_when_known() {
    let mut location = LocationRecord::new(12.9716, 77.5946, "Bengaluru, Karnataka", Provenance::Gps);
    assert_eq!(location.details(), "12.97, 77.59");
    location.accuracy_meters = Some(34.6);
    assert_eq!(location.details(), "12.97, 77.59 • ±35m");
    assert_eq!(location.short_name(), "Bengaluru");
}

#[test]
fn default_location_is_kolkata() {
    let location = LocationRecord::default_location();
    assert_eq!(location.provenance, Provenance::Default);
    assert_eq!(location.display_name, "Kolkata, West Bengal");
}

#[test]
fn local_time_applies_offset() {
    let series = ForecastSeries {
        hourly: Vec::new(),
        daily: Vec::new(),
        current: None,
        utc_offset_seconds: 19_800,
        timezone: Some("Asia/Kolkata".to_string()),
        scope: FetchScope::Forecast,
    };
    let utc = chrono::DateTime::parse_from_rfc3339("2026-02-12T04:30:00Z")
        .unwrap()
        .with_timezone(&Utc);
    assert_eq!(
        series.local_time(utc),
        parse_datetime("2026-02-12T10:00").unwrap()
    );
}

#[test]
fn refresh_metadata_tracks_failures() {
    let mut meta = RefreshMetadata::default();
    meta.mark_failure();
    meta.mark_failure();
    assert_eq!(meta.consecutive_failures, 2);
    assert!(meta.last_success.is_none());
    meta.mark_success();
    assert_eq!(meta.consecutive_failures, 0);
    assert!(meta.last_success.is_some());
}

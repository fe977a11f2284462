use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HourlyDensity {
    Full12,
    Compact8,
    Compact6,
    Minimal4,
}

#[must_use]
pub fn hourly_density(width: u16) -> HourlyDensity {
    match width {
        110..=u16::MAX => HourlyDensity::Full12,
        76..=109 => HourlyDensity::Compact8,
        58..=75 => HourlyDensity::Compact6,
        _ => HourlyDensity::Minimal4,
    }
}

#[must_use]
pub fn visible_hour_count(width: u16) -> usize {
    match hourly_density(width) {
        HourlyDensity::Full12 => 12,
        HourlyDensity::Compact8 => 8,
        HourlyDensity::Compact6 => 6,
        HourlyDensity::Minimal4 => 4,
    }
}

/// Slice of `len` items holding at most `visible`, keeping `selected` near
/// the middle and never running past either end.
#[must_use]
pub fn visible_window(len: usize, selected: Option<usize>, visible: usize) -> Range<usize> {
    let visible = visible.min(len);
    let Some(selected) = selected.filter(|&idx| idx < len) else {
        return 0..visible;
    };
    let start = selected
        .saturating_sub(visible / 2)
        .min(len - visible);
    start..start + visible
}

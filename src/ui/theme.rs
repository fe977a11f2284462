use ratatui::style::Color;

use crate::render::SkyBackground;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorCapability {
    TrueColor,
    Xterm256,
    Basic16,
}

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub surface: Color,
    pub accent: Color,
    pub text: Color,
    pub muted_text: Color,
    pub border: Color,
    pub popup_surface: Color,
    pub popup_text: Color,
    pub popup_muted_text: Color,
    pub popup_border: Color,
    pub highlight: Color,
    pub warning: Color,
    pub danger: Color,
    pub temp_freezing: Color,
    pub temp_cold: Color,
    pub temp_mild: Color,
    pub temp_warm: Color,
    pub temp_hot: Color,
}

pub fn detect_color_capability() -> ColorCapability {
    if std::env::var_os("NO_COLOR").is_some() {
        return ColorCapability::Basic16;
    }

    let colorterm = std::env::var("COLORTERM")
        .unwrap_or_default()
        .to_lowercase();
    if colorterm.contains("truecolor") || colorterm.contains("24bit") {
        return ColorCapability::TrueColor;
    }

    let term = std::env::var("TERM").unwrap_or_default().to_lowercase();
    if term.contains("256color") {
        ColorCapability::Xterm256
    } else {
        ColorCapability::Basic16
    }
}

type Rgb = (u8, u8, u8);

/// Surface and accent seeds per sky class.
fn palette(background: SkyBackground) -> (Rgb, Rgb) {
    match background {
        SkyBackground::Clear => ((30, 102, 158), (255, 215, 117)),
        SkyBackground::Night => ((9, 18, 44), (173, 216, 255)),
        SkyBackground::PartlyCloudy => ((38, 72, 112), (236, 222, 160)),
        SkyBackground::Cloudy => ((40, 52, 68), (210, 223, 235)),
        SkyBackground::Foggy => ((50, 55, 62), (216, 220, 224)),
        SkyBackground::Rainy => ((17, 47, 88), (153, 214, 255)),
        SkyBackground::Snowy => ((43, 74, 106), (237, 247, 255)),
        SkyBackground::Thunderstorm => ((28, 25, 66), (255, 223, 112)),
    }
}

pub fn theme_for(background: SkyBackground, capability: ColorCapability) -> Theme {
    let (surface, accent_seed) = palette(background);
    let popup_surface = mix_rgb(surface, (8, 10, 16), 0.65);
    let text = ensure_contrast((236, 242, 248), surface, 7.0);
    let muted = ensure_contrast(mix_rgb(text, surface, 0.35), surface, 4.5);
    let accent = ensure_contrast(accent_seed, surface, 3.0);
    let border = mix_rgb(accent, surface, 0.55);

    let color = |rgb: Rgb| quantize(Color::Rgb(rgb.0, rgb.1, rgb.2), capability);
    Theme {
        surface: color(surface),
        accent: color(accent),
        text: color(text),
        muted_text: color(muted),
        border: color(border),
        popup_surface: color(popup_surface),
        popup_text: color(ensure_contrast(text, popup_surface, 7.0)),
        popup_muted_text: color(ensure_contrast(muted, popup_surface, 4.5)),
        popup_border: color(ensure_contrast(border, popup_surface, 3.0)),
        highlight: color(ensure_contrast(accent_seed, popup_surface, 4.5)),
        warning: color(ensure_contrast((255, 196, 87), surface, 3.0)),
        danger: color(ensure_contrast((255, 110, 110), surface, 3.0)),
        temp_freezing: color(ensure_contrast((170, 200, 255), surface, 3.0)),
        temp_cold: color(ensure_contrast((120, 190, 255), surface, 3.0)),
        temp_mild: color(ensure_contrast((160, 230, 180), surface, 3.0)),
        temp_warm: color(ensure_contrast((255, 206, 120), surface, 3.0)),
        temp_hot: color(ensure_contrast((255, 130, 100), surface, 3.0)),
    }
}

pub fn temp_color(theme: &Theme, celsius: f32) -> Color {
    if celsius <= -8.0 {
        theme.temp_freezing
    } else if celsius <= 2.0 {
        theme.temp_cold
    } else if celsius <= 16.0 {
        theme.temp_mild
    } else if celsius <= 28.0 {
        theme.temp_warm
    } else {
        theme.temp_hot
    }
}

fn mix_rgb(a: Rgb, b: Rgb, t: f32) -> Rgb {
    let t = t.clamp(0.0, 1.0);
    let mix = |x: u8, y: u8| -> u8 {
        (f32::from(x) + (f32::from(y) - f32::from(x)) * t)
            .round()
            .clamp(0.0, 255.0) as u8
    };
    (mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
}

/// Pulls `fg` toward black or white until it reaches `min_ratio` against `bg`.
fn ensure_contrast(fg: Rgb, bg: Rgb, min_ratio: f32) -> Rgb {
    if contrast_ratio(fg, bg) >= min_ratio {
        return fg;
    }
    let target = if contrast_ratio((255, 255, 255), bg) >= contrast_ratio((0, 0, 0), bg) {
        (255, 255, 255)
    } else {
        (0, 0, 0)
    };

    let mut best = fg;
    let mut best_ratio = contrast_ratio(fg, bg);
    for step in 1..=24 {
        let candidate = mix_rgb(fg, target, step as f32 / 24.0);
        let ratio = contrast_ratio(candidate, bg);
        if ratio >= min_ratio {
            return candidate;
        }
        if ratio > best_ratio {
            best = candidate;
            best_ratio = ratio;
        }
    }
    best
}

fn contrast_ratio(a: Rgb, b: Rgb) -> f32 {
    let l1 = relative_luminance(a);
    let l2 = relative_luminance(b);
    let (hi, lo) = if l1 >= l2 { (l1, l2) } else { (l2, l1) };
    (hi + 0.05) / (lo + 0.05)
}

fn relative_luminance(rgb: Rgb) -> f32 {
    0.2126 * srgb_to_linear(rgb.0) + 0.7152 * srgb_to_linear(rgb.1) + 0.0722 * srgb_to_linear(rgb.2)
}

fn srgb_to_linear(v: u8) -> f32 {
    let s = f32::from(v) / 255.0;
    if s <= 0.04045 {
        s / 12.92
    } else {
        ((s + 0.055) / 1.055).powf(2.4)
    }
}

pub fn quantize(color: Color, capability: ColorCapability) -> Color {
    match (capability, color) {
        (ColorCapability::TrueColor, c) => c,
        (ColorCapability::Xterm256, Color::Rgb(r, g, b)) => {
            let to_cube = |v: u8| -> u8 { ((f32::from(v) / 255.0) * 5.0).round() as u8 };
            Color::Indexed(16 + 36 * to_cube(r) + 6 * to_cube(g) + to_cube(b))
        }
        (ColorCapability::Basic16, Color::Rgb(r, g, b)) => basic16_from_rgb(r, g, b),
        (_, c) => c,
    }
}

fn basic16_from_rgb(r: u8, g: u8, b: u8) -> Color {
    let rf = f32::from(r) / 255.0;
    let gf = f32::from(g) / 255.0;
    let bf = f32::from(b) / 255.0;

    let max = rf.max(gf.max(bf));
    let min = rf.min(gf.min(bf));
    let delta = max - min;
    let light = (max + min) / 2.0;

    if delta < 0.08 {
        return match light {
            l if l < 0.20 => Color::Black,
            l if l < 0.40 => Color::DarkGray,
            l if l < 0.72 => Color::Gray,
            _ => Color::White,
        };
    }

    let hue = if (max - rf).abs() < f32::EPSILON {
        60.0 * ((gf - bf) / delta).rem_euclid(6.0)
    } else if (max - gf).abs() < f32::EPSILON {
        60.0 * (((bf - rf) / delta) + 2.0)
    } else {
        60.0 * (((rf - gf) / delta) + 4.0)
    };

    let bright = light >= 0.55;
    let (dark, light_variant) = match hue {
        h if !(30.0..330.0).contains(&h) => (Color::Red, Color::LightRed),
        h if h < 90.0 => (Color::Yellow, Color::LightYellow),
        h if h < 150.0 => (Color::Green, Color::LightGreen),
        h if h < 210.0 => (Color::Cyan, Color::LightCyan),
        h if h < 270.0 => (Color::Blue, Color::LightBlue),
        _ => (Color::Magenta, Color::LightMagenta),
    };
    if bright { light_variant } else { dark }
}

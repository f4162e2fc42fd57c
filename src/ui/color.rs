use ratatui::style::Color;

use crate::cli::ColorArg;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorCapability {
    TrueColor,
    Xterm256,
    Basic16,
}

impl ColorCapability {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::TrueColor => "truecolor",
            Self::Xterm256 => "256",
            Self::Basic16 => "16",
        }
    }
}

pub fn detect_color_capability(mode: ColorArg) -> ColorCapability {
    detect_color_capability_from(
        mode,
        std::env::var("TERM").ok().as_deref(),
        std::env::var("COLORTERM").ok().as_deref(),
        std::env::var("NO_COLOR").ok().as_deref(),
    )
}

pub(crate) fn detect_color_capability_from(
    mode: ColorArg,
    term: Option<&str>,
    colorterm: Option<&str>,
    no_color: Option<&str>,
) -> ColorCapability {
    if mode == ColorArg::Always {
        return if supports_256_color(term) && !supports_truecolor(colorterm, term) {
            ColorCapability::Xterm256
        } else {
            ColorCapability::TrueColor
        };
    }
    if should_force_basic16(mode, term, no_color) {
        return ColorCapability::Basic16;
    }
    if supports_truecolor(colorterm, term) {
        return ColorCapability::TrueColor;
    }
    if supports_256_color(term) {
        ColorCapability::Xterm256
    } else {
        ColorCapability::Basic16
    }
}

fn should_force_basic16(mode: ColorArg, term: Option<&str>, no_color: Option<&str>) -> bool {
    mode == ColorArg::Never
        || no_color.is_some_and(|value| !value.is_empty())
        || term.is_some_and(|value| value.eq_ignore_ascii_case("dumb"))
}

fn supports_truecolor(colorterm: Option<&str>, term: Option<&str>) -> bool {
    let colorterm = colorterm.unwrap_or_default().to_lowercase();
    let term = term.unwrap_or_default().to_lowercase();
    truecolor_hint(&colorterm) || truecolor_hint(&term)
}

fn truecolor_hint(value: &str) -> bool {
    value.contains("truecolor")
        || value.contains("24bit")
        || value.contains("-direct")
        || value.ends_with("direct")
}

fn supports_256_color(term: Option<&str>) -> bool {
    term.unwrap_or_default().to_lowercase().contains("256color")
}

#[must_use]
pub fn quantize(rgb: (u8, u8, u8), capability: ColorCapability) -> Color {
    let (r, g, b) = rgb;
    match capability {
        ColorCapability::TrueColor => Color::Rgb(r, g, b),
        ColorCapability::Xterm256 => xterm256_from_rgb(r, g, b),
        ColorCapability::Basic16 => basic16_from_rgb(r, g, b),
    }
}

fn xterm256_from_rgb(r: u8, g: u8, b: u8) -> Color {
    const CUBE: [u8; 6] = [0, 95, 135, 175, 215, 255];
    let nearest_level = |v: u8| -> usize {
        CUBE.iter()
            .enumerate()
            .min_by_key(|(_, level)| (i32::from(**level) - i32::from(v)).abs())
            .map_or(0, |(index, _)| index)
    };
    let (ri, gi, bi) = (nearest_level(r), nearest_level(g), nearest_level(b));
    let cube = (CUBE[ri], CUBE[gi], CUBE[bi]);

    let average = (u32::from(r) + u32::from(g) + u32::from(b)) / 3;
    let grey_index = (average.saturating_sub(3) / 10).min(23) as u8;
    let grey_level = 8 + 10 * grey_index;
    let grey = (grey_level, grey_level, grey_level);

    if distance((r, g, b), grey) < distance((r, g, b), cube) {
        Color::Indexed(232 + grey_index)
    } else {
        Color::Indexed(16 + 36 * ri as u8 + 6 * gi as u8 + bi as u8)
    }
}

fn distance(a: (u8, u8, u8), b: (u8, u8, u8)) -> i32 {
    let d = |x: u8, y: u8| {
        let delta = i32::from(x) - i32::from(y);
        delta * delta
    };
    d(a.0, b.0) + d(a.1, b.1) + d(a.2, b.2)
}

fn basic16_from_rgb(r: u8, g: u8, b: u8) -> Color {
    let rf = f32::from(r) / 255.0;
    let gf = f32::from(g) / 255.0;
    let bf = f32::from(b) / 255.0;

    let max = rf.max(gf.max(bf));
    let min = rf.min(gf.min(bf));
    let delta = max - min;
    let light = (max + min) / 2.0;

    if light < 0.06 {
        return Color::Black;
    }
    if delta < 0.08 {
        if light < 0.20 {
            return Color::Black;
        }
        if light < 0.40 {
            return Color::DarkGray;
        }
        if light < 0.72 {
            return Color::Gray;
        }
        return Color::White;
    }

    let hue = if (max - rf).abs() < f32::EPSILON {
        60.0 * ((gf - bf) / delta).rem_euclid(6.0)
    } else if (max - gf).abs() < f32::EPSILON {
        60.0 * (((bf - rf) / delta) + 2.0)
    } else {
        60.0 * (((rf - gf) / delta) + 4.0)
    };

    let bright = light >= 0.55;
    let (dim, lit) = match hue {
        h if !(30.0..330.0).contains(&h) => (Color::Red, Color::LightRed),
        h if h < 90.0 => (Color::Yellow, Color::LightYellow),
        h if h < 150.0 => (Color::Green, Color::LightGreen),
        h if h < 210.0 => (Color::Cyan, Color::LightCyan),
        h if h < 270.0 => (Color::Blue, Color::LightBlue),
        _ => (Color::Magenta, Color::LightMagenta),
    };
    if bright { lit } else { dim }
}

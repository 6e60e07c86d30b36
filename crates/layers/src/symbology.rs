//! Tax-burden coloring for country polygons.

use serde::{Serialize, Serializer};

/// Opaque 8-bit sRGB color. Displays and serializes as `#RRGGBB`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::from_hex(0xFFFFFF);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn from_hex(hex: u32) -> Self {
        Self::new((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }

    /// Scales every channel by `(1 / 0.7)^k`, rounding and saturating at 255.
    pub fn brighter(&self, k: f64) -> Rgb {
        let scale = (1.0 / DARKER_STEP).powf(k);
        let channel = |c: u8| (f64::from(c) * scale).round().clamp(0.0, 255.0) as u8;
        Rgb::new(channel(self.r), channel(self.g), channel(self.b))
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

const DARKER_STEP: f64 = 0.7;

/// Upper bounds (percent) of buckets 0..=5; bucket 6 is everything above 35.
pub const BREAKPOINTS: [f64; 7] = [10.0, 15.0, 20.0, 25.0, 30.0, 35.0, 40.0];

/// Low burden (green) to high burden (red).
pub const BUCKET_COLORS: [Rgb; 7] = [
    Rgb::from_hex(0x00A676),
    Rgb::from_hex(0x5CB85C),
    Rgb::from_hex(0xC8E650),
    Rgb::from_hex(0xFFD666),
    Rgb::from_hex(0xFFA500),
    Rgb::from_hex(0xFF7F50),
    Rgb::from_hex(0xD32F2F),
];

/// Countries without any rate. Not used by any bucket.
pub const NO_DATA_COLOR: Rgb = Rgb::from_hex(0xE6E9EB);

pub const EMPHASIS_FACTOR: f64 = 0.8;

/// Bucket index for a rate: `i` such that `BREAKPOINTS[i-1] < rate <= BREAKPOINTS[i]`,
/// with rates at or below the first breakpoint in bucket 0 and everything past
/// the second-to-last one in the last bucket.
pub fn bucket(rate: f64) -> usize {
    BREAKPOINTS
        .iter()
        .take_while(|&&bp| bp < rate)
        .count()
        .min(BUCKET_COLORS.len() - 1)
}

/// Color for an aggregate rate; absent (or NaN) rates get [`NO_DATA_COLOR`].
pub fn classify(rate: Option<f64>) -> Rgb {
    match rate {
        Some(r) if !r.is_nan() => BUCKET_COLORS[bucket(r)],
        _ => NO_DATA_COLOR,
    }
}

/// Highlight variant of a color, used for hover.
pub fn emphasize(color: Rgb) -> Rgb {
    color.brighter(EMPHASIS_FACTOR)
}

pub const SIDE_COLOR: &str = "rgba(75,103,117,0.18)";
pub const STROKE_COLOR: Rgb = Rgb::WHITE;

const RESTING_LIFT: f64 = 0.01;
const HOVER_LIFT: f64 = 0.04;

#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PolygonStyle {
    pub cap_color: Rgb,
    /// Lift as a fraction of the globe radius.
    pub lift: f64,
}

impl PolygonStyle {
    pub fn for_rate(rate: Option<f64>, hovered: bool) -> Self {
        let base = classify(rate);
        if hovered {
            Self {
                cap_color: emphasize(base),
                lift: HOVER_LIFT,
            }
        } else {
            Self {
                cap_color: base,
                lift: RESTING_LIFT,
            }
        }
    }
}

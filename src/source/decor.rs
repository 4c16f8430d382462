use std::fmt;

use serde::Serialize;

use super::random::RandomSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Glyph {
    Heart,
    Users,
    MapPin,
    Star,
    Sparkles,
    Zap,
}

impl Glyph {
    pub const ALL: [Glyph; 6] = [
        Glyph::Heart,
        Glyph::Users,
        Glyph::MapPin,
        Glyph::Star,
        Glyph::Sparkles,
        Glyph::Zap,
    ];
}

impl fmt::Display for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Glyph::Heart => "♥",
            Glyph::Users => "☺",
            Glyph::MapPin => "⌖",
            Glyph::Star => "★",
            Glyph::Sparkles => "✧",
            Glyph::Zap => "ϟ",
        };
        f.write_str(symbol)
    }
}

/// A decorative icon drifting in the page background. Positions are percentages.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FloatingElement {
    pub id: usize,
    pub glyph: Glyph,
    pub x: f64,
    pub y: f64,
    pub delay_secs: f64,
    pub duration_secs: f64,
    pub scale: f64,
}

/// Lay out `count` floating icons.
///
/// Draw order per element: glyph, x, y, delay, duration, scale.
pub fn scatter(count: usize, rng: &mut impl RandomSource) -> Vec<FloatingElement> {
    (0..count)
        .map(|id| FloatingElement {
            id,
            glyph: Glyph::ALL[rng.pick(Glyph::ALL.len())],
            x: rng.between(0.0, 100.0),
            y: rng.between(0.0, 100.0),
            delay_secs: rng.between(0.0, 5.0),
            duration_secs: rng.between(8.0, 12.0),
            scale: rng.between(0.5, 1.3),
        })
        .collect()
}

/// Background bubble on the loading screen: random position, staggered timing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bubble {
    pub left: f64,
    pub top: f64,
    pub delay_secs: f64,
    pub duration_secs: f64,
}

pub fn bubbles(count: usize, rng: &mut impl RandomSource) -> Vec<Bubble> {
    (0..count)
        .map(|i| Bubble {
            left: rng.between(0.0, 100.0),
            top: rng.between(0.0, 100.0),
            delay_secs: i as f64 * 0.5,
            duration_secs: 3.0 + i as f64,
        })
        .collect()
}

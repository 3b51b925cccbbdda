//! Color types: 24-bit RGB and alpha-carrying RGBA with cached
//! normalized alpha for division-free compositing.

use crate::error::{GguiError, Result};

/// A 24-bit color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// Red component.
    pub r: u8,
    /// Green component.
    pub g: u8,
    /// Blue component.
    pub b: u8,
}

impl Rgb {
    /// Create a new color.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a hex color string like `"#rrggbb"` or `"#rgb"`.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        match hex.len() {
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16)
                    .map_err(|e| GguiError::Style(format!("invalid hex color: {e}")))?;
                let g = u8::from_str_radix(&hex[2..4], 16)
                    .map_err(|e| GguiError::Style(format!("invalid hex color: {e}")))?;
                let b = u8::from_str_radix(&hex[4..6], 16)
                    .map_err(|e| GguiError::Style(format!("invalid hex color: {e}")))?;
                Ok(Self { r, g, b })
            }
            3 => {
                let r = u8::from_str_radix(&hex[0..1], 16)
                    .map_err(|e| GguiError::Style(format!("invalid hex color: {e}")))?;
                let g = u8::from_str_radix(&hex[1..2], 16)
                    .map_err(|e| GguiError::Style(format!("invalid hex color: {e}")))?;
                let b = u8::from_str_radix(&hex[2..3], 16)
                    .map_err(|e| GguiError::Style(format!("invalid hex color: {e}")))?;
                Ok(Self {
                    r: r * 17,
                    g: g * 17,
                    b: b * 17,
                })
            }
            _ => Err(GguiError::Style(format!(
                "invalid hex color length: expected 3 or 6, got {}",
                hex.len()
            ))),
        }
    }

    /// White.
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    /// Black.
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    /// Red.
    pub const RED: Rgb = Rgb::new(255, 0, 0);
    /// Green.
    pub const GREEN: Rgb = Rgb::new(0, 255, 0);
    /// Blue.
    pub const BLUE: Rgb = Rgb::new(0, 0, 255);
    /// Yellow.
    pub const YELLOW: Rgb = Rgb::new(255, 255, 0);
    /// Cyan.
    pub const CYAN: Rgb = Rgb::new(0, 255, 255);
    /// Magenta.
    pub const MAGENTA: Rgb = Rgb::new(255, 0, 255);
    /// Gray.
    pub const GRAY: Rgb = Rgb::new(128, 128, 128);
    /// Dark gray.
    pub const DARK_GRAY: Rgb = Rgb::new(64, 64, 64);
}

/// A 24-bit color with an 8-bit alpha channel.
///
/// The normalized alpha is precomputed so that repeated compositing does
/// not divide per cell. Equality is channel-wise and ignores the cache.
#[derive(Clone, Copy, Debug)]
pub struct Rgba {
    /// Red component.
    pub r: u8,
    /// Green component.
    pub g: u8,
    /// Blue component.
    pub b: u8,
    /// Alpha component, 0 = transparent, 255 = opaque.
    pub a: u8,
    alpha_f: f32,
}

impl Rgba {
    /// Create a color with an explicit alpha.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r,
            g,
            b,
            a,
            alpha_f: a as f32 / 255.0,
        }
    }

    /// Create a fully opaque color.
    pub const fn opaque(color: Rgb) -> Self {
        Self::new(color.r, color.g, color.b, 255)
    }

    /// The fully transparent color.
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);

    /// The RGB part of this color.
    pub const fn rgb(self) -> Rgb {
        Rgb::new(self.r, self.g, self.b)
    }

    /// Normalized alpha in `0.0..=1.0`.
    pub const fn alpha(self) -> f32 {
        self.alpha_f
    }

    /// Replace the alpha channel, keeping the cache coherent.
    pub fn set_alpha(&mut self, a: u8) {
        self.a = a;
        self.alpha_f = f32::from(a) / 255.0;
    }

    /// Replace the alpha channel from a normalized fraction (clamped).
    pub fn set_alpha_f(&mut self, a: f32) {
        let a = a.clamp(0.0, 1.0);
        self.alpha_f = a;
        self.a = (a * 255.0).round() as u8;
    }

    /// Composite `src` over this color: each channel becomes
    /// `self * (1 - src.alpha) + src * src.alpha`. The destination alpha
    /// is retained.
    pub fn blend(&mut self, src: Rgba) {
        let sa = src.alpha_f;
        let inv = 1.0 - sa;
        self.r = (f32::from(self.r) * inv + f32::from(src.r) * sa).round() as u8;
        self.g = (f32::from(self.g) * inv + f32::from(src.g) * sa).round() as u8;
        self.b = (f32::from(self.b) * inv + f32::from(src.b) * sa).round() as u8;
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::TRANSPARENT
    }
}

impl PartialEq for Rgba {
    fn eq(&self, other: &Self) -> bool {
        self.r == other.r && self.g == other.g && self.b == other.b && self.a == other.a
    }
}

impl Eq for Rgba {}

impl From<Rgb> for Rgba {
    fn from(color: Rgb) -> Self {
        Self::opaque(color)
    }
}

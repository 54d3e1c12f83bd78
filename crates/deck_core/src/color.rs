//! Canonical RGBA color and alpha flattening.

use serde::{Deserialize, Serialize};

/// An sRGB color with 8-bit channels and a floating point alpha in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red channel.
    pub red: u8,
    /// Green channel.
    pub green: u8,
    /// Blue channel.
    pub blue: u8,
    /// Opacity, 0 is fully transparent.
    pub alpha: f32,
}

impl Color {
    /// Fully transparent black, the explicit "no color" value.
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0.0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// Opaque color from channels.
    #[inline]
    #[must_use]
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha: 1.0,
        }
    }

    /// Color with explicit alpha. The alpha must already be in `[0, 1]`;
    /// use [`Color::with_alpha`] for untrusted input.
    #[inline]
    #[must_use]
    pub const fn rgba(red: u8, green: u8, blue: u8, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Same channels with a new alpha, clamped into `[0, 1]` (NaN becomes 0).
    #[inline]
    #[must_use]
    pub fn with_alpha(self, alpha: f32) -> Self {
        let clamped = if alpha.is_nan() {
            0.0
        } else {
            alpha.clamp(0.0, 1.0)
        };
        Self {
            alpha: clamped,
            ..self
        }
    }

    /// True when the color contributes nothing when painted.
    #[inline]
    #[must_use]
    pub fn is_transparent(self) -> bool {
        self.alpha <= 0.0
    }

    /// True when the color is not fully transparent.
    #[inline]
    #[must_use]
    pub fn is_visible(self) -> bool {
        self.alpha > 0.0
    }

    /// True when no blending is needed to paint this color.
    #[inline]
    #[must_use]
    pub fn is_opaque(self) -> bool {
        self.alpha >= 1.0
    }

    /// Blend this color over an opaque `backdrop`, returning an opaque color.
    ///
    /// Each channel is `round(a * c + (1 - a) * bg)`. Opaque colors come back
    /// unchanged, so flattening is idempotent.
    #[must_use]
    pub fn flatten(self, backdrop: Self) -> Self {
        if self.is_opaque() {
            return Self { alpha: 1.0, ..self };
        }
        let alpha = self.with_alpha(self.alpha).alpha;
        let blend = |channel: u8, under: u8| -> u8 {
            let mixed = alpha * f32::from(channel) + (1.0 - alpha) * f32::from(under);
            mixed.round().clamp(0.0, 255.0) as u8
        };
        Self::rgb(
            blend(self.red, backdrop.red),
            blend(self.green, backdrop.green),
            blend(self.blue, backdrop.blue),
        )
    }

    /// Perceived brightness in `[0, 255]`: `(299r + 587g + 114b) / 1000`.
    #[inline]
    #[must_use]
    pub fn brightness(self) -> f32 {
        (299.0 * f32::from(self.red) + 587.0 * f32::from(self.green) + 114.0 * f32::from(self.blue))
            / 1000.0
    }

    /// Uppercase `RRGGBB` hex without a leading `#`, alpha ignored.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("{:02X}{:02X}{:02X}", self.red, self.green, self.blue)
    }
}

impl Default for Color {
    #[inline]
    fn default() -> Self {
        Self::TRANSPARENT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_black_over_white_is_mid_gray() {
        let flat = Color::rgba(0, 0, 0, 0.5).flatten(Color::WHITE);
        assert_eq!(flat, Color::rgb(128, 128, 128));
    }

    #[test]
    fn flatten_is_idempotent() {
        let once = Color::rgba(200, 10, 90, 0.3).flatten(Color::rgb(20, 40, 60));
        let twice = once.flatten(Color::rgb(20, 40, 60));
        assert_eq!(once, twice);
        assert!(once.is_opaque());
    }

    #[test]
    fn transparent_flattens_to_backdrop() {
        let flat = Color::TRANSPARENT.flatten(Color::rgb(10, 20, 30));
        assert_eq!(flat, Color::rgb(10, 20, 30));
    }

    #[test]
    fn brightness_weights_green_highest() {
        assert_eq!(Color::WHITE.brightness(), 255.0);
        assert_eq!(Color::BLACK.brightness(), 0.0);
        assert!(Color::rgb(0, 255, 0).brightness() > Color::rgb(255, 0, 0).brightness());
    }

    #[test]
    fn alpha_is_clamped() {
        assert_eq!(Color::BLACK.with_alpha(3.0).alpha, 1.0);
        assert_eq!(Color::BLACK.with_alpha(-1.0).alpha, 0.0);
        assert_eq!(Color::BLACK.with_alpha(f32::NAN).alpha, 0.0);
    }

    #[test]
    fn hex_is_uppercase() {
        assert_eq!(Color::rgb(107, 92, 255).to_hex(), "6B5CFF");
    }
}

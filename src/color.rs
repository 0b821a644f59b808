use anyhow::{bail, Result};
use palette::{FromColor, Hsl, IntoColor, Srgb};

/// One RGB sample taken from the source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Pixel {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Perceptual luminance in [0, 1] using Rec. 709 weights on the raw
    /// (non-linearized) channels. Only used for ordering and role assignment.
    pub fn luminance(self) -> f32 {
        let l = (0.2126 * self.r as f32 + 0.7152 * self.g as f32 + 0.0722 * self.b as f32) / 255.0;
        l.clamp(0.0, 1.0)
    }

    /// Squared Euclidean distance in RGB space.
    ///
    /// This is the only clustering metric. It is not perceptually uniform.
    pub fn distance_sq(self, other: Pixel) -> u32 {
        let dr = self.r as i32 - other.r as i32;
        let dg = self.g as i32 - other.g as i32;
        let db = self.b as i32 - other.b as i32;
        (dr * dr + dg * dg + db * db) as u32
    }
}

impl From<[u8; 3]> for Pixel {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

/// A palette candidate: an RGB value with its luminance cached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    luminance: f32,
}

impl Color {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self::from_pixel(Pixel::new(r, g, b))
    }

    pub fn from_pixel(pixel: Pixel) -> Self {
        Self {
            r: pixel.r,
            g: pixel.g,
            b: pixel.b,
            luminance: pixel.luminance(),
        }
    }

    pub fn pixel(self) -> Pixel {
        Pixel::new(self.r, self.g, self.b)
    }

    pub fn luminance(self) -> f32 {
        self.luminance
    }

    /// Parse a hex color string like `#ff8800` or `#FF8800`.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            bail!("invalid hex color: expected 6 hex digits, got {:?}", hex);
        }
        let r = u8::from_str_radix(&hex[0..2], 16)?;
        let g = u8::from_str_radix(&hex[2..4], 16)?;
        let b = u8::from_str_radix(&hex[4..6], 16)?;
        Ok(Self::new(r, g, b))
    }

    /// Serialize to lowercase hex `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Serialize as a CSS-style `rgb(r,g,b)` tuple.
    pub fn to_rgb_string(self) -> String {
        format!("rgb({},{},{})", self.r, self.g, self.b)
    }

    pub fn to_srgb_u8(self) -> Srgb<u8> {
        Srgb::new(self.r, self.g, self.b)
    }

    pub fn to_hsl(self) -> Hsl {
        let srgb_f32: Srgb<f32> = self.to_srgb_u8().into_format();
        srgb_f32.into_color()
    }

    pub fn from_hsl(hsl: Hsl) -> Self {
        let srgb_f32: Srgb<f32> = Srgb::from_color(hsl);
        let r = (srgb_f32.red.clamp(0.0, 1.0) * 255.0).round() as u8;
        let g = (srgb_f32.green.clamp(0.0, 1.0) * 255.0).round() as u8;
        let b = (srgb_f32.blue.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self::new(r, g, b)
    }

    /// Scale HSL saturation by `factor`. The result is clamped to [0, 1],
    /// so factors above 1 boost and factors below 1 wash out toward gray.
    pub fn with_saturation(self, factor: f32) -> Color {
        if factor == 1.0 || (self.r == self.g && self.g == self.b) {
            return self;
        }
        let mut hsl = self.to_hsl();
        hsl.saturation = (hsl.saturation * factor).clamp(0.0, 1.0);
        Color::from_hsl(hsl)
    }
}

impl From<Pixel> for Color {
    fn from(pixel: Pixel) -> Self {
        Self::from_pixel(pixel)
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLACK: Pixel = Pixel::new(0, 0, 0);
    const WHITE: Pixel = Pixel::new(255, 255, 255);

    #[test]
    fn hex_round_trip() {
        let original = Color::from_hex("#ff8800").unwrap();
        assert_eq!(original.r, 255);
        assert_eq!(original.g, 136);
        assert_eq!(original.b, 0);
        assert_eq!(original.to_hex(), "#ff8800");
    }

    #[test]
    fn hex_uppercase_and_bare() {
        assert_eq!(Color::from_hex("#FF8800").unwrap().to_hex(), "#ff8800");
        assert_eq!(Color::from_hex("aabbcc").unwrap().to_hex(), "#aabbcc");
    }

    #[test]
    fn hex_invalid() {
        assert!(Color::from_hex("#fff").is_err());
        assert!(Color::from_hex("#gggggg").is_err());
        assert!(Color::from_hex("#ffé00").is_err());
    }

    #[test]
    fn hex_rejects_sign_prefixes() {
        assert!(Color::from_hex("#+f+f+f").is_err());
        assert!(Color::from_hex("+0+0+0").is_err());
    }

    #[test]
    fn rgb_string_format() {
        assert_eq!(Color::new(1, 22, 255).to_rgb_string(), "rgb(1,22,255)");
    }

    #[test]
    fn luminance_bounds() {
        assert!(BLACK.luminance() < 0.001);
        assert!((WHITE.luminance() - 1.0).abs() < 0.001);
    }

    #[test]
    fn blue_is_darker_than_red() {
        let red = Color::new(255, 0, 0);
        let blue = Color::new(0, 0, 255);
        assert!(blue.luminance() < red.luminance());
        assert!((red.luminance() - 0.2126).abs() < 0.001);
    }

    #[test]
    fn distance_is_squared_euclidean() {
        let a = Pixel::new(10, 20, 30);
        let b = Pixel::new(13, 24, 30);
        assert_eq!(a.distance_sq(b), 25);
        assert_eq!(b.distance_sq(a), 25);
        assert_eq!(a.distance_sq(a), 0);
        assert_eq!(BLACK.distance_sq(WHITE), 3 * 255 * 255);
    }

    #[test]
    fn hsl_round_trip() {
        for original in [
            Color::new(200, 100, 50),
            Color::new(0, 255, 0),
            Color::new(128, 128, 128),
            Color::new(12, 34, 200),
        ] {
            let recovered = Color::from_hsl(original.to_hsl());
            assert!(
                original.pixel().distance_sq(recovered.pixel()) <= 3,
                "HSL round trip drifted: {original} vs {recovered}"
            );
        }
    }

    #[test]
    fn hsl_of_pure_red() {
        let hsl = Color::new(255, 0, 0).to_hsl();
        assert!(hsl.hue.into_positive_degrees().abs() < 0.01);
        assert!((hsl.saturation - 1.0).abs() < 0.001);
        assert!((hsl.lightness - 0.5).abs() < 0.001);
    }

    #[test]
    fn saturation_identity_and_gray() {
        let c = Color::new(180, 40, 90);
        assert_eq!(c.with_saturation(1.0), c);

        let gray = Color::new(90, 90, 90);
        assert_eq!(gray.with_saturation(3.0), gray);
    }

    #[test]
    fn saturation_zero_yields_gray() {
        let c = Color::new(200, 40, 40).with_saturation(0.0);
        assert_eq!(c.r, c.g);
        assert_eq!(c.g, c.b);
    }

    #[test]
    fn saturation_boost_increases_spread() {
        let c = Color::new(150, 110, 100);
        let boosted = c.with_saturation(2.0);
        let spread = |c: Color| c.r.max(c.g).max(c.b) - c.r.min(c.g).min(c.b);
        assert!(spread(boosted) > spread(c));
    }

    #[test]
    fn display_matches_to_hex() {
        let color = Color::new(171, 205, 239);
        assert_eq!(format!("{color}"), color.to_hex());
    }
}

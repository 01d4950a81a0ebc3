use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color(pub u8, pub u8, pub u8, pub u8);

impl Color {
    pub const TRANSPARENT: Color = Color(0, 0, 0, 0);
    pub const BLACK: Color = Color(0, 0, 0, 255);
    pub const WHITE: Color = Color(255, 255, 255, 255);

    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Color(r, g, b, 255)
    }
    pub const fn from_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color(r, g, b, a)
    }

    /// Parses `#RRGGBB` or `#RRGGBBAA`.
    pub fn parse_hex(hex: &str) -> Option<Self> {
        let s = hex.trim_start_matches('#');
        if !s.is_ascii() {
            return None;
        }
        let byte = |i: usize| u8::from_str_radix(&s[i..i + 2], 16).ok();
        match s.len() {
            6 => Some(Color(byte(0)?, byte(2)?, byte(4)?, 255)),
            8 => Some(Color(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => None,
        }
    }

    /// Lenient variant of [`Color::parse_hex`]: anything unparseable is opaque black.
    pub fn from_hex(hex: &str) -> Self {
        Self::parse_hex(hex).unwrap_or(Color::BLACK)
    }

    pub fn with_alpha(self, a: u8) -> Self {
        Color(self.0, self.1, self.2, a)
    }

    /// Scales the alpha channel by `factor` (clamped to 0..=1).
    pub fn mul_alpha(self, factor: f32) -> Self {
        let a = (self.3 as f32 * factor.clamp(0.0, 1.0)).round() as u8;
        Color(self.0, self.1, self.2, a)
    }

    pub fn alpha_f32(self) -> f32 {
        self.3 as f32 / 255.0
    }

    pub fn to_hex(self) -> String {
        if self.3 == 255 {
            format!("#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.0, self.1, self.2, self.3)
        }
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Color::parse_hex(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid color `{s}`")))
    }
}

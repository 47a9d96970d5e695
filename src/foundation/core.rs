use crate::foundation::error::{PlaygroundError, PlaygroundResult};

pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

/// 0-based index of a frame dispatched by a page's scheduler.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

impl FrameIndex {
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

/// Canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Dimensions as the `u16` pair the CPU rasterizer works with.
    pub fn as_u16(self) -> PlaygroundResult<(u16, u16)> {
        let w: u16 = self
            .width
            .try_into()
            .map_err(|_| PlaygroundError::surface("canvas width exceeds u16"))?;
        let h: u16 = self
            .height
            .try_into()
            .map_err(|_| PlaygroundError::surface("canvas height exceeds u16"))?;
        if w == 0 || h == 0 {
            return Err(PlaygroundError::surface("canvas width/height must be > 0"));
        }
        Ok((w, h))
    }

    pub fn byte_len(self) -> usize {
        (self.width as usize)
            .saturating_mul(self.height as usize)
            .saturating_mul(4)
    }

    pub fn rect(self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }
}

/// Straight-alpha RGBA8 color.
///
/// Deserializes from a CSS-like string: `#rgb`, `#rrggbb`, `#rrggbbaa`, or one of a few
/// named colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const GRAY: Self = Self::rgb(128, 128, 128);
    pub const ORANGE: Self = Self::rgb(255, 165, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn parse(s: &str) -> PlaygroundResult<Self> {
        let s = s.trim();
        match s.to_ascii_lowercase().as_str() {
            "black" => return Ok(Self::BLACK),
            "white" => return Ok(Self::WHITE),
            "gray" | "grey" => return Ok(Self::GRAY),
            "orange" => return Ok(Self::ORANGE),
            "red" => return Ok(Self::rgb(255, 0, 0)),
            "green" => return Ok(Self::rgb(0, 128, 0)),
            "blue" => return Ok(Self::rgb(0, 0, 255)),
            "transparent" => return Ok(Self { a: 0, ..Self::BLACK }),
            _ => {}
        }

        let Some(hex) = s.strip_prefix('#') else {
            return Err(PlaygroundError::validation(format!(
                "unknown color \"{s}\""
            )));
        };

        let parsed = parse_hex_digits(hex.as_bytes());

        parsed.ok_or_else(|| {
            PlaygroundError::validation(format!(
                "hex color must be #rgb, #rrggbb or #rrggbbaa, got \"{s}\""
            ))
        })
    }

    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

fn parse_hex_digits(b: &[u8]) -> Option<Rgba8> {
    fn nibble(c: u8) -> Option<u8> {
        (c as char).to_digit(16).map(|d| d as u8)
    }
    fn byte(pair: &[u8]) -> Option<u8> {
        Some((nibble(pair[0])? << 4) | nibble(pair[1])?)
    }

    match b.len() {
        3 => Some(Rgba8::rgb(
            nibble(b[0])? * 17,
            nibble(b[1])? * 17,
            nibble(b[2])? * 17,
        )),
        6 => Some(Rgba8::rgb(byte(&b[0..2])?, byte(&b[2..4])?, byte(&b[4..6])?)),
        8 => Some(Rgba8 {
            r: byte(&b[0..2])?,
            g: byte(&b[2..4])?,
            b: byte(&b[4..6])?,
            a: byte(&b[6..8])?,
        }),
        _ => None,
    }
}

impl TryFrom<String> for Rgba8 {
    type Error = PlaygroundError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Rgba8> for String {
    fn from(value: Rgba8) -> Self {
        value.to_hex()
    }
}

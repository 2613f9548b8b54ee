//! Page geometry and drawing primitives, in millimetres on an A4 page.

use serde::{Deserialize, Serialize};

pub const PAGE_WIDTH: f64 = 210.0;
pub const PAGE_HEIGHT: f64 = 297.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Brand green, also the fallback for unparseable color tokens.
pub const BRAND_GREEN: Rgb = Rgb::new(34, 197, 94);
pub const BLACK: Rgb = Rgb::new(0, 0, 0);
pub const WHITE: Rgb = Rgb::new(255, 255, 255);
pub const GREY: Rgb = Rgb::new(100, 100, 100);

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    /// Parse `#RRGGBB` (the `#` is optional). Anything else falls back to
    /// [`BRAND_GREEN`].
    pub fn from_hex(hex: &str) -> Self {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return BRAND_GREEN;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).unwrap_or(0);
        Rgb::new(channel(0), channel(2), channel(4))
    }

    /// Darken by `factor` in `[0, 1]`, truncating like a canvas fill.
    pub fn darken(self, factor: f64) -> Self {
        let scale = |c: u8| (f64::from(c) * (1.0 - factor)).floor().clamp(0.0, 255.0) as u8;
        Rgb::new(scale(self.r), scale(self.g), scale(self.b))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub size: f64,
    pub color: Rgb,
    pub bold: bool,
    pub align: Align,
}

impl TextStyle {
    pub fn new(size: f64, color: Rgb) -> Self {
        TextStyle {
            size,
            color,
            bold: false,
            align: Align::Left,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn centered(mut self) -> Self {
        self.align = Align::Center;
        self
    }

    pub fn right(mut self) -> Self {
        self.align = Align::Right;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Shape {
    Rect {
        rect: Rect,
        fill: Option<Rgb>,
        stroke: Option<Rgb>,
        /// Corner radius; zero for square corners.
        radius: f64,
    },
    Line {
        from: Point,
        to: Point,
        color: Rgb,
        width: f64,
    },
}

/// A grid table with a colored header row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub header_fill: Rgb,
    pub font_size: f64,
}

impl Table {
    /// Height the table occupies when drawn, for placing what follows it.
    pub fn height(&self) -> f64 {
        let row_height = self.font_size * 0.8;
        row_height * (self.rows.len() + 1) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex() {
        assert_eq!(Rgb::from_hex("#3B82F6"), Rgb::new(59, 130, 246));
        assert_eq!(Rgb::from_hex("fbbf24"), Rgb::new(251, 191, 36));
    }

    #[test]
    fn test_from_hex_falls_back_to_brand_green() {
        assert_eq!(Rgb::from_hex("blue"), BRAND_GREEN);
        assert_eq!(Rgb::from_hex("#12345"), BRAND_GREEN);
        assert_eq!(Rgb::from_hex("#ZZZZZZ"), BRAND_GREEN);
    }

    #[test]
    fn test_darken() {
        assert_eq!(Rgb::new(100, 200, 50).darken(0.0), Rgb::new(100, 200, 50));
        assert_eq!(Rgb::new(100, 200, 51).darken(0.5), Rgb::new(50, 100, 25));
    }
}

use crate::common::{RenderError, RenderResult};
use crate::domains::layout::{EdgeRoute, Position2D};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An sRGB color, configured by name (`"gold"`) or hex (`"#ffd700"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const GRAY: Rgb = Rgb(128, 128, 128);
    pub const RED: Rgb = Rgb(255, 0, 0);
    pub const GOLD: Rgb = Rgb(255, 215, 0);
    pub const LIGHT_BLUE: Rgb = Rgb(173, 216, 230);

    pub fn parse(s: &str) -> RenderResult<Self> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            if hex.len() != 6 || !hex.is_ascii() {
                return Err(RenderError::InvalidInput(format!("bad hex color '{}'", s)));
            }
            let channel = |i: usize| {
                u8::from_str_radix(&hex[i..i + 2], 16)
                    .map_err(|_| RenderError::InvalidInput(format!("bad hex color '{}'", s)))
            };
            return Ok(Rgb(channel(0)?, channel(2)?, channel(4)?));
        }
        let named = match s.to_ascii_lowercase().as_str() {
            "black" => Rgb::BLACK,
            "white" => Rgb::WHITE,
            "gray" | "grey" => Rgb::GRAY,
            "lightgray" | "lightgrey" => Rgb(211, 211, 211),
            "red" => Rgb::RED,
            "green" => Rgb(0, 128, 0),
            "blue" => Rgb(0, 0, 255),
            "orange" => Rgb(255, 165, 0),
            "gold" => Rgb::GOLD,
            "lightblue" => Rgb::LIGHT_BLUE,
            "navy" => Rgb(0, 0, 128),
            "purple" => Rgb(128, 0, 128),
            other => {
                return Err(RenderError::InvalidInput(format!("unknown color '{}'", other)));
            }
        };
        Ok(named)
    }
}

impl TryFrom<String> for Rgb {
    type Error = RenderError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Rgb::parse(&value)
    }
}

impl From<Rgb> for String {
    fn from(c: Rgb) -> Self {
        c.to_string()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VAnchor {
    Center,
    Top,
}

/// One drawing instruction, in data coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// Filled circular marker; `size` is the marker area in pt².
    Node { at: Position2D, size: f64, color: Rgb },
    /// Arrowed connector. Both ends are trimmed by the marker of `node_size`.
    Edge {
        from: Position2D,
        to: Position2D,
        route: EdgeRoute,
        color: Rgb,
        node_size: f64,
    },
    /// Horizontally centered text.
    Text {
        at: Position2D,
        text: String,
        size: f64,
        color: Rgb,
        anchor: VAnchor,
    },
}

/// A single drawing surface: an ordered display list plus title and axis state.
/// Later primitives paint over earlier ones.
#[derive(Debug, Clone, Default)]
pub struct Canvas {
    primitives: Vec<Primitive>,
    pub title: Option<String>,
    pub title_size: f64,
    pub title_color: Option<Rgb>,
    pub x_limits: Option<(f64, f64)>,
    pub y_limits: Option<(f64, f64)>,
    pub axis_visible: bool,
}

impl Canvas {
    pub fn new() -> Self {
        Self { axis_visible: true, title_size: 12.0, ..Default::default() }
    }

    pub fn push(&mut self, primitive: Primitive) {
        self.primitives.push(primitive);
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn is_blank(&self) -> bool {
        self.primitives.is_empty() && self.title.is_none()
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

/// A grid of canvases sharing one output image.
#[derive(Debug, Clone)]
pub struct Figure {
    pub rows: usize,
    pub cols: usize,
    /// Size in inches.
    pub width: f64,
    pub height: f64,
    pub dpi: f64,
    pub suptitle: Option<String>,
    pub transparent: bool,
    panels: Vec<Canvas>,
}

impl Figure {
    pub fn new(rows: usize, cols: usize, width: f64, height: f64, dpi: f64) -> Self {
        let rows = rows.max(1);
        let cols = cols.max(1);
        Self {
            rows,
            cols,
            width,
            height,
            dpi,
            suptitle: None,
            transparent: false,
            panels: (0..rows * cols).map(|_| Canvas::new()).collect(),
        }
    }

    pub fn single(width: f64, height: f64, dpi: f64) -> Self {
        Self::new(1, 1, width, height, dpi)
    }

    pub fn pixel_size(&self) -> (u32, u32) {
        ((self.width * self.dpi).round() as u32, (self.height * self.dpi).round() as u32)
    }

    pub fn panel(&self, row: usize, col: usize) -> Option<&Canvas> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.panels.get(row * self.cols + col)
    }

    pub fn panel_mut(&mut self, row: usize, col: usize) -> Option<&mut Canvas> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.panels.get_mut(row * self.cols + col)
    }

    pub fn panels(&self) -> &[Canvas] {
        &self.panels
    }
}

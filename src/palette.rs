//! The fixed set of colors the rover understands, for both the pen and the
//! background.
pub use csscolorparser::parse as parse_css_color;
pub use csscolorparser::Color as CssColor;
use std::fmt;
use std::str::FromStr;

use crate::errors::RoverError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Color {
    White,
    #[default]
    Yellow,
    Orange,
    Red,
    Green,
    Blue,
    Purple,
    Grey,
    Black,
}

impl Color {
    pub const ALL: [Color; 9] = [
        Color::White,
        Color::Yellow,
        Color::Orange,
        Color::Red,
        Color::Green,
        Color::Blue,
        Color::Purple,
        Color::Grey,
        Color::Black,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Color::White => "white",
            Color::Yellow => "yellow",
            Color::Orange => "orange",
            Color::Red => "red",
            Color::Green => "green",
            Color::Blue => "blue",
            Color::Purple => "purple",
            Color::Grey => "grey",
            Color::Black => "black",
        }
    }

    /// The CSS value of the named color.
    pub fn css(&self) -> CssColor {
        // Every palette name is a CSS keyword.
        parse_css_color(self.name()).unwrap_or(CssColor::from_rgba8(0, 0, 0, 255))
    }

    fn from_rgba(rgba: [u8; 4]) -> Option<Color> {
        Color::ALL.into_iter().find(|c| c.css().to_rgba8() == rgba)
    }

    fn valid_names() -> String {
        let names: Vec<&str> = Color::ALL.iter().map(|c| c.name()).collect();
        format!("({})", names.join(", "))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts a palette name, or any CSS color that lands exactly on a palette
/// entry (`#ff0000`, `rgb(0, 0, 255)`, `gray`).
impl FromStr for Color {
    type Err = RoverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        if let Some(color) = Color::ALL.into_iter().find(|c| c.name() == wanted) {
            return Ok(color);
        }
        parse_css_color(&wanted)
            .ok()
            .and_then(|css| Color::from_rgba(css.to_rgba8()))
            .ok_or_else(|| {
                RoverError::invalid(format!(
                    "color value should be one of the following: {}",
                    Color::valid_names()
                ))
            })
    }
}

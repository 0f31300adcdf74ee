//! Defines for colours.

use std::str::FromStr;

use thiserror::Error;

/// An RGB colour with 8-bit channels, used for combo and slider colours.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgb {
    /// Red channel.
    pub red: u8,
    /// Green channel.
    pub green: u8,
    /// Blue channel.
    pub blue: u8,
}

impl Rgb {
    /// Creates a new colour from the respective channels.
    #[must_use]
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Renders the colour as lowercase `rrggbb`, without separators or a leading `#`.
    #[must_use]
    pub fn hex(&self) -> String {
        format!("{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((red, green, blue): (u8, u8, u8)) -> Self {
        Self { red, green, blue }
    }
}

impl From<Rgb> for (u8, u8, u8) {
    fn from(colour: Rgb) -> Self {
        (colour.red, colour.green, colour.blue)
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }
}

/// An error occurred when reading `r,g,b` text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
pub enum RgbParseError {
    /// Fewer than three channels were written.
    #[error("expected three channels `r,g,b`, but found {0}")]
    MissingChannel(usize),
    /// A channel is not an integer in 0..=255.
    #[error("channel `{0}` is not an 8-bit integer")]
    InvalidChannel(String),
}

impl FromStr for Rgb {
    type Err = RgbParseError;

    /// Parses `r,g,b`. A fourth (alpha) channel written by some editors is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let channels = s.split(',').map(str::trim).collect::<Vec<_>>();
        let [red, green, blue, ..] = channels.as_slice() else {
            return Err(RgbParseError::MissingChannel(channels.len()));
        };
        let channel = |text: &str| {
            text.parse::<u8>()
                .map_err(|_| RgbParseError::InvalidChannel(text.to_owned()))
        };
        Ok(Self {
            red: channel(*red)?,
            green: channel(*green)?,
            blue: channel(*blue)?,
        })
    }
}

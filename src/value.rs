//! Definitions of field value data.
//!
//! Structures in this module are shared by the [lex](crate::lex), [parse](crate::parse) part and
//! the output models.

pub mod colour;
pub mod sample;

/// A game mode the beatmap is made for. Integer-coded in the `Mode` key.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mode {
    /// osu!standard, mode 0.
    #[default]
    Standard,
    /// osu!taiko, mode 1.
    Taiko,
    /// osu!catch, mode 2.
    Catch,
    /// osu!mania, mode 3.
    Mania,
}

impl TryFrom<u8> for Mode {
    type Error = u8;
    fn try_from(value: u8) -> core::result::Result<Self, Self::Error> {
        Ok(match value {
            0 => Self::Standard,
            1 => Self::Taiko,
            2 => Self::Catch,
            3 => Self::Mania,
            other => return Err(other),
        })
    }
}

impl From<Mode> for u8 {
    fn from(value: Mode) -> Self {
        match value {
            Mode::Standard => 0,
            Mode::Taiko => 1,
            Mode::Catch => 2,
            Mode::Mania => 3,
        }
    }
}

/// Parses an integer field, also accepting float text which is truncated toward zero.
///
/// Returns `None` if the text is not a number or is out of the range of `T`.
pub(crate) fn parse_integer<T: num::NumCast>(text: &str) -> Option<T> {
    let text = text.trim();
    if let Ok(integer) = text.parse::<i64>() {
        return num::cast(integer);
    }
    text.parse::<f64>()
        .ok()
        .filter(|float| float.is_finite())
        .and_then(|float| num::cast(float.trunc()))
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", u8::from(*self))
    }
}

#[test]
fn test_mode_codes() {
    for code in 0..4u8 {
        let mode = Mode::try_from(code).unwrap();
        assert_eq!(u8::from(mode), code);
    }
    assert_eq!(Mode::try_from(4), Err(4));
}

#[test]
fn test_parse_integer() {
    assert_eq!(parse_integer::<i32>(" 1500 "), Some(1500));
    assert_eq!(parse_integer::<i32>("1500.75"), Some(1500));
    assert_eq!(parse_integer::<i32>("-12.9"), Some(-12));
    assert_eq!(parse_integer::<u32>("-1"), None);
    assert_eq!(parse_integer::<u8>("300"), None);
    assert_eq!(parse_integer::<i32>("abc"), None);
    assert_eq!(parse_integer::<i32>("NaN"), None);
}

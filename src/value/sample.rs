//! Hit sound related values: sample banks, additions and per-object hit samples.

use std::str::FromStr;

use thiserror::Error;

/// The audio sample bank used for hit sound feedback.
///
/// Integer-coded in timing points and hit samples, and spelled out by name in the `[General]`
/// section.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SampleSet {
    /// Inherits the bank from the timing point or the beatmap, code 0.
    #[default]
    Auto,
    /// Normal bank, code 1.
    Normal,
    /// Soft bank, code 2.
    Soft,
    /// Drum bank, code 3.
    Drum,
}

/// The sample set code or name was not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
#[error("unknown sample set `{0}`")]
pub struct UnknownSampleSet(pub String);

impl TryFrom<u32> for SampleSet {
    type Error = UnknownSampleSet;
    fn try_from(value: u32) -> core::result::Result<Self, Self::Error> {
        Ok(match value {
            0 => Self::Auto,
            1 => Self::Normal,
            2 => Self::Soft,
            3 => Self::Drum,
            other => return Err(UnknownSampleSet(other.to_string())),
        })
    }
}

impl FromStr for SampleSet {
    type Err = UnknownSampleSet;

    /// Parses the case-sensitive bank name. Old beatmaps write `None` for the automatic bank.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "Auto" | "None" => Self::Auto,
            "Normal" => Self::Normal,
            "Soft" => Self::Soft,
            "Drum" => Self::Drum,
            other => return Err(UnknownSampleSet(other.to_owned())),
        })
    }
}

impl From<SampleSet> for u32 {
    fn from(value: SampleSet) -> Self {
        match value {
            SampleSet::Auto => 0,
            SampleSet::Normal => 1,
            SampleSet::Soft => 2,
            SampleSet::Drum => 3,
        }
    }
}

impl std::fmt::Display for SampleSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Auto => "Auto",
            Self::Normal => "Normal",
            Self::Soft => "Soft",
            Self::Drum => "Drum",
        })
    }
}

bitflags::bitflags! {
    /// Hit sound additions played on a hit object. Combinable.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Additions: u8 {
        /// The plain hit sound without any addition.
        const NONE = 1;
        /// Whistle addition.
        const WHISTLE = 1 << 1;
        /// Finish (cymbal) addition.
        const FINISH = 1 << 2;
        /// Clap addition.
        const CLAP = 1 << 3;
    }
}

impl Additions {
    /// Parses the additions bit field, keeping unknown bits as they are.
    ///
    /// # Errors
    ///
    /// Returns the parse error if `s` is not an 8-bit integer.
    pub fn parse_bits(s: &str) -> Result<Self, std::num::ParseIntError> {
        s.trim().parse::<u8>().map(Self::from_bits_retain)
    }
}

/// The bank, index, volume and file overrides attached to a hit object, written as
/// `normalSet:additionSet:index:volume:filename`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HitSample {
    /// Bank of the plain hit sound.
    pub normal_set: SampleSet,
    /// Bank of the additions.
    pub addition_set: SampleSet,
    /// Custom sample index, 0 means the timing point's one.
    pub index: u32,
    /// Volume from 0 to 100, 0 means the timing point's one.
    pub volume: u8,
    /// Custom sample file name, replacing the bank sounds.
    pub filename: Option<String>,
}

/// The hit sample text could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
#[error("invalid hit sample `{0}`")]
pub struct InvalidHitSample(pub String);

impl FromStr for HitSample {
    type Err = InvalidHitSample;

    /// Parses `normalSet:additionSet[:index[:volume[:filename]]]`. Empty text is the default.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(Self::default());
        }
        let invalid = || InvalidHitSample(s.to_owned());
        let mut parts = s.split(':');
        let bank = |part: Option<&str>| -> Result<SampleSet, InvalidHitSample> {
            let code = part
                .ok_or_else(invalid)?
                .trim()
                .parse::<u32>()
                .map_err(|_| invalid())?;
            SampleSet::try_from(code).map_err(|_| invalid())
        };
        let normal_set = bank(parts.next())?;
        let addition_set = bank(parts.next())?;
        let index = match parts.next().map(str::trim) {
            None | Some("") => 0,
            Some(index) => index.parse().map_err(|_| invalid())?,
        };
        let volume = match parts.next().map(str::trim) {
            None | Some("") => 0,
            Some(volume) => volume.parse::<u8>().map_err(|_| invalid())?.min(100),
        };
        let filename = parts
            .next()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(ToOwned::to_owned);
        Ok(Self {
            normal_set,
            addition_set,
            index,
            volume,
            filename,
        })
    }
}

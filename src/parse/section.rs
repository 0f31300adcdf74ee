//! The sections of the format and the processors of their lines.

use std::str::FromStr;

use super::{
    NumericConversionError, ParseWarning, Result, StructuralWarning,
    keys::{self, KeyTable},
};
use crate::{
    geometry::Vector2,
    hit_object::HitObject,
    lex::token::Token,
    model::{Background, Beatmap, BreakPeriod, Events, Video},
    timing::TimingPoint,
    value::{
        colour::{Rgb, RgbParseError},
        parse_integer,
    },
};

/// A state of the section parser.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Section {
    /// Before any section header, where the format version line is expected.
    FormatVersion,
    /// `[General]`.
    General,
    /// `[Editor]`.
    Editor,
    /// `[Metadata]`.
    Metadata,
    /// `[Difficulty]`.
    Difficulty,
    /// `[Events]`.
    Events,
    /// `[TimingPoints]`.
    TimingPoints,
    /// `[Colours]`.
    Colours,
    /// `[HitObjects]`.
    HitObjects,
    /// A section with an unknown name, whose lines are consumed without effect.
    Ignored(String),
}

impl Section {
    /// Gets the section of the case-sensitive header name.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "General" => Self::General,
            "Editor" => Self::Editor,
            "Metadata" => Self::Metadata,
            "Difficulty" => Self::Difficulty,
            "Events" => Self::Events,
            "TimingPoints" => Self::TimingPoints,
            "Colours" => Self::Colours,
            "HitObjects" => Self::HitObjects,
            other => Self::Ignored(other.to_owned()),
        }
    }

    /// The processor of the lines in this section, `None` where lines are not interpreted.
    #[must_use]
    pub fn processor(&self) -> Option<&'static dyn SectionProcessor> {
        static GENERAL: KeyValueProcessor = KeyValueProcessor(&keys::GENERAL);
        static EDITOR: KeyValueProcessor = KeyValueProcessor(&keys::EDITOR);
        static METADATA: KeyValueProcessor = KeyValueProcessor(&keys::METADATA);
        static DIFFICULTY: KeyValueProcessor = KeyValueProcessor(&keys::DIFFICULTY);
        let processor: &'static dyn SectionProcessor = match self {
            Self::FormatVersion | Self::Ignored(_) => return None,
            Self::General => &GENERAL,
            Self::Editor => &EDITOR,
            Self::Metadata => &METADATA,
            Self::Difficulty => &DIFFICULTY,
            Self::Events => &EventsProcessor,
            Self::TimingPoints => &TimingPointsProcessor,
            Self::Colours => &ColoursProcessor,
            Self::HitObjects => &HitObjectsProcessor,
        };
        Some(processor)
    }

    pub(super) fn process(&self, token: &Token<'_>, beatmap: &mut Beatmap) -> Result<()> {
        match self.processor() {
            Some(processor) => processor.on_token(token, beatmap).map_err(|warning| {
                if let ParseWarning::Structural(StructuralWarning::UnmatchedLine { line, .. }) =
                    warning
                {
                    unmatched(self, line)
                } else {
                    warning
                }
            }),
            None if matches!(self, Self::FormatVersion) => Err(unmatched(self, token.to_string())),
            None => Ok(()),
        }
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::FormatVersion => "the format version header",
            Self::General => "General",
            Self::Editor => "Editor",
            Self::Metadata => "Metadata",
            Self::Difficulty => "Difficulty",
            Self::Events => "Events",
            Self::TimingPoints => "TimingPoints",
            Self::Colours => "Colours",
            Self::HitObjects => "HitObjects",
            Self::Ignored(name) => name,
        })
    }
}

fn unmatched(section: &Section, line: String) -> ParseWarning {
    StructuralWarning::UnmatchedLine {
        section: section.to_string(),
        line,
    }
    .into()
}

/// A processor of the lines of one section. An implementation takes control of one section and
/// writes what it reads into the beatmap under construction.
///
/// Section headers, comments and blank lines never reach a processor.
pub trait SectionProcessor: Sync {
    /// Processes a line of the section.
    ///
    /// # Errors
    ///
    /// Returns the [`ParseWarning`] to record for the line. The beatmap is left unchanged then.
    fn on_token(&self, token: &Token<'_>, beatmap: &mut Beatmap) -> Result<()>;
}

fn unexpected(token: &Token<'_>) -> ParseWarning {
    StructuralWarning::UnmatchedLine {
        section: String::new(),
        line: token.to_string(),
    }
    .into()
}

/// It processes `Key: value` lines through a table of typed setters.
struct KeyValueProcessor(&'static once_cell::sync::Lazy<KeyTable>);

impl SectionProcessor for KeyValueProcessor {
    fn on_token(&self, token: &Token<'_>, beatmap: &mut Beatmap) -> Result<()> {
        let Token::KeyValue { key, value } = token else {
            return Err(unexpected(token));
        };
        let table: &KeyTable = self.0;
        let Some(setter) = table.get(key) else {
            return Err(StructuralWarning::UnknownKey {
                section: table.section().to_owned(),
                key: (*key).to_owned(),
            }
            .into());
        };
        setter(beatmap, *value).map_err(|expected| {
            NumericConversionError {
                key: (*key).to_owned(),
                value: (*value).to_owned(),
                expected,
            }
            .into()
        })
    }
}

/// It processes `[TimingPoints]` lines.
struct TimingPointsProcessor;

impl SectionProcessor for TimingPointsProcessor {
    fn on_token(&self, token: &Token<'_>, beatmap: &mut Beatmap) -> Result<()> {
        let (Token::Fields(line) | Token::Text(line)) = token else {
            return Err(unexpected(token));
        };
        let point = TimingPoint::from_str(line)?;
        beatmap.push_timing_point(point);
        Ok(())
    }
}

/// It processes `[HitObjects]` lines against the timing points read so far.
struct HitObjectsProcessor;

impl SectionProcessor for HitObjectsProcessor {
    fn on_token(&self, token: &Token<'_>, beatmap: &mut Beatmap) -> Result<()> {
        let (Token::Fields(line) | Token::Text(line)) = token else {
            return Err(unexpected(token));
        };
        let hit_object = HitObject::from_fields(line, &beatmap.timing_points)?;
        beatmap.push_hit_object(hit_object);
        Ok(())
    }
}

/// It processes `Name : r,g,b` lines of `[Colours]`.
struct ColoursProcessor;

impl SectionProcessor for ColoursProcessor {
    fn on_token(&self, token: &Token<'_>, beatmap: &mut Beatmap) -> Result<()> {
        let Token::KeyValue { key, value } = token else {
            return Err(unexpected(token));
        };
        match Rgb::from_str(value) {
            Ok(colour) => {
                beatmap.colours.set(*key, colour);
                Ok(())
            }
            Err(RgbParseError::InvalidChannel(_)) => Err(NumericConversionError {
                key: (*key).to_owned(),
                value: (*value).to_owned(),
                expected: "colour channel 0 to 255",
            }
            .into()),
            Err(source) => Err(ParseWarning::MalformedColour {
                name: (*key).to_owned(),
                source,
            }),
        }
    }
}

/// It records the background, the video and the breaks of `[Events]`, and tolerates everything
/// else, including storyboard commands.
struct EventsProcessor;

impl SectionProcessor for EventsProcessor {
    fn on_token(&self, token: &Token<'_>, beatmap: &mut Beatmap) -> Result<()> {
        if let Token::Fields(line) = token {
            if !read_event(line, &mut beatmap.events) {
                log::debug!("ignoring event `{line}`");
            }
        }
        Ok(())
    }
}

/// Reads a recognized event into `events`, returning whether it was one.
fn read_event(line: &str, events: &mut Events) -> bool {
    let fields = line.split(',').map(str::trim).collect::<Vec<_>>();
    let integer = |index: usize| fields.get(index).and_then(|text| parse_integer::<i32>(text));
    let filename = |index: usize| {
        fields
            .get(index)
            .map(|text| text.trim_matches('"').to_owned())
            .filter(|name| !name.is_empty())
    };
    let offset = || Vector2::new(integer(3).unwrap_or(0), integer(4).unwrap_or(0));
    match fields.first().copied() {
        Some("0" | "Background") => {
            let Some(filename) = filename(2) else {
                return false;
            };
            events.background = Some(Background {
                filename,
                offset: offset(),
            });
        }
        Some("1" | "Video") => {
            let (Some(start_time), Some(filename)) = (integer(1), filename(2)) else {
                return false;
            };
            events.video = Some(Video {
                start_time,
                filename,
                offset: offset(),
            });
        }
        Some("2" | "Break") => {
            let (Some(start_time), Some(end_time)) = (integer(1), integer(2)) else {
                return false;
            };
            events.breaks.push(BreakPeriod {
                start_time,
                end_time,
            });
        }
        _ => return false,
    }
    true
}

//! Parsing [`Beatmap`] from [`TokenStream`](crate::lex::token::TokenStream).
//!
//! Raw [String] == [lex](crate::lex) ==> [`TokenStream`](crate::lex::token::TokenStream) ==
//! [parse](self) ==> [`Beatmap`] (in [`ParseOutput`])
//!
//! The parser is a state machine over the sections of the format. A `[Name]` line switches the
//! state, and every other line is handed to the [`SectionProcessor`] of the active section. Each
//! failing line is recorded as a warning and parsing goes on.

pub mod check_playing;
pub(crate) mod keys;
mod section;

use thiserror::Error;

use crate::{
    hit_object::MalformedHitObjectError,
    lex::token::{Token, TokenWithRange},
    mixin::{SourceRangeMixin, SourceRangeMixinExt},
    model::Beatmap,
    timing::MalformedTimingPoint,
    value::colour::RgbParseError,
};

pub use self::section::{Section, SectionProcessor};

/// A warning about the shape of a line, not its content.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StructuralWarning {
    /// A section not known to the parser. Its lines are skipped.
    #[error("unknown section [{0}]")]
    UnknownSection(String),
    /// A key not known in its section. The line is skipped.
    #[error("unknown key `{key}` in [{section}]")]
    UnknownKey {
        /// The section the key was found in.
        section: String,
        /// The key.
        key: String,
    },
    /// An empty or whitespace-only line.
    #[error("blank line")]
    BlankLine,
    /// A line of a shape the active section does not accept.
    #[error("unexpected line `{line}` in {section}")]
    UnmatchedLine {
        /// The active section.
        section: String,
        /// The trimmed text of the line.
        line: String,
    },
}

/// A recognized key had a value which cannot be converted to its type. The field keeps its
/// previous value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
#[error("value `{value}` of `{key}` is not a valid {expected}")]
pub struct NumericConversionError {
    /// The key.
    pub key: String,
    /// The written value.
    pub value: String,
    /// The description of the expected value.
    pub expected: &'static str,
}

/// A non-fatal problem found while parsing a line.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
pub enum ParseWarning {
    /// The line has a wrong shape.
    #[error(transparent)]
    Structural(#[from] StructuralWarning),
    /// A value could not be converted.
    #[error(transparent)]
    NumericConversion(#[from] NumericConversionError),
    /// A `[TimingPoints]` line was malformed and skipped.
    #[error("malformed timing point: {0}")]
    MalformedTimingPoint(#[from] MalformedTimingPoint),
    /// A `[HitObjects]` line was malformed and skipped.
    #[error("malformed hit object: {0}")]
    MalformedHitObject(#[from] MalformedHitObjectError),
    /// A `[Colours]` value lacked channels.
    #[error("malformed colour `{name}`: {source}")]
    MalformedColour {
        /// The colour slot.
        name: String,
        /// The cause.
        source: RgbParseError,
    },
}

/// Type alias of `core::result::Result<T, ParseWarning>`
pub(crate) type Result<T> = core::result::Result<T, ParseWarning>;

/// A parse warning with position information.
pub type ParseWarningWithRange = SourceRangeMixin<ParseWarning>;

/// Output of parsing a token stream.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub struct ParseOutput {
    /// The output beatmap, finished.
    pub beatmap: Beatmap,
    /// Warnings that occurred during parsing.
    pub parse_warnings: Vec<ParseWarningWithRange>,
}

impl Beatmap {
    /// Parses a token stream into a finished [`Beatmap`].
    ///
    /// Never fails: every line that cannot be used is skipped and reported in
    /// [`ParseOutput::parse_warnings`].
    pub fn from_token_stream<'a>(
        token_iter: impl IntoIterator<Item = &'a TokenWithRange<'a>>,
    ) -> ParseOutput {
        let mut beatmap = Self::default();
        let mut section = Section::FormatVersion;
        let mut parse_warnings = vec![];
        for token in token_iter {
            let result = match token.content() {
                Token::Section(name) => {
                    section = Section::from_name(name);
                    log::trace!("entering section {section}");
                    match &section {
                        Section::Ignored(name) => {
                            log::debug!("skipping unknown section [{name}]");
                            Err(StructuralWarning::UnknownSection(name.clone()).into())
                        }
                        _ => Ok(()),
                    }
                }
                Token::Comment(_) => Ok(()),
                Token::Blank => Err(StructuralWarning::BlankLine.into()),
                Token::FormatVersion(version)
                    if section == Section::FormatVersion && beatmap.format_version.is_none() =>
                {
                    beatmap.format_version = Some(*version);
                    Ok(())
                }
                other => section.process(other, &mut beatmap),
            };
            if let Err(warning) = result {
                parse_warnings.push(warning.into_wrapper_range(token.range().clone()));
            }
        }
        beatmap.finish();
        ParseOutput {
            beatmap,
            parse_warnings,
        }
    }
}

#[cfg(feature = "diagnostics")]
impl crate::diagnostics::ToAriadne for ParseWarningWithRange {
    fn to_report<'a>(
        &self,
        src: &crate::diagnostics::SimpleSource<'a>,
    ) -> ariadne::Report<'a, (String, std::ops::Range<usize>)> {
        use ariadne::{Color, Label, Report, ReportKind};

        let (start, end) = self.as_span();
        let filename = src.name().to_string();
        let kind = match self.content() {
            ParseWarning::Structural(_) => ReportKind::Advice,
            _ => ReportKind::Warning,
        };
        Report::build(kind, (filename.clone(), start..end))
            .with_message(format!("parse: {}", self.content()))
            .with_label(Label::new((filename, start..end)).with_color(Color::Blue))
            .finish()
    }
}

//! The osu! beatmap (`.osu`) format parser.
//!
//! A `.osu` file describes one difficulty of a track: key/value sections with the metadata and
//! difficulty parameters, the timing points, and the hit objects placed over the track. The
//! difficulties sharing one track form a [`BeatmapSet`](model::BeatmapSet).
//!
//! Parsing has two phases. [`lex`] splits the source into classified lines, and [`parse`] runs a
//! state machine over the sections, filling a [`Beatmap`](model::Beatmap).
//!
//! In detail, our policies are:
//!
//! - Support only UTF-8 (as required `String` to input).
//! - Never fail on a malformed line. Every problem becomes a warning, and the rest of the file is
//!   still read.
//! - Do not support writing beatmaps back into the format.
//! - Keep only what is needed to play: storyboard commands of `[Events]` are consumed without
//!   being modelled.
//!
//! # Example
//!
//! ```
//! use osu_rs::{OsuOutput, parse_beatmap};
//!
//! let source = "osu file format v14\n[General]\nAudioFilename: audio.mp3\n[Metadata]\nVersion: Hard\n";
//! let OsuOutput { beatmap, warnings } = parse_beatmap(source);
//! assert_eq!(beatmap.general.audio_filename, "audio.mp3");
//! assert_eq!(beatmap.difficulty_name(), "Hard");
//! println!("Warnings: {warnings:?}");
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod diagnostics;
pub mod geometry;
pub mod hit_object;
pub mod lex;
pub mod mixin;
pub mod model;
pub mod parse;
pub mod prelude;
pub mod source;
pub mod timing;
pub mod value;

use std::collections::BTreeMap;

use thiserror::Error;

use self::{
    lex::token::TokenStream,
    model::{
        Beatmap, BeatmapSet, DuplicateDifficultyError, SetWarning,
        prompt::{AlwaysReject, Prompter},
    },
    parse::{
        ParseOutput, ParseWarning, ParseWarningWithRange, check_playing::PlayingWarning,
    },
};

/// How much a warning matters to a reader of the beatmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Severity {
    /// Cosmetic problems common in hand-edited files, such as blank lines or unknown keys.
    Low,
    /// Lost information: a value or a line could not be used.
    Normal,
}

/// A warning occurred when parsing a `.osu` file.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
pub enum OsuWarning {
    /// A line could not be used.
    #[error("Warn: parse: {0}")]
    ParseWarning(#[from] ParseWarningWithRange),
    /// The beatmap parsed but is hard to play.
    #[error("Warn: playing: {0}")]
    PlayingWarning(#[from] PlayingWarning),
}

impl OsuWarning {
    /// The severity of the warning.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        match self {
            Self::ParseWarning(warning) => match warning.content() {
                ParseWarning::Structural(_) => Severity::Low,
                _ => Severity::Normal,
            },
            Self::PlayingWarning(_) => Severity::Normal,
        }
    }
}

/// Output of parsing a `.osu` file.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub struct OsuOutput {
    /// The parsed beatmap.
    pub beatmap: Beatmap,
    /// Warnings that occurred during parsing, in line order, then the playing warnings.
    pub warnings: Vec<OsuWarning>,
}

/// Parses a `.osu` file from source text.
///
/// This function never fails. Lines which cannot be read are reported in
/// [`OsuOutput::warnings`].
pub fn parse_beatmap(source: &str) -> OsuOutput {
    let tokens = lex::parse(source);
    parse_beatmap_with_tokens(&tokens)
}

/// Parses a `.osu` file from tokens.
///
/// A step of [`parse_beatmap`]
pub fn parse_beatmap_with_tokens(tokens: &TokenStream<'_>) -> OsuOutput {
    let ParseOutput {
        beatmap,
        parse_warnings,
    } = Beatmap::from_token_stream(tokens);
    let mut warnings: Vec<OsuWarning> = parse_warnings
        .into_iter()
        .map(OsuWarning::ParseWarning)
        .collect();
    warnings.extend(
        beatmap
            .check_playing()
            .into_iter()
            .map(OsuWarning::PlayingWarning),
    );
    OsuOutput { beatmap, warnings }
}

/// Configuration of assembling beatmap sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParseConfig<P> {
    prompter: P,
}

/// The default configuration, rejecting duplicated difficulty names with [`AlwaysReject`].
#[must_use]
pub const fn default_config() -> ParseConfig<AlwaysReject> {
    ParseConfig {
        prompter: AlwaysReject,
    }
}

impl Default for ParseConfig<AlwaysReject> {
    fn default() -> Self {
        default_config()
    }
}

impl<P> ParseConfig<P> {
    /// Replaces the prompter deciding on duplicated difficulty names.
    #[must_use]
    pub fn prompter<Q: Prompter>(self, prompter: Q) -> ParseConfig<Q> {
        ParseConfig { prompter }
    }
}

/// Output of parsing the `.osu` entries of a set.
#[derive(Debug, Default, Clone, PartialEq)]
#[must_use]
pub struct BeatmapSetOutput {
    /// The assembled set.
    pub set: BeatmapSet,
    /// Warnings of each entry, keyed by the entry name.
    pub warnings: BTreeMap<String, Vec<OsuWarning>>,
    /// Warnings raised while inserting the beatmaps into the set.
    pub set_warnings: Vec<SetWarning>,
}

impl BeatmapSetOutput {
    fn insert(
        &mut self,
        entry: String,
        output: OsuOutput,
        prompter: &impl Prompter,
    ) -> Result<(), DuplicateDifficultyError> {
        let OsuOutput { beatmap, warnings } = output;
        let set_warnings = self.set.insert(beatmap, prompter)?;
        self.set_warnings.extend(set_warnings);
        self.warnings.insert(entry, warnings);
        Ok(())
    }
}

/// Parses `(entry name, text)` pairs, such as the `.osu` files of an archive, into one set.
///
/// # Errors
///
/// Returns [`DuplicateDifficultyError`] if two entries share a difficulty name and the prompter
/// of `config` rejects it.
pub fn parse_beatmap_set<P: Prompter>(
    entries: impl IntoIterator<Item = (impl AsRef<str>, impl AsRef<str>)>,
    config: ParseConfig<P>,
) -> Result<BeatmapSetOutput, DuplicateDifficultyError> {
    let mut output = BeatmapSetOutput::default();
    for (name, text) in entries {
        let parsed = parse_beatmap(text.as_ref());
        output.insert(name.as_ref().to_owned(), parsed, &config.prompter)?;
    }
    log::debug!("parsed a set of {} difficulties", output.set.len());
    Ok(output)
}

/// Parses the entries like [`parse_beatmap_set`], each on the rayon thread pool.
///
/// The beatmaps are inserted into the set on the calling thread in the order of `entries`.
///
/// # Errors
///
/// Returns [`DuplicateDifficultyError`] if two entries share a difficulty name and the prompter
/// of `config` rejects it.
#[cfg(feature = "rayon")]
#[cfg_attr(docsrs, doc(cfg(feature = "rayon")))]
pub fn parse_beatmap_set_par<N, T, P>(
    entries: impl rayon::iter::IntoParallelIterator<Item = (N, T)>,
    config: ParseConfig<P>,
) -> Result<BeatmapSetOutput, DuplicateDifficultyError>
where
    N: AsRef<str> + Send,
    T: AsRef<str> + Send,
    P: Prompter,
{
    use rayon::iter::ParallelIterator;

    let parsed: Vec<(String, OsuOutput)> = entries
        .into_par_iter()
        .map(|(name, text)| (name.as_ref().to_owned(), parse_beatmap(text.as_ref())))
        .collect();
    let mut output = BeatmapSetOutput::default();
    for (name, parsed) in parsed {
        output.insert(name, parsed, &config.prompter)?;
    }
    log::debug!("parsed a set of {} difficulties", output.set.len());
    Ok(output)
}

/// Moves every beatmap of `other` into `target`, rejecting any shared difficulty name.
///
/// # Errors
///
/// Returns [`DuplicateDifficultyError`] for a shared name. `target` is unchanged then.
pub fn merge_beatmap_sets(
    target: &mut BeatmapSet,
    other: BeatmapSet,
) -> Result<Vec<SetWarning>, DuplicateDifficultyError> {
    target.merge(other, &AlwaysReject)
}

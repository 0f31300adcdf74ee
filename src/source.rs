//! Reading beatmap sources from the file system and streams.
//!
//! The parser itself only takes text. These helpers read the text, and are the only place where
//! a hard failure other than a rejected duplication can happen.

use std::{
    fs,
    io::Read,
    path::{Path, PathBuf},
};

use thiserror::Error;

use crate::{
    BeatmapSetOutput, OsuOutput, ParseConfig,
    model::{DuplicateDifficultyError, prompt::Prompter},
    parse_beatmap, parse_beatmap_set,
};

/// The extension of beatmap files, compared case-insensitively.
pub const BEATMAP_EXTENSION: &str = "osu";

/// The path shown for sources read from a stream.
const STREAM_PATH: &str = "-";

/// A source could not be read. No partial result is available.
#[derive(Debug, Error)]
#[error("failed to read `{}`", path.display())]
pub struct SourceUnavailableError {
    /// The path of the file or directory, `-` for a stream.
    pub path: PathBuf,
    /// The cause.
    #[source]
    pub source: std::io::Error,
}

impl SourceUnavailableError {
    fn at(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Self { path, source }
    }
}

/// An error occurred when parsing a directory of beatmaps into a set.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum SetSourceError {
    /// The directory or one of its beatmaps could not be read.
    #[error(transparent)]
    Source(#[from] SourceUnavailableError),
    /// Two beatmaps share a difficulty name and the duplication was rejected.
    #[error(transparent)]
    Duplicate(#[from] DuplicateDifficultyError),
}

/// Reads the whole text of the file at `path`.
///
/// # Errors
///
/// Returns [`SourceUnavailableError`] if the file cannot be opened or is not UTF-8.
pub fn read_source(path: impl AsRef<Path>) -> Result<String, SourceUnavailableError> {
    let path = path.as_ref();
    fs::read_to_string(path).map_err(SourceUnavailableError::at(path))
}

/// Reads the whole text of `reader`.
///
/// # Errors
///
/// Returns [`SourceUnavailableError`] if reading fails or the text is not UTF-8.
pub fn read_stream(mut reader: impl Read) -> Result<String, SourceUnavailableError> {
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .map_err(SourceUnavailableError::at(STREAM_PATH))?;
    Ok(text)
}

fn is_beatmap(path: &Path) -> bool {
    path.extension()
        .is_some_and(|extension| extension.eq_ignore_ascii_case(BEATMAP_EXTENSION))
}

/// Reads the `.osu` files directly inside `dir` as `(file name, text)` pairs sorted by file name,
/// the same shape as the entries of an archive.
///
/// # Errors
///
/// Returns [`SourceUnavailableError`] if the directory or one of the files cannot be read.
pub fn read_set_dir(dir: impl AsRef<Path>) -> Result<Vec<(String, String)>, SourceUnavailableError> {
    let dir = dir.as_ref();
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(SourceUnavailableError::at(dir))? {
        let path = entry.map_err(SourceUnavailableError::at(dir))?.path();
        if path.is_file() && is_beatmap(&path) {
            paths.push(path);
        }
    }
    paths.sort();
    log::debug!("reading {} beatmaps from `{}`", paths.len(), dir.display());
    paths
        .into_iter()
        .map(|path| {
            let name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            read_source(&path).map(|text| (name, text))
        })
        .collect()
}

/// Reads and parses the `.osu` file at `path`.
///
/// # Errors
///
/// Returns [`SourceUnavailableError`] if the file cannot be read. Problems in the text are
/// warnings in [`OsuOutput`].
pub fn parse_beatmap_file(path: impl AsRef<Path>) -> Result<OsuOutput, SourceUnavailableError> {
    read_source(path).map(|source| parse_beatmap(&source))
}

/// Reads and parses every `.osu` file in `dir` into one set.
///
/// # Errors
///
/// Returns [`SetSourceError`] if a file cannot be read or a duplicated difficulty is rejected by
/// the prompter of `config`.
pub fn parse_beatmap_set_dir<P: Prompter>(
    dir: impl AsRef<Path>,
    config: ParseConfig<P>,
) -> Result<BeatmapSetOutput, SetSourceError> {
    let entries = read_set_dir(dir)?;
    Ok(parse_beatmap_set(entries, config)?)
}

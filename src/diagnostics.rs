//! Fancy diagnostics support using `ariadne`.
//!
//! This module converts warnings carrying a [`SourceRangeMixin`](crate::mixin::SourceRangeMixin)
//! (such as `ParseWarningWithRange` and the aggregated [`OsuWarning`]) to `ariadne::Report`
//! without modifying the warning type definitions.
//!
//! The byte ranges point at whole lines, and ariadne handles the row/column calculations for
//! display.
//!
//! # Usage Example
//!
//! ```rust
//! # #[cfg(feature = "diagnostics")]
//! # {
//! use osu_rs::{diagnostics::emit_osu_warnings, parse_beatmap};
//!
//! let source = "[General]\nAudioFilename: audio.mp3\nMode: seven\n";
//! let output = parse_beatmap(source);
//!
//! emit_osu_warnings("test.osu", source, &output.warnings);
//! # }
//! ```

#[cfg(feature = "diagnostics")]
use ariadne::{Color, Label, Report, ReportKind, Source};

#[cfg(feature = "diagnostics")]
use crate::{OsuWarning, Severity};

/// Simple source container that holds the filename and source text.
///
/// ```rust
/// use osu_rs::diagnostics::SimpleSource;
///
/// let source_text = "[Metadata]\nTitle: test\n";
/// let source = SimpleSource::new("test.osu", source_text);
/// assert_eq!(source.text(), source_text);
/// ```
pub struct SimpleSource<'a> {
    /// Name of the source file.
    name: &'a str,
    /// Source text content.
    text: &'a str,
}

impl<'a> SimpleSource<'a> {
    /// Create a new source container instance.
    #[must_use]
    pub const fn new(name: &'a str, text: &'a str) -> Self {
        Self { name, text }
    }

    /// Get source text content.
    #[must_use]
    pub const fn text(&self) -> &'a str {
        self.text
    }

    /// Get source file name.
    #[must_use]
    pub const fn name(&self) -> &'a str {
        self.name
    }
}

/// Trait for converting positioned warnings to `ariadne::Report`.
#[cfg(feature = "diagnostics")]
pub trait ToAriadne {
    /// Convert the warning to an ariadne Report, using `src` for the filename.
    fn to_report<'a>(&self, src: &SimpleSource<'a>)
    -> Report<'a, (String, std::ops::Range<usize>)>;
}

#[cfg(feature = "diagnostics")]
impl ToAriadne for OsuWarning {
    fn to_report<'a>(
        &self,
        src: &SimpleSource<'a>,
    ) -> Report<'a, (String, std::ops::Range<usize>)> {
        match self {
            Self::ParseWarning(warning) => warning.to_report(src),
            Self::PlayingWarning(warning) => {
                // Playing warnings concern the whole beatmap, so they point at its start.
                let filename = src.name().to_string();
                Report::build(ReportKind::Warning, (filename.clone(), 0..0))
                    .with_message(format!("playing: {warning}"))
                    .with_label(Label::new((filename, 0..0)).with_color(Color::Yellow))
                    .finish()
            }
        }
    }
}

/// Batch render a list of [`OsuWarning`] to the standard error, skipping those of
/// [`Severity::Low`].
#[cfg(feature = "diagnostics")]
pub fn emit_osu_warnings<'a>(
    name: &'a str,
    source: &'a str,
    warnings: impl IntoIterator<Item = &'a OsuWarning>,
) {
    emit_osu_warnings_with(name, source, warnings, false);
}

/// Batch render a list of [`OsuWarning`], including low severity ones when `verbose`.
#[cfg(feature = "diagnostics")]
pub fn emit_osu_warnings_with<'a>(
    name: &'a str,
    source: &'a str,
    warnings: impl IntoIterator<Item = &'a OsuWarning>,
    verbose: bool,
) {
    let simple = SimpleSource::new(name, source);
    let ariadne_source = Source::from(source);
    for w in warnings {
        if !verbose && w.severity() == Severity::Low {
            continue;
        }
        let report = w.to_report(&simple);
        let _ = report.eprint((name.to_string(), ariadne_source.clone()));
    }
}

/// Collect `ariadne::Report` instances for a list of [`OsuWarning`] without printing.
#[cfg(feature = "diagnostics")]
#[must_use]
pub fn collect_osu_reports<'a>(
    name: &'a str,
    source: &'a str,
    warnings: impl IntoIterator<Item = &'a OsuWarning>,
) -> Vec<Report<'a, (String, std::ops::Range<usize>)>> {
    let simple = SimpleSource::new(name, source);
    warnings.into_iter().map(|w| w.to_report(&simple)).collect()
}

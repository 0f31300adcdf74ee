//! Check for conditions that would make this beatmap unplayable, or heavily affect the playing
//! experience.

use thiserror::Error;

use crate::model::Beatmap;

/// Simplifies the warnings for playing. None of them stops the beatmap from being returned.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlayingWarning {
    /// There is no hit object.
    #[error("There is no hit object.")]
    NoHitObjects,
    /// There is no uninherited timing point, so the default 120 BPM is used.
    #[error("There is no uninherited timing point, so the default 120 BPM is used.")]
    NoUninheritedTimingPoint,
    /// The `AudioFilename` is not specified.
    #[error("The `AudioFilename` is not specified.")]
    AudioFilenameUndefined,
}

impl Beatmap {
    /// Check for playing warnings based on the parsed beatmap.
    #[must_use]
    pub fn check_playing(&self) -> Vec<PlayingWarning> {
        let mut warnings = Vec::new();
        if self.general.audio_filename.is_empty() {
            warnings.push(PlayingWarning::AudioFilenameUndefined);
        }
        if !self.timing_points.has_uninherited() {
            warnings.push(PlayingWarning::NoUninheritedTimingPoint);
        }
        if self.hit_objects.is_empty() {
            warnings.push(PlayingWarning::NoHitObjects);
        }
        warnings
    }
}

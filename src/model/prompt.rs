//! Prompting interface and utilities.
//!
//! An object implementing [`Prompter`] decides what happens when two beatmaps claim the same
//! difficulty name in a [`BeatmapSet`](super::set::BeatmapSet).

use super::Beatmap;

/// An interface to prompt about handling difficulty name conflicts in a beatmap set.
pub trait Prompter {
    /// Determines a [`DuplicationWorkaround`] for the conflict.
    fn handle_duplication(&self, duplication: DifficultyDuplication<'_>) -> DuplicationWorkaround;
}

impl<P: Prompter + ?Sized> Prompter for &P {
    fn handle_duplication(&self, duplication: DifficultyDuplication<'_>) -> DuplicationWorkaround {
        (**self).handle_duplication(duplication)
    }
}

/// Two beatmaps with the same difficulty name.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyDuplication<'a> {
    /// The duplicated difficulty name.
    pub name: &'a str,
    /// The beatmap already in the set.
    pub older: &'a Beatmap,
    /// The incoming beatmap.
    pub newer: &'a Beatmap,
}

/// A choice to handle the duplicated difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum DuplicationWorkaround {
    /// Fail the whole operation, leaving the set untouched.
    Reject,
    /// Keep the existing beatmap and drop the incoming one.
    UseOlder,
    /// Replace the existing beatmap with the incoming one.
    UseNewer,
}

/// The strategy that always rejects. The default of [`ParseConfig`](crate::ParseConfig).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AlwaysReject;

impl Prompter for AlwaysReject {
    fn handle_duplication(&self, _: DifficultyDuplication<'_>) -> DuplicationWorkaround {
        DuplicationWorkaround::Reject
    }
}

/// The strategy that always keeps the existing beatmap.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AlwaysUseOlder;

impl Prompter for AlwaysUseOlder {
    fn handle_duplication(&self, _: DifficultyDuplication<'_>) -> DuplicationWorkaround {
        DuplicationWorkaround::UseOlder
    }
}

/// The strategy that always takes the incoming beatmap.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AlwaysUseNewer;

impl Prompter for AlwaysUseNewer {
    fn handle_duplication(&self, _: DifficultyDuplication<'_>) -> DuplicationWorkaround {
        DuplicationWorkaround::UseNewer
    }
}

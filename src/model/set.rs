//! A set of difficulties sharing one track.

use std::collections::BTreeMap;

use thiserror::Error;

use super::{
    Beatmap, Metadata,
    prompt::{DifficultyDuplication, DuplicationWorkaround, Prompter},
};

/// Two beatmaps claim the same difficulty name and the [`Prompter`] rejected it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
#[error("difficulty `{name}` already exists in the set")]
pub struct DuplicateDifficultyError {
    /// The duplicated difficulty name.
    pub name: String,
}

/// A metadata field compared between a set and its incoming beatmaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MetadataField {
    /// `Title`.
    Title,
    /// `Artist`.
    Artist,
    /// `Creator`.
    Creator,
    /// `Source`.
    Source,
    /// `BeatmapSetID`.
    BeatmapSetId,
}

impl MetadataField {
    const ALL: [Self; 5] = [
        Self::Title,
        Self::Artist,
        Self::Creator,
        Self::Source,
        Self::BeatmapSetId,
    ];

    fn read(self, metadata: &Metadata) -> String {
        match self {
            Self::Title => metadata.title.clone(),
            Self::Artist => metadata.artist.clone(),
            Self::Creator => metadata.creator.clone(),
            Self::Source => metadata.source.clone(),
            Self::BeatmapSetId => metadata
                .beatmap_set_id
                .map(|id| id.to_string())
                .unwrap_or_default(),
        }
    }
}

impl std::fmt::Display for MetadataField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Title => "Title",
            Self::Artist => "Artist",
            Self::Creator => "Creator",
            Self::Source => "Source",
            Self::BeatmapSetId => "BeatmapSetID",
        })
    }
}

/// A non-fatal finding on inserting into or merging a set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
#[non_exhaustive]
pub enum SetWarning {
    /// A shared metadata field of the incoming beatmap differs from the set's.
    #[error("{field} of `{difficulty}` is `{found}`, but the set has `{expected}`")]
    MetadataMismatch {
        /// The difficulty name of the incoming beatmap.
        difficulty: String,
        /// The differing field.
        field: MetadataField,
        /// The value in the set.
        expected: String,
        /// The value in the incoming beatmap.
        found: String,
    },
    /// A duplicated difficulty was resolved by keeping one of the beatmaps.
    #[error("duplicated difficulty `{name}` resolved by {workaround:?}")]
    DuplicateResolved {
        /// The duplicated difficulty name.
        name: String,
        /// The chosen workaround.
        workaround: DuplicationWorkaround,
    },
}

/// Difficulties of one track keyed by their unique difficulty names, with the shared metadata.
///
/// The metadata comes from the first beatmap inserted. An empty set is valid.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BeatmapSet {
    /// The shared metadata.
    pub metadata: Metadata,
    beatmaps: BTreeMap<String, Beatmap>,
}

impl BeatmapSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a beatmap under its difficulty name.
    ///
    /// # Errors
    ///
    /// Returns [`DuplicateDifficultyError`] if the name is taken and `prompter` rejects the
    /// duplication. The set is unchanged then.
    pub fn insert(
        &mut self,
        beatmap: Beatmap,
        prompter: &impl Prompter,
    ) -> Result<Vec<SetWarning>, DuplicateDifficultyError> {
        let name = beatmap.difficulty_name().to_owned();
        let workaround = self.beatmaps.get(&name).map(|older| {
            prompter.handle_duplication(DifficultyDuplication {
                name: &name,
                older,
                newer: &beatmap,
            })
        });
        if workaround.is_none() && self.beatmaps.is_empty() {
            self.metadata = beatmap.metadata.clone();
        }
        let mut warnings = Vec::new();
        self.accept(name, beatmap, workaround, &mut warnings)?;
        Ok(warnings)
    }

    /// Moves every beatmap of `other` into this set.
    ///
    /// All duplications are decided by `prompter` before the set is touched, so a rejection
    /// leaves it unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`DuplicateDifficultyError`] for the first duplicated name `prompter` rejects.
    pub fn merge(
        &mut self,
        other: Self,
        prompter: &impl Prompter,
    ) -> Result<Vec<SetWarning>, DuplicateDifficultyError> {
        let mut decisions = BTreeMap::new();
        for (name, newer) in &other.beatmaps {
            let Some(older) = self.beatmaps.get(name) else {
                continue;
            };
            let workaround = prompter.handle_duplication(DifficultyDuplication {
                name,
                older,
                newer,
            });
            if workaround == DuplicationWorkaround::Reject {
                return Err(DuplicateDifficultyError { name: name.clone() });
            }
            decisions.insert(name.clone(), workaround);
        }

        if self.beatmaps.is_empty() && !other.beatmaps.is_empty() {
            self.metadata = other.metadata;
        }
        let mut warnings = Vec::new();
        for (name, beatmap) in other.beatmaps {
            let workaround = decisions.remove(&name);
            self.accept(name, beatmap, workaround, &mut warnings)?;
        }
        log::debug!(
            "merged into a set of {} difficulties with {} warnings",
            self.beatmaps.len(),
            warnings.len()
        );
        Ok(warnings)
    }

    fn accept(
        &mut self,
        name: String,
        beatmap: Beatmap,
        workaround: Option<DuplicationWorkaround>,
        warnings: &mut Vec<SetWarning>,
    ) -> Result<(), DuplicateDifficultyError> {
        if let Some(workaround) = workaround {
            if workaround == DuplicationWorkaround::Reject {
                return Err(DuplicateDifficultyError { name });
            }
            warnings.push(SetWarning::DuplicateResolved {
                name: name.clone(),
                workaround,
            });
            if workaround == DuplicationWorkaround::UseOlder {
                return Ok(());
            }
        }
        warnings.extend(self.compare_metadata(&beatmap));
        self.beatmaps.insert(name, beatmap);
        Ok(())
    }

    fn compare_metadata(&self, beatmap: &Beatmap) -> Vec<SetWarning> {
        MetadataField::ALL
            .into_iter()
            .filter_map(|field| {
                let expected = field.read(&self.metadata);
                let found = field.read(&beatmap.metadata);
                (expected != found).then(|| {
                    log::warn!(
                        "{field} of difficulty `{}` is `{found}`, but the set has `{expected}`",
                        beatmap.difficulty_name()
                    );
                    SetWarning::MetadataMismatch {
                        difficulty: beatmap.difficulty_name().to_owned(),
                        field,
                        expected,
                        found,
                    }
                })
            })
            .collect()
    }

    /// Gets the beatmap of the difficulty `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Beatmap> {
        self.beatmaps.get(name)
    }

    /// Whether the difficulty `name` is in the set.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.beatmaps.contains_key(name)
    }

    /// Iterates the difficulty names in order.
    pub fn difficulty_names(&self) -> impl Iterator<Item = &str> {
        self.beatmaps.keys().map(String::as_str)
    }

    /// Iterates the beatmaps ordered by difficulty name.
    pub fn beatmaps(&self) -> impl Iterator<Item = &Beatmap> {
        self.beatmaps.values()
    }

    /// Removes the difficulty `name` from the set.
    pub fn remove(&mut self, name: &str) -> Option<Beatmap> {
        self.beatmaps.remove(name)
    }

    /// Takes the beatmaps keyed by their difficulty names.
    #[must_use]
    pub fn into_beatmaps(self) -> BTreeMap<String, Beatmap> {
        self.beatmaps
    }

    /// The number of difficulties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.beatmaps.len()
    }

    /// Whether the set has no difficulty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.beatmaps.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::prompt::{AlwaysReject, AlwaysUseNewer, AlwaysUseOlder};

    fn beatmap(title: &str, version: &str) -> Beatmap {
        let mut beatmap = Beatmap::default();
        beatmap.metadata.title = title.into();
        beatmap.metadata.version = version.into();
        beatmap
    }

    fn set(beatmaps: impl IntoIterator<Item = Beatmap>) -> BeatmapSet {
        let mut set = BeatmapSet::new();
        for beatmap in beatmaps {
            set.insert(beatmap, &AlwaysReject).unwrap();
        }
        set
    }

    #[test]
    fn first_insert_seeds_metadata() {
        let mut set = BeatmapSet::new();
        assert!(set.is_empty());
        let warnings = set.insert(beatmap("Example", "Hard"), &AlwaysReject).unwrap();
        assert!(warnings.is_empty());
        assert_eq!(set.metadata.title, "Example");

        let warnings = set.insert(beatmap("Other", "Easy"), &AlwaysReject).unwrap();
        assert_eq!(
            warnings,
            [SetWarning::MetadataMismatch {
                difficulty: "Easy".into(),
                field: MetadataField::Title,
                expected: "Example".into(),
                found: "Other".into(),
            }]
        );
        assert_eq!(set.metadata.title, "Example");
        assert_eq!(set.difficulty_names().collect::<Vec<_>>(), ["Easy", "Hard"]);
    }

    #[test]
    fn insert_duplicate() {
        let mut set = set([beatmap("Example", "Hard")]);
        let mut newer = beatmap("Example", "Hard");
        newer.general.audio_filename = "new.mp3".into();

        assert_eq!(
            set.insert(newer.clone(), &AlwaysReject),
            Err(DuplicateDifficultyError {
                name: "Hard".into()
            })
        );
        set.insert(newer.clone(), &AlwaysUseOlder).unwrap();
        assert_eq!(set.get("Hard").unwrap().general.audio_filename, "");
        set.insert(newer, &AlwaysUseNewer).unwrap();
        assert_eq!(set.get("Hard").unwrap().general.audio_filename, "new.mp3");
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn merge_disjoint_is_union() {
        let mut target = set([beatmap("Example", "Easy"), beatmap("Example", "Normal")]);
        let other = set([beatmap("Example", "Hard")]);
        let warnings = target.merge(other, &AlwaysReject).unwrap();
        assert!(warnings.is_empty());
        assert_eq!(
            target.difficulty_names().collect::<Vec<_>>(),
            ["Easy", "Hard", "Normal"]
        );
    }

    #[test]
    fn merge_rejection_is_atomic() {
        let mut target = set([beatmap("Example", "Easy")]);
        let before = target.clone();
        let other = set([beatmap("Example", "Another"), beatmap("Example", "Easy")]);
        assert_eq!(
            target.merge(other, &AlwaysReject),
            Err(DuplicateDifficultyError {
                name: "Easy".into()
            })
        );
        assert_eq!(target, before);
    }

    #[test]
    fn merge_into_empty_takes_metadata() {
        let mut target = BeatmapSet::new();
        target
            .merge(set([beatmap("Example", "Easy")]), &AlwaysReject)
            .unwrap();
        assert_eq!(target.metadata.title, "Example");
        assert!(target.contains("Easy"));
    }
}

//! Immutable tables from the keys of the key/value sections to typed setters on [`Beatmap`].
//!
//! Each table is built once on first use and shared read-only by every parse.

use std::{collections::HashMap, str::FromStr};

use once_cell::sync::Lazy;

use crate::{
    model::Beatmap,
    value::{Mode, parse_integer, sample::SampleSet},
};

/// Converts a value and stores it, or returns the description of the expected value.
pub(crate) type Setter = Box<dyn Fn(&mut Beatmap, &str) -> Result<(), &'static str> + Send + Sync>;

/// The recognized keys of one section.
pub(crate) struct KeyTable {
    section: &'static str,
    setters: HashMap<&'static str, Setter>,
}

impl KeyTable {
    fn new(section: &'static str, entries: Vec<(&'static str, Setter)>) -> Self {
        let mut setters = HashMap::with_capacity(entries.len());
        for (key, setter) in entries {
            let previous = setters.insert(key, setter);
            debug_assert!(previous.is_none(), "duplicate key `{key}` in [{section}]");
        }
        Self { section, setters }
    }

    /// The name of the section the keys belong to.
    pub(crate) const fn section(&self) -> &'static str {
        self.section
    }

    pub(crate) fn get(&self, key: &str) -> Option<&Setter> {
        self.setters.get(key)
    }

    #[cfg(test)]
    pub(crate) fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.setters.keys().copied()
    }
}

fn text(field: fn(&mut Beatmap) -> &mut String) -> Setter {
    custom(move |beatmap, value| {
        *field(beatmap) = value.to_owned();
        Ok(())
    })
}

fn optional_text(field: fn(&mut Beatmap) -> &mut Option<String>) -> Setter {
    custom(move |beatmap, value| {
        *field(beatmap) = (!value.is_empty()).then(|| value.to_owned());
        Ok(())
    })
}

fn integer<T: num::NumCast + 'static>(
    expected: &'static str,
    field: fn(&mut Beatmap) -> &mut T,
) -> Setter {
    custom(move |beatmap, value| {
        *field(beatmap) = parse_integer(value).ok_or(expected)?;
        Ok(())
    })
}

fn optional_integer(field: fn(&mut Beatmap) -> &mut Option<i32>) -> Setter {
    custom(move |beatmap, value| {
        *field(beatmap) = Some(parse_integer(value).ok_or("integer")?);
        Ok(())
    })
}

fn float(field: fn(&mut Beatmap) -> &mut f64) -> Setter {
    custom(move |beatmap, value| {
        let parsed = f64::from_str(value)
            .ok()
            .filter(|float| float.is_finite())
            .ok_or("number")?;
        *field(beatmap) = parsed;
        Ok(())
    })
}

/// Integer flags, any non-zero value is true.
fn boolean(field: fn(&mut Beatmap) -> &mut bool) -> Setter {
    custom(move |beatmap, value| {
        *field(beatmap) = parse_integer::<i64>(value).ok_or("integer flag")? != 0;
        Ok(())
    })
}

fn custom(
    setter: impl Fn(&mut Beatmap, &str) -> Result<(), &'static str> + Send + Sync + 'static,
) -> Setter {
    Box::new(setter)
}

/// Keys recognized only to be dropped, such as deprecated or storyboard-only settings.
fn ignored() -> Setter {
    custom(|_, _| Ok(()))
}

pub(crate) static GENERAL: Lazy<KeyTable> = Lazy::new(|| {
    KeyTable::new(
        "General",
        vec![
            ("AudioFilename", text(|b| &mut b.general.audio_filename)),
            (
                "AudioLeadIn",
                integer("integer", |b| &mut b.general.audio_lead_in),
            ),
            ("AudioHash", ignored()),
            (
                "PreviewTime",
                integer("integer", |b| &mut b.metadata.preview_time),
            ),
            ("Countdown", boolean(|b| &mut b.general.countdown)),
            (
                "CountdownOffset",
                integer("integer", |b| &mut b.general.countdown_offset),
            ),
            (
                "SampleSet",
                custom(|beatmap, value| {
                    beatmap.general.sample_set = SampleSet::from_str(value)
                        .map_err(|_| "sample set Auto, None, Normal, Soft or Drum")?;
                    Ok(())
                }),
            ),
            ("StackLeniency", float(|b| &mut b.general.stack_leniency)),
            (
                "Mode",
                custom(|beatmap, value| {
                    beatmap.general.mode = parse_integer::<u8>(value)
                        .and_then(|code| Mode::try_from(code).ok())
                        .ok_or("mode 0 to 3")?;
                    Ok(())
                }),
            ),
            (
                "LetterboxInBreaks",
                boolean(|b| &mut b.general.letterbox_in_breaks),
            ),
            ("StoryFireInFront", ignored()),
            ("UseSkinSprites", ignored()),
            ("AlwaysShowPlayfield", ignored()),
            ("OverlayPosition", ignored()),
            (
                "SkinPreference",
                optional_text(|b| &mut b.general.skin_preference),
            ),
            (
                "EpilepsyWarning",
                boolean(|b| &mut b.general.epilepsy_warning),
            ),
            ("CountdownSkipBeats", ignored()),
            (
                "WidescreenStoryboard",
                boolean(|b| &mut b.general.widescreen_storyboard),
            ),
            ("SpecialStyle", boolean(|b| &mut b.general.special_style)),
            (
                "SamplesMatchPlaybackRate",
                boolean(|b| &mut b.general.samples_match_playback_rate),
            ),
        ],
    )
});

pub(crate) static EDITOR: Lazy<KeyTable> = Lazy::new(|| {
    KeyTable::new(
        "Editor",
        vec![
            (
                "Bookmarks",
                custom(|beatmap, value| {
                    beatmap.editor.bookmarks = value
                        .split(',')
                        .map(str::trim)
                        .filter(|bookmark| !bookmark.is_empty())
                        .map(parse_integer)
                        .collect::<Option<_>>()
                        .ok_or("comma-separated integers")?;
                    Ok(())
                }),
            ),
            ("DistanceSpacing", float(|b| &mut b.editor.distance_spacing)),
            (
                "BeatDivisor",
                integer("positive integer", |b| &mut b.editor.beat_divisor),
            ),
            (
                "GridSize",
                integer("positive integer", |b| &mut b.editor.grid_size),
            ),
            ("TimelineZoom", float(|b| &mut b.editor.timeline_zoom)),
        ],
    )
});

pub(crate) static METADATA: Lazy<KeyTable> = Lazy::new(|| {
    KeyTable::new(
        "Metadata",
        vec![
            ("Title", text(|b| &mut b.metadata.title)),
            ("TitleUnicode", text(|b| &mut b.metadata.title_unicode)),
            ("Artist", text(|b| &mut b.metadata.artist)),
            ("ArtistUnicode", text(|b| &mut b.metadata.artist_unicode)),
            ("Creator", text(|b| &mut b.metadata.creator)),
            ("Version", text(|b| &mut b.metadata.version)),
            ("Source", text(|b| &mut b.metadata.source)),
            (
                "Tags",
                custom(|beatmap, value| {
                    beatmap.metadata.tags = value.split_whitespace().map(str::to_owned).collect();
                    Ok(())
                }),
            ),
            ("BeatmapID", optional_integer(|b| &mut b.metadata.beatmap_id)),
            (
                "BeatmapSetID",
                optional_integer(|b| &mut b.metadata.beatmap_set_id),
            ),
        ],
    )
});

pub(crate) static DIFFICULTY: Lazy<KeyTable> = Lazy::new(|| {
    KeyTable::new(
        "Difficulty",
        vec![
            ("HPDrainRate", float(|b| &mut b.difficulty.hp_drain_rate)),
            ("CircleSize", float(|b| &mut b.difficulty.circle_size)),
            (
                "OverallDifficulty",
                float(|b| &mut b.difficulty.overall_difficulty),
            ),
            ("ApproachRate", float(|b| &mut b.difficulty.approach_rate)),
            (
                "SliderMultiplier",
                float(|b| &mut b.difficulty.slider_multiplier),
            ),
            (
                "SliderTickRate",
                float(|b| &mut b.difficulty.slider_tick_rate),
            ),
        ],
    )
});

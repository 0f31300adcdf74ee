//! The models of a beatmap and a beatmap set.
//!
//! A [`Beatmap`] is one difficulty of a track: the key/value sections, the events, the colours,
//! its [`TimingPoints`] and the ordered hit objects. A [`BeatmapSet`] collects difficulties sharing
//! one audio track under their unique difficulty names.

pub mod prompt;
pub mod set;

pub use self::set::{BeatmapSet, DuplicateDifficultyError, MetadataField, SetWarning};
use crate::{
    geometry::{Vector2, path},
    hit_object::{HitObject, Slider},
    timing::{TimingPoint, TimingPoints},
    value::{Mode, colour::Rgb, sample::SampleSet},
};

/// The `[General]` section.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct General {
    /// `AudioFilename`, relative to the beatmap folder.
    pub audio_filename: String,
    /// `AudioLeadIn`, silence in milliseconds before the audio starts.
    pub audio_lead_in: i32,
    /// `Countdown`, whether a countdown plays before the first object.
    pub countdown: bool,
    /// `CountdownOffset`, beats to shift the countdown by.
    pub countdown_offset: i32,
    /// `SampleSet`, the default bank.
    pub sample_set: SampleSet,
    /// `StackLeniency`, how close objects must be to stack.
    pub stack_leniency: f64,
    /// `Mode`.
    pub mode: Mode,
    /// `LetterboxInBreaks`.
    pub letterbox_in_breaks: bool,
    /// `WidescreenStoryboard`.
    pub widescreen_storyboard: bool,
    /// `EpilepsyWarning`.
    pub epilepsy_warning: bool,
    /// `SpecialStyle`, the N+1 key layout of osu!mania.
    pub special_style: bool,
    /// `SamplesMatchPlaybackRate`.
    pub samples_match_playback_rate: bool,
    /// `SkinPreference`.
    pub skin_preference: Option<String>,
}

impl Default for General {
    fn default() -> Self {
        Self {
            audio_filename: String::new(),
            audio_lead_in: 0,
            countdown: true,
            countdown_offset: 0,
            sample_set: SampleSet::Normal,
            stack_leniency: 0.7,
            mode: Mode::Standard,
            letterbox_in_breaks: false,
            widescreen_storyboard: false,
            epilepsy_warning: false,
            special_style: false,
            samples_match_playback_rate: false,
            skin_preference: None,
        }
    }
}

/// The `[Editor]` section.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Editor {
    /// `Bookmarks`, times in milliseconds.
    pub bookmarks: Vec<i32>,
    /// `DistanceSpacing`.
    pub distance_spacing: f64,
    /// `BeatDivisor`.
    pub beat_divisor: u32,
    /// `GridSize`.
    pub grid_size: u32,
    /// `TimelineZoom`.
    pub timeline_zoom: f64,
}

impl Default for Editor {
    fn default() -> Self {
        Self {
            bookmarks: Vec::new(),
            distance_spacing: 1.0,
            beat_divisor: 4,
            grid_size: 4,
            timeline_zoom: 1.0,
        }
    }
}

/// The `[Metadata]` section, plus the preview time of `[General]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Metadata {
    /// `Title`, romanised.
    pub title: String,
    /// `TitleUnicode`.
    pub title_unicode: String,
    /// `Artist`, romanised.
    pub artist: String,
    /// `ArtistUnicode`.
    pub artist_unicode: String,
    /// `Creator`, the mapper.
    pub creator: String,
    /// `Version`, the difficulty name.
    pub version: String,
    /// `Source`, the media the song comes from.
    pub source: String,
    /// `Tags`, separated by spaces.
    pub tags: Vec<String>,
    /// `BeatmapID`.
    pub beatmap_id: Option<i32>,
    /// `BeatmapSetID`.
    pub beatmap_set_id: Option<i32>,
    /// `PreviewTime` of `[General]` in milliseconds, -1 for none.
    pub preview_time: i32,
}

impl Default for Metadata {
    fn default() -> Self {
        Self {
            title: String::new(),
            title_unicode: String::new(),
            artist: String::new(),
            artist_unicode: String::new(),
            creator: String::new(),
            version: String::new(),
            source: String::new(),
            tags: Vec::new(),
            beatmap_id: None,
            beatmap_set_id: None,
            preview_time: -1,
        }
    }
}

/// The `[Difficulty]` section. Values are not range checked.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Difficulty {
    /// `HPDrainRate`.
    pub hp_drain_rate: f64,
    /// `CircleSize`.
    pub circle_size: f64,
    /// `OverallDifficulty`.
    pub overall_difficulty: f64,
    /// `ApproachRate`.
    pub approach_rate: f64,
    /// `SliderMultiplier`, hundreds of osu!pixels per beat at a slider velocity of 1.
    pub slider_multiplier: f64,
    /// `SliderTickRate`, ticks per beat.
    pub slider_tick_rate: f64,
}

impl Default for Difficulty {
    fn default() -> Self {
        Self {
            hp_drain_rate: 5.0,
            circle_size: 5.0,
            overall_difficulty: 5.0,
            approach_rate: 5.0,
            slider_multiplier: 1.4,
            slider_tick_rate: 1.0,
        }
    }
}

/// A background image event.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Background {
    /// Image file name, relative to the beatmap folder.
    pub filename: String,
    /// Offset from the centre of the screen in osu!pixels.
    pub offset: Vector2<i32>,
}

/// A background video event.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Video {
    /// Start time in milliseconds.
    pub start_time: i32,
    /// Video file name, relative to the beatmap folder.
    pub filename: String,
    /// Offset from the centre of the screen in osu!pixels.
    pub offset: Vector2<i32>,
}

/// A break period, where no object is to be hit.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BreakPeriod {
    /// Start time in milliseconds.
    pub start_time: i32,
    /// End time in milliseconds.
    pub end_time: i32,
}

/// The recognised events of the `[Events]` section. Storyboard commands are not kept.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Events {
    /// The background image.
    pub background: Option<Background>,
    /// The background video.
    pub video: Option<Video>,
    /// Break periods in declaration order.
    pub breaks: Vec<BreakPeriod>,
}

/// The `[Colours]` section: named colour slots in declaration order.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Colours {
    slots: Vec<(String, Rgb)>,
}

impl Colours {
    /// Sets the colour of the slot `name`, keeping the position of an existing slot.
    pub fn set(&mut self, name: impl Into<String>, colour: Rgb) {
        let name = name.into();
        match self.slots.iter_mut().find(|(slot, _)| *slot == name) {
            Some((_, existing)) => *existing = colour,
            None => self.slots.push((name, colour)),
        }
    }

    /// Gets the colour of the slot `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Rgb> {
        self.slots
            .iter()
            .find_map(|(slot, colour)| (slot == name).then_some(*colour))
    }

    /// Combo colours, the `ComboN` slots in declaration order.
    pub fn combo_colours(&self) -> impl Iterator<Item = Rgb> + '_ {
        self.slots
            .iter()
            .filter(|(name, _)| name.starts_with("Combo"))
            .map(|&(_, colour)| colour)
    }

    /// Iterates every slot in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Rgb)> {
        self.slots.iter().map(|(name, colour)| (name.as_str(), *colour))
    }

    /// The number of slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether no slot is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// One difficulty of a track.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Beatmap {
    /// The `N` of the `osu file format vN` line, if present.
    pub format_version: Option<u32>,
    /// The `[General]` section.
    pub general: General,
    /// The `[Editor]` section.
    pub editor: Editor,
    /// The `[Metadata]` section.
    pub metadata: Metadata,
    /// The `[Difficulty]` section.
    pub difficulty: Difficulty,
    /// The `[Events]` section.
    pub events: Events,
    /// The `[Colours]` section.
    pub colours: Colours,
    /// The `[TimingPoints]` section.
    pub timing_points: TimingPoints,
    /// The `[HitObjects]` section, ordered by offset once finished.
    pub hit_objects: Vec<HitObject>,
    #[cfg_attr(feature = "serde", serde(skip))]
    needs_rebind: bool,
}

impl Beatmap {
    /// The difficulty name, the key of the beatmap in a set.
    #[must_use]
    pub fn difficulty_name(&self) -> &str {
        &self.metadata.version
    }

    /// Adds a timing point. Hit objects already pushed are rebound on [`Self::finish`].
    pub fn push_timing_point(&mut self, point: TimingPoint) -> usize {
        self.needs_rebind |= !self.hit_objects.is_empty();
        self.timing_points.push(point)
    }

    /// Adds a hit object in declaration order.
    pub fn push_hit_object(&mut self, hit_object: HitObject) {
        self.hit_objects.push(hit_object);
    }

    /// Orders the hit objects by offset, keeping declaration order on ties, and rebinds them to
    /// their timing points if any point was added after them.
    pub fn finish(&mut self) {
        if std::mem::take(&mut self.needs_rebind) {
            for hit_object in &mut self.hit_objects {
                hit_object.common_mut().bind(&self.timing_points);
            }
        }
        self.hit_objects.sort_by_key(HitObject::offset);
    }

    /// Beat duration in milliseconds at `offset`.
    #[must_use]
    pub fn beat_duration_at(&self, offset: i32) -> f64 {
        self.timing_points.beat_duration_at(offset)
    }

    /// Slider velocity multiplier at `offset`.
    #[must_use]
    pub fn slider_velocity_at(&self, offset: i32) -> f64 {
        self.timing_points.slider_velocity_at(offset)
    }

    /// Duration of all slides of `slider` in milliseconds.
    ///
    /// A slider without a written length uses the length of its approximated path. A slider
    /// which never moves, such as under a slider multiplier of 0, takes no time.
    #[must_use]
    pub fn slider_duration(&self, slider: &Slider) -> f64 {
        let offset = slider.common.offset;
        let length = slider
            .length
            .unwrap_or_else(|| path::path_length(&slider.path()));
        let pixels_per_beat =
            100.0 * self.difficulty.slider_multiplier * self.slider_velocity_at(offset);
        if !pixels_per_beat.is_finite() || pixels_per_beat <= 0.0 {
            return 0.0;
        }
        let duration =
            length / pixels_per_beat * self.beat_duration_at(offset) * f64::from(slider.slides);
        if duration.is_finite() { duration.max(0.0) } else { 0.0 }
    }

    /// End time of `hit_object` in milliseconds.
    #[must_use]
    pub fn end_offset(&self, hit_object: &HitObject) -> i32 {
        match hit_object {
            HitObject::Slider(slider) => {
                // The cast saturates, so only the sum can overflow.
                slider
                    .common
                    .offset
                    .saturating_add(self.slider_duration(slider).round() as i32)
            }
            other => other.fixed_end_offset().unwrap_or_else(|| other.offset()),
        }
    }
}

//! The timing structure of a beatmap.
//!
//! An [`UninheritedTimingPoint`] defines the beat duration and meter of the region starting at its
//! offset. An [`InheritedTimingPoint`] changes slider velocity, sample settings and kiai time inside
//! such a region, and refers back to the uninherited point governing it by [`TimingParent`].
//!
//! [`TimingPoints`] keeps every point ordered by offset (ties keep declaration order) and resolves
//! those references as points are pushed: the parent of an inherited point is always the
//! uninherited point with the greatest offset not exceeding its own, the latest declared one on a
//! tie. When no such point exists, the parent is the implicit root of the collection.

pub mod placement;

use std::str::FromStr;

use thiserror::Error;

pub use self::placement::{Placement, SNAP_DIVISORS, SNAP_LENIENCY};
use crate::value::{
    parse_integer,
    sample::{SampleSet, UnknownSampleSet},
};

/// Attributes shared by both kinds of timing points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimingPointCommon {
    /// Start time of the point in milliseconds.
    pub offset: i32,
    /// Default sample bank for hit objects.
    pub sample_set: SampleSet,
    /// Custom sample index, 0 means the default samples.
    pub sample_index: u32,
    /// Volume percentage from 0 to 100.
    pub volume: u8,
    /// Whether kiai time is active.
    pub kiai: bool,
    /// Whether the first barline of the region is hidden. Only meaningful on uninherited points.
    pub omit_first_barline: bool,
}

impl Default for TimingPointCommon {
    fn default() -> Self {
        Self {
            offset: 0,
            sample_set: SampleSet::Auto,
            sample_index: 0,
            volume: 100,
            kiai: false,
            omit_first_barline: false,
        }
    }
}

/// A timing point defining the beat duration and meter from its offset on.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UninheritedTimingPoint {
    /// Shared attributes.
    pub common: TimingPointCommon,
    /// Duration of a beat in milliseconds.
    pub beat_duration: f64,
    /// Beats in a measure.
    pub meter: u32,
}

impl Default for UninheritedTimingPoint {
    /// The root used when no uninherited point precedes an offset: at 0, 120 BPM, 4/4.
    fn default() -> Self {
        Self {
            common: TimingPointCommon::default(),
            beat_duration: 500.0,
            meter: 4,
        }
    }
}

impl UninheritedTimingPoint {
    /// Beats per minute.
    #[must_use]
    pub fn bpm(&self) -> f64 {
        60_000.0 / self.beat_duration
    }

    /// Duration of a measure in milliseconds.
    #[must_use]
    pub fn measure_duration(&self) -> f64 {
        self.beat_duration * f64::from(self.meter)
    }

    /// Rhythmic placement of `offset` in the region of this point.
    #[must_use]
    pub fn placement(&self, offset: i32) -> Placement {
        Placement::locate(self, offset)
    }
}

/// A reference from an inherited point or a hit object to its governing uninherited point.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TimingParent {
    /// The uninherited point at this index of [`TimingPoints`].
    Declared(usize),
    /// The implicit root of [`TimingPoints`], when no declared point precedes.
    #[default]
    Implicit,
}

/// A timing point changing slider velocity and sample settings inside a region.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InheritedTimingPoint {
    /// Shared attributes.
    pub common: TimingPointCommon,
    /// The meter field as written.
    pub measure: u32,
    /// The raw negative beat length, an inverse slider velocity percentage.
    pub beat_duration: f64,
    division: u32,
    parent: TimingParent,
}

impl InheritedTimingPoint {
    /// Creates a point bound to `parent`, located at `parent_index` or the implicit root.
    ///
    /// The child takes over the sample settings of `parent` and has a slider velocity of 1.
    /// `offset` must not precede the parent.
    #[must_use]
    pub fn create_child(
        parent_index: TimingParent,
        parent: &UninheritedTimingPoint,
        measure: u32,
        offset: i32,
        division: u32,
    ) -> Self {
        debug_assert!(
            offset >= parent.common.offset,
            "inherited point at {offset} precedes its parent at {}",
            parent.common.offset
        );
        Self {
            common: TimingPointCommon {
                offset,
                kiai: false,
                omit_first_barline: false,
                ..parent.common
            },
            measure,
            beat_duration: -100.0,
            division,
            parent: parent_index,
        }
    }

    /// A point not bound to any parent yet. [`TimingPoints::push`] binds it.
    pub(crate) const fn unresolved(
        common: TimingPointCommon,
        measure: u32,
        beat_duration: f64,
    ) -> Self {
        Self {
            common,
            measure,
            beat_duration,
            division: 0,
            parent: TimingParent::Implicit,
        }
    }

    /// The governing uninherited point.
    #[must_use]
    pub const fn parent(&self) -> TimingParent {
        self.parent
    }

    /// The snap divisor of the offset in the rhythm of the parent, 0 if unsnapped.
    #[must_use]
    pub const fn division(&self) -> u32 {
        self.division
    }

    /// Slider velocity multiplier, `-100 / beat_duration` limited to `[0.1, 10]`.
    #[must_use]
    pub fn slider_velocity(&self) -> f64 {
        (-100.0 / self.beat_duration).clamp(0.1, 10.0)
    }

    fn rebind(&mut self, parent_index: TimingParent, parent: &UninheritedTimingPoint) {
        self.parent = parent_index;
        self.division = parent.placement(self.common.offset).division;
    }
}

/// A timing point of either kind.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TimingPoint {
    /// Defines a timing region.
    Uninherited(UninheritedTimingPoint),
    /// Modifies a timing region.
    Inherited(InheritedTimingPoint),
}

impl TimingPoint {
    /// Shared attributes.
    #[must_use]
    pub const fn common(&self) -> &TimingPointCommon {
        match self {
            Self::Uninherited(point) => &point.common,
            Self::Inherited(point) => &point.common,
        }
    }

    /// Start time in milliseconds.
    #[must_use]
    pub const fn offset(&self) -> i32 {
        self.common().offset
    }

    /// Whether this is an uninherited point.
    #[must_use]
    pub const fn is_uninherited(&self) -> bool {
        matches!(self, Self::Uninherited(_))
    }

    /// Gets the uninherited point if it is.
    #[must_use]
    pub const fn as_uninherited(&self) -> Option<&UninheritedTimingPoint> {
        match self {
            Self::Uninherited(point) => Some(point),
            Self::Inherited(_) => None,
        }
    }

    /// Gets the inherited point if it is.
    #[must_use]
    pub const fn as_inherited(&self) -> Option<&InheritedTimingPoint> {
        match self {
            Self::Inherited(point) => Some(point),
            Self::Uninherited(_) => None,
        }
    }
}

/// A timing point line could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
#[non_exhaustive]
pub enum MalformedTimingPoint {
    /// Fewer than the offset and beat length fields.
    #[error("expected at least 2 fields, but found {0}")]
    TooFewFields(usize),
    /// A field is not a number of the expected type.
    #[error("invalid {field} `{value}`")]
    InvalidNumber {
        /// Name of the field.
        field: &'static str,
        /// The text of the field.
        value: String,
    },
    /// The sample set code is unknown.
    #[error(transparent)]
    UnknownSampleSet(#[from] UnknownSampleSet),
}

impl FromStr for TimingPoint {
    type Err = MalformedTimingPoint;

    /// Parses `time,beatLength,meter,sampleSet,sampleIndex,volume,uninherited,effects`.
    ///
    /// Only the first two fields are required. An inherited point is not bound to a parent until
    /// pushed into [`TimingPoints`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields = s
            .trim()
            .trim_end_matches(',')
            .split(',')
            .map(str::trim)
            .collect::<Vec<_>>();
        let [offset, beat_duration, rest @ ..] = fields.as_slice() else {
            return Err(MalformedTimingPoint::TooFewFields(fields.len()));
        };
        let invalid = |field: &'static str, value: &str| MalformedTimingPoint::InvalidNumber {
            field,
            value: value.to_owned(),
        };
        let offset = parse_integer::<i32>(offset).ok_or_else(|| invalid("offset", offset))?;
        let beat_duration = beat_duration
            .parse::<f64>()
            .ok()
            .filter(|beat| beat.is_finite())
            .ok_or_else(|| invalid("beat length", beat_duration))?;

        let mut rest = rest.iter().copied();
        let mut integer = |field: &'static str, default: i64| match rest.next() {
            None | Some("") => Ok(default),
            Some(text) => parse_integer::<i64>(text).ok_or_else(|| invalid(field, text)),
        };
        let meter = integer("meter", 4)?;
        let sample_set = integer("sample set", 0)?;
        let sample_index = integer("sample index", 0)?;
        let volume = integer("volume", 100)?;
        let uninherited = integer("uninherited", i64::from(beat_duration > 0.0))? != 0;
        let effects = integer("effects", 0)?;

        let meter = u32::try_from(meter).map_err(|_| invalid("meter", &meter.to_string()))?;
        let sample_set = u32::try_from(sample_set)
            .map_err(|_| UnknownSampleSet(sample_set.to_string()))
            .and_then(SampleSet::try_from)?;
        let sample_index = u32::try_from(sample_index)
            .map_err(|_| invalid("sample index", &sample_index.to_string()))?;
        let common = TimingPointCommon {
            offset,
            sample_set,
            sample_index,
            volume: volume.clamp(0, 100) as u8,
            kiai: effects & 1 != 0,
            omit_first_barline: effects & 8 != 0,
        };
        Ok(if uninherited {
            Self::Uninherited(UninheritedTimingPoint {
                common,
                beat_duration,
                meter,
            })
        } else {
            Self::Inherited(InheritedTimingPoint::unresolved(
                common,
                meter,
                beat_duration,
            ))
        })
    }
}

/// The timing points of a beatmap, ordered by offset with ties in declaration order.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimingPoints {
    points: Vec<TimingPoint>,
    implicit: UninheritedTimingPoint,
}

impl TimingPoints {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a point after all points of the same or earlier offset, and binds inherited points
    /// to their parents. Returns the index the point was placed at.
    pub fn push(&mut self, point: TimingPoint) -> usize {
        let offset = point.offset();
        let index = self
            .points
            .partition_point(|existing| existing.offset() <= offset);
        self.points.insert(index, point);
        // Earlier offsets keep both their roots and the indices of them. From the first point
        // sharing the offset on, a new root may govern or indices may have shifted.
        let tail = self
            .points
            .partition_point(|existing| existing.offset() < offset);
        for index in tail..self.points.len() {
            self.resolve(index);
        }
        index
    }

    fn resolve(&mut self, index: usize) {
        let Some(offset) = self.points.get(index).map(TimingPoint::offset) else {
            return;
        };
        let (parent_index, parent) = self.governing_at(offset);
        let parent = *parent;
        if let Some(TimingPoint::Inherited(point)) = self.points.get_mut(index) {
            point.rebind(parent_index, &parent);
        }
    }

    /// Finds the uninherited point governing `offset`: the one with the greatest offset not
    /// exceeding it, or the implicit root.
    #[must_use]
    pub fn governing_at(&self, offset: i32) -> (TimingParent, &UninheritedTimingPoint) {
        let end = self
            .points
            .partition_point(|point| point.offset() <= offset);
        self.points
            .iter()
            .take(end)
            .enumerate()
            .rev()
            .find_map(|(index, point)| {
                point
                    .as_uninherited()
                    .map(|root| (TimingParent::Declared(index), root))
            })
            .unwrap_or((TimingParent::Implicit, &self.implicit))
    }

    /// Resolves a parent reference. A stale reference falls back to the implicit root.
    #[must_use]
    pub fn root(&self, parent: TimingParent) -> &UninheritedTimingPoint {
        match parent {
            TimingParent::Declared(index) => self
                .points
                .get(index)
                .and_then(TimingPoint::as_uninherited)
                .unwrap_or(&self.implicit),
            TimingParent::Implicit => &self.implicit,
        }
    }

    /// The uninherited point an inherited point is bound to.
    #[must_use]
    pub fn parent_of(&self, point: &InheritedTimingPoint) -> &UninheritedTimingPoint {
        self.root(point.parent())
    }

    /// The implicit root: offset 0, 500 ms per beat, 4 beats per measure.
    #[must_use]
    pub const fn implicit(&self) -> &UninheritedTimingPoint {
        &self.implicit
    }

    /// Beat duration in milliseconds at `offset`.
    #[must_use]
    pub fn beat_duration_at(&self, offset: i32) -> f64 {
        self.governing_at(offset).1.beat_duration
    }

    /// Slider velocity multiplier at `offset`. An uninherited point resets it to 1.
    #[must_use]
    pub fn slider_velocity_at(&self, offset: i32) -> f64 {
        let end = self
            .points
            .partition_point(|point| point.offset() <= offset);
        let mut preceding = self.points.iter().take(end).rev();
        let Some(latest) = preceding.next() else {
            return 1.0;
        };
        std::iter::once(latest)
            .chain(preceding.take_while(|point| point.offset() == latest.offset()))
            .find_map(TimingPoint::as_inherited)
            .map_or(1.0, InheritedTimingPoint::slider_velocity)
    }

    /// Rhythmic placement of `offset` under its governing point.
    #[must_use]
    pub fn placement_at(&self, offset: i32) -> Placement {
        self.governing_at(offset).1.placement(offset)
    }

    /// Gets the point at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&TimingPoint> {
        self.points.get(index)
    }

    /// Iterates the points in order.
    pub fn iter(&self) -> std::slice::Iter<'_, TimingPoint> {
        self.points.iter()
    }

    /// Iterates the uninherited points in order.
    pub fn uninherited(&self) -> impl Iterator<Item = &UninheritedTimingPoint> {
        self.points.iter().filter_map(TimingPoint::as_uninherited)
    }

    /// Iterates the inherited points in order.
    pub fn inherited(&self) -> impl Iterator<Item = &InheritedTimingPoint> {
        self.points.iter().filter_map(TimingPoint::as_inherited)
    }

    /// Whether any uninherited point is declared.
    #[must_use]
    pub fn has_uninherited(&self) -> bool {
        self.points.iter().any(TimingPoint::is_uninherited)
    }

    /// The number of declared points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether no point is declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl<'a> IntoIterator for &'a TimingPoints {
    type Item = &'a TimingPoint;
    type IntoIter = std::slice::Iter<'a, TimingPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

impl FromIterator<TimingPoint> for TimingPoints {
    fn from_iter<I: IntoIterator<Item = TimingPoint>>(iter: I) -> Self {
        let mut points = Self::new();
        for point in iter {
            points.push(point);
        }
        points
    }
}

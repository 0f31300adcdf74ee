//! Hit objects, the gameplay elements placed on the playfield over time.
//!
//! Every kind embeds a [`HitObjectCommon`] with its position, offset, sounds and the timing point
//! governing it. Lines of the `[HitObjects]` section are decoded by [`HitObject::from_fields`].

mod parse;

pub use self::parse::MalformedHitObjectError;
use crate::{
    geometry::{Curve, CurveKind, Vector2},
    timing::{Placement, TimingParent, TimingPoints},
    value::sample::{Additions, HitSample, SampleSet},
};

/// Attributes shared by every kind of hit object.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HitObjectCommon {
    /// Position in osu!pixels.
    pub position: Vector2<i32>,
    /// Time in milliseconds the object is to be hit.
    pub offset: i32,
    /// Whether the object starts a new combo.
    pub new_combo: bool,
    /// How many combo colours to skip on a new combo, 0 to 7.
    pub combo_skip: u8,
    /// Hit sound additions.
    pub additions: Additions,
    /// Sample overrides.
    pub sample: HitSample,
    /// The uninherited timing point governing the offset.
    pub timing: TimingParent,
    /// Rhythmic placement of the offset under [`Self::timing`].
    pub placement: Placement,
}

impl HitObjectCommon {
    /// Binds the object to the point governing its offset in `timing_points`.
    pub fn bind(&mut self, timing_points: &TimingPoints) {
        let (parent, root) = timing_points.governing_at(self.offset);
        self.timing = parent;
        self.placement = root.placement(self.offset);
    }
}

/// A single tap.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Circle {
    /// Shared attributes.
    pub common: HitObjectCommon,
}

/// A hit object following a path of control points, possibly back and forth.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Slider {
    /// Shared attributes. The position is the first point of the curve.
    pub common: HitObjectCommon,
    /// The shape of the path.
    pub kind: CurveKind,
    /// Control points, starting with the position of the object. At least 2 points.
    pub curve: Curve<i32>,
    /// How many times the path is travelled, 1 for no repeat.
    pub slides: u32,
    /// Visual length of the path in osu!pixels, if written.
    pub length: Option<f64>,
    /// Additions played on each edge, from the head to the tail.
    pub edge_additions: Vec<Additions>,
    /// Normal and addition banks of each edge.
    pub edge_sets: Vec<(SampleSet, SampleSet)>,
}

impl Slider {
    /// Approximates the path as a polyline cut to the written length.
    #[must_use]
    pub fn path(&self) -> Vec<Vector2<f64>> {
        self.curve.approximate(self.kind, self.length)
    }

    /// The number of edges: the head, every repeat and the tail.
    #[must_use]
    pub const fn edges(&self) -> u32 {
        self.slides.saturating_add(1)
    }
}

/// A hit object spun from its offset until `end_offset`.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Spinner {
    /// Shared attributes.
    pub common: HitObjectCommon,
    /// End time in milliseconds.
    pub end_offset: i32,
}

/// An osu!mania hold note, held from its offset until `end_offset`.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hold {
    /// Shared attributes. The x coordinate selects the column.
    pub common: HitObjectCommon,
    /// End time in milliseconds.
    pub end_offset: i32,
}

/// A hit object of any kind.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HitObject {
    /// A circle, type bit 1.
    Circle(Circle),
    /// A slider, type bit 2.
    Slider(Slider),
    /// A spinner, type bit 8.
    Spinner(Spinner),
    /// A hold note, type bit 128.
    Hold(Hold),
}

impl HitObject {
    /// Shared attributes.
    #[must_use]
    pub const fn common(&self) -> &HitObjectCommon {
        match self {
            Self::Circle(Circle { common })
            | Self::Slider(Slider { common, .. })
            | Self::Spinner(Spinner { common, .. })
            | Self::Hold(Hold { common, .. }) => common,
        }
    }

    /// Shared attributes, mutably.
    pub const fn common_mut(&mut self) -> &mut HitObjectCommon {
        match self {
            Self::Circle(Circle { common })
            | Self::Slider(Slider { common, .. })
            | Self::Spinner(Spinner { common, .. })
            | Self::Hold(Hold { common, .. }) => common,
        }
    }

    /// Start time in milliseconds.
    #[must_use]
    pub const fn offset(&self) -> i32 {
        self.common().offset
    }

    /// Position in osu!pixels.
    #[must_use]
    pub const fn position(&self) -> Vector2<i32> {
        self.common().position
    }

    /// End time when it does not depend on the timing: the offset of a circle, the written end of
    /// spinners and holds. `None` for sliders, see [`Beatmap::end_offset`](crate::model::Beatmap::end_offset).
    #[must_use]
    pub const fn fixed_end_offset(&self) -> Option<i32> {
        match self {
            Self::Circle(circle) => Some(circle.common.offset),
            Self::Slider(_) => None,
            Self::Spinner(Spinner { end_offset, .. }) | Self::Hold(Hold { end_offset, .. }) => {
                Some(*end_offset)
            }
        }
    }

    /// Gets the slider if it is.
    #[must_use]
    pub const fn as_slider(&self) -> Option<&Slider> {
        match self {
            Self::Slider(slider) => Some(slider),
            _ => None,
        }
    }

    /// Name of the kind, for messages.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Circle(_) => "circle",
            Self::Slider(_) => "slider",
            Self::Spinner(_) => "spinner",
            Self::Hold(_) => "hold",
        }
    }
}

//! Prelude module for the crate.
//!
//! You can use `use osu_rs::prelude::*;` to import the commonly used types at once.

#[cfg(feature = "diagnostics")]
pub use crate::diagnostics::{SimpleSource, ToAriadne, emit_osu_warnings};

pub use crate::{
    BeatmapSetOutput, OsuOutput, OsuWarning, ParseConfig, Severity, default_config,
    geometry::{ArithmeticError, Axis, Curve, CurveKind, EmptyCurveError, Vector2},
    hit_object::{
        Circle, HitObject, HitObjectCommon, Hold, MalformedHitObjectError, Slider, Spinner,
    },
    lex::token::{Token, TokenStream, TokenWithRange},
    merge_beatmap_sets,
    mixin::{SourceRangeMixin, SourceRangeMixinExt},
    model::{
        Background, Beatmap, BeatmapSet, BreakPeriod, Colours, Difficulty,
        DuplicateDifficultyError, Editor, Events, General, Metadata, MetadataField, SetWarning,
        Video,
        prompt::{
            AlwaysReject, AlwaysUseNewer, AlwaysUseOlder, DifficultyDuplication,
            DuplicationWorkaround, Prompter,
        },
    },
    parse::{
        NumericConversionError, ParseOutput, ParseWarning, ParseWarningWithRange, Section,
        SectionProcessor, StructuralWarning, check_playing::PlayingWarning,
    },
    parse_beatmap, parse_beatmap_set,
    source::{
        SetSourceError, SourceUnavailableError, parse_beatmap_file, parse_beatmap_set_dir,
        read_set_dir, read_source, read_stream,
    },
    timing::{
        InheritedTimingPoint, MalformedTimingPoint, Placement, TimingParent, TimingPoint,
        TimingPointCommon, TimingPoints, UninheritedTimingPoint,
    },
    value::{
        Mode,
        colour::{Rgb, RgbParseError},
        sample::{Additions, HitSample, InvalidHitSample, SampleSet, UnknownSampleSet},
    },
};

#[cfg(feature = "rayon")]
pub use crate::parse_beatmap_set_par;

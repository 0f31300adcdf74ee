//! Decoding of `[HitObjects]` lines.

use thiserror::Error;

use super::{Circle, HitObject, HitObjectCommon, Hold, Slider, Spinner};
use crate::{
    geometry::{Curve, CurveKind, Vector2},
    timing::TimingPoints,
    value::{
        parse_integer,
        sample::{Additions, HitSample, InvalidHitSample, SampleSet},
    },
};

const CIRCLE: u8 = 1;
const SLIDER: u8 = 1 << 1;
const NEW_COMBO: u8 = 1 << 2;
const SPINNER: u8 = 1 << 3;
const COMBO_SKIP_SHIFT: u8 = 4;
const COMBO_SKIP_MASK: u8 = 0b111;
const HOLD: u8 = 1 << 7;

/// Fields before the type-specific parameters: `x,y,time,type,hitSound`.
const COMMON_FIELDS: usize = 5;

/// A hit object line could not be decoded. The line is skipped.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
#[non_exhaustive]
pub enum MalformedHitObjectError {
    /// The line has fewer fields than its kind requires.
    #[error("expected at least {expected} fields, but found {found}")]
    TooFewFields {
        /// Required fields.
        expected: usize,
        /// Fields on the line.
        found: usize,
    },
    /// The type bits select no known kind.
    #[error("type {0} selects no kind of hit object")]
    InvalidType(u8),
    /// The curve kind letter of a slider is unknown.
    #[error("unknown curve kind `{0}`")]
    InvalidCurveKind(String),
    /// A field is not a number of the expected type.
    #[error("invalid {field} `{value}`")]
    InvalidNumber {
        /// Name of the field.
        field: &'static str,
        /// The text of the field.
        value: String,
    },
    /// A slider has fewer than 2 control points, counting its position.
    #[error("a slider needs at least 2 control points, but found {0}")]
    TooFewControlPoints(usize),
    /// The trailing hit sample is invalid.
    #[error(transparent)]
    InvalidHitSample(#[from] InvalidHitSample),
}

type Result<T> = core::result::Result<T, MalformedHitObjectError>;

fn number<T: num::NumCast>(field: &'static str, text: &str) -> Result<T> {
    parse_integer(text).ok_or_else(|| MalformedHitObjectError::InvalidNumber {
        field,
        value: text.to_owned(),
    })
}

fn sample(text: Option<&&str>) -> Result<HitSample> {
    Ok(text
        .map(|text| text.parse::<HitSample>())
        .transpose()?
        .unwrap_or_default())
}

impl HitObject {
    /// Decodes a line `x,y,time,type,hitSound,objectParams...,hitSample`, binding the object to
    /// the point of `timing_points` governing its time.
    ///
    /// Integer fields also accept float text, truncated toward zero.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedHitObjectError`] if the line has too few fields for its kind, an unknown
    /// type, an invalid number or hit sample, or a slider with fewer than 2 control points.
    pub fn from_fields(line: &str, timing_points: &TimingPoints) -> Result<Self> {
        let fields = line.trim().split(',').map(str::trim).collect::<Vec<_>>();
        let [x, y, time, object_type, hit_sound, params @ ..] = fields.as_slice() else {
            return Err(MalformedHitObjectError::TooFewFields {
                expected: COMMON_FIELDS,
                found: fields.len(),
            });
        };
        let object_type = number::<u8>("type", object_type)?;
        let mut common = HitObjectCommon {
            position: Vector2::new(number("x", x)?, number("y", y)?),
            offset: number("time", time)?,
            new_combo: object_type & NEW_COMBO != 0,
            combo_skip: (object_type >> COMBO_SKIP_SHIFT) & COMBO_SKIP_MASK,
            additions: Additions::parse_bits(hit_sound).map_err(|_| {
                MalformedHitObjectError::InvalidNumber {
                    field: "hit sound",
                    value: (*hit_sound).to_owned(),
                }
            })?,
            ..HitObjectCommon::default()
        };
        common.bind(timing_points);
        let too_few = |expected: usize| MalformedHitObjectError::TooFewFields {
            expected: COMMON_FIELDS + expected,
            found: fields.len(),
        };

        if object_type & CIRCLE != 0 {
            common.sample = sample(params.first())?;
            Ok(Self::Circle(Circle { common }))
        } else if object_type & SLIDER != 0 {
            let [curve, slides, rest @ ..] = params else {
                return Err(too_few(2));
            };
            let (kind, curve) = parse_curve(common.position, curve)?;
            let optional = |index: usize| rest.get(index).copied().filter(|text| !text.is_empty());
            let length = optional(0)
                .map(|text| {
                    text.parse::<f64>()
                        .ok()
                        .filter(|length| length.is_finite())
                        .ok_or_else(|| MalformedHitObjectError::InvalidNumber {
                            field: "length",
                            value: text.to_owned(),
                        })
                })
                .transpose()?
                .filter(|&length| length > 0.0);
            let edge_additions = optional(1)
                .map(parse_edge_additions)
                .transpose()?
                .unwrap_or_default();
            let edge_sets = optional(2)
                .map(parse_edge_sets)
                .transpose()?
                .unwrap_or_default();
            common.sample = sample(rest.get(3))?;
            Ok(Self::Slider(Slider {
                common,
                kind,
                curve,
                slides: number("slides", slides)?,
                length,
                edge_additions,
                edge_sets,
            }))
        } else if object_type & SPINNER != 0 {
            let [end_offset, rest @ ..] = params else {
                return Err(too_few(1));
            };
            common.sample = sample(rest.first())?;
            Ok(Self::Spinner(Spinner {
                common,
                end_offset: number("end time", end_offset)?,
            }))
        } else if object_type & HOLD != 0 {
            let [params, ..] = params else {
                return Err(too_few(1));
            };
            // The end time shares the field with the hit sample: `endTime:hitSample`.
            let (end_offset, hit_sample) = params.split_once(':').unwrap_or((*params, ""));
            common.sample = hit_sample.parse::<HitSample>()?;
            Ok(Self::Hold(Hold {
                common,
                end_offset: number("end time", end_offset)?,
            }))
        } else {
            Err(MalformedHitObjectError::InvalidType(object_type))
        }
    }
}

/// Parses `K|x:y|x:y...`, prepending `start` to the listed points.
fn parse_curve(start: Vector2<i32>, text: &str) -> Result<(CurveKind, Curve<i32>)> {
    let mut parts = text.split('|');
    let letter = parts.next().unwrap_or_default().trim();
    let kind = letter
        .parse::<CurveKind>()
        .map_err(MalformedHitObjectError::InvalidCurveKind)?;
    let mut points = vec![start];
    for point in parts.map(str::trim).filter(|point| !point.is_empty()) {
        let (x, y) = point
            .split_once(':')
            .ok_or_else(|| MalformedHitObjectError::InvalidNumber {
                field: "curve point",
                value: point.to_owned(),
            })?;
        points.push(Vector2::new(
            number("curve point", x)?,
            number("curve point", y)?,
        ));
    }
    if points.len() < 2 {
        return Err(MalformedHitObjectError::TooFewControlPoints(points.len()));
    }
    let curve = Curve::new(points).map_err(|_| MalformedHitObjectError::TooFewControlPoints(0))?;
    Ok((kind, curve))
}

fn parse_edge_additions(text: &str) -> Result<Vec<Additions>> {
    text.split('|')
        .map(|bits| {
            Additions::parse_bits(bits).map_err(|_| MalformedHitObjectError::InvalidNumber {
                field: "edge sounds",
                value: bits.to_owned(),
            })
        })
        .collect()
}

fn parse_edge_sets(text: &str) -> Result<Vec<(SampleSet, SampleSet)>> {
    text.split('|')
        .map(|pair| {
            let invalid = || MalformedHitObjectError::InvalidNumber {
                field: "edge sets",
                value: pair.to_owned(),
            };
            let (normal, addition) = pair.split_once(':').ok_or_else(invalid)?;
            let bank = |code: &str| {
                parse_integer::<u32>(code)
                    .and_then(|code| SampleSet::try_from(code).ok())
                    .ok_or_else(invalid)
            };
            Ok((bank(normal)?, bank(addition)?))
        })
        .collect()
}

//! Rhythmic placement of a time offset under an uninherited timing point.

use super::UninheritedTimingPoint;

/// Beat divisors an offset can snap to, from coarsest to finest.
pub const SNAP_DIVISORS: [u32; 8] = [1, 2, 3, 4, 6, 8, 12, 16];

/// How far in milliseconds an offset may be from a tick and still snap to it.
pub const SNAP_LENIENCY: f64 = 2.0;

/// Where an offset falls in the measures and beats of its governing timing point.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Placement {
    /// Index of the measure since the timing point, negative before it.
    pub measure: i64,
    /// Beat position inside the measure, in `[0, meter)`.
    pub beat: f64,
    /// The coarsest divisor in [`SNAP_DIVISORS`] the offset snaps to, or 0 if unsnapped.
    pub division: u32,
}

impl Placement {
    /// Locates `offset` in the rhythm defined by `root`.
    #[must_use]
    pub fn locate(root: &UninheritedTimingPoint, offset: i32) -> Self {
        let beat_duration = root.beat_duration;
        if !beat_duration.is_finite() || beat_duration <= 0.0 {
            return Self::default();
        }
        let meter = f64::from(root.meter.max(1));
        let elapsed = f64::from(offset) - f64::from(root.common.offset);
        let beats = elapsed / beat_duration;
        let measure = (beats / meter).floor();
        Self {
            measure: measure as i64,
            beat: beats - measure * meter,
            division: snap_division(elapsed, beat_duration),
        }
    }

    /// Whether the offset lies on a tick of some divisor.
    #[must_use]
    pub const fn is_snapped(&self) -> bool {
        self.division != 0
    }
}

fn snap_division(elapsed: f64, beat_duration: f64) -> u32 {
    SNAP_DIVISORS
        .into_iter()
        .find(|&divisor| {
            let tick = beat_duration / f64::from(divisor);
            let nearest = (elapsed / tick).round() * tick;
            (elapsed - nearest).abs() <= SNAP_LENIENCY
        })
        .unwrap_or(0)
}

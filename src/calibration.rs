//! Per-channel range remapping and per-axis differential ratio calibration.

use crate::channel::ChannelRange;

/// Upper end of the canonical scale every channel is remapped onto
pub const CANONICAL_MAX: u16 = 2000;

/// Symmetric bound applied to calibrated phase values
pub const PHASE_LIMIT: f32 = 1.0;

/// Remap a raw sample from `range` onto `0..=CANONICAL_MAX`
///
/// Samples outside `range` saturate at the canonical extremes. A zero-width
/// range acts as a threshold: samples at or below it map to `0`, samples
/// above it to [`CANONICAL_MAX`].
#[must_use]
pub fn remap(raw: u16, range: ChannelRange) -> u16 {
    let span = range.span();
    if span == 0 {
        return if raw <= range.min() { 0 } else { CANONICAL_MAX };
    }

    let offset = u32::from(raw.clamp(range.min(), range.max()) - range.min());
    let scaled = offset * u32::from(CANONICAL_MAX) / u32::from(span);
    // offset <= span, so scaled <= CANONICAL_MAX
    #[allow(clippy::cast_possible_truncation)]
    let scaled = scaled as u16;
    scaled
}

/// Differential ratio `(a - b) / (a + b)` of two remapped samples
///
/// Lies in `[-1, 1]`. When both samples are zero the ratio is undefined and
/// `0.0` is returned instead.
#[must_use]
pub fn ratio(a: u16, b: u16) -> f32 {
    let sum = u32::from(a) + u32::from(b);
    if sum == 0 {
        return 0.0;
    }
    let diff = i32::from(a) - i32::from(b);
    #[allow(clippy::cast_precision_loss)]
    let r = diff as f32 / sum as f32;
    r
}

/// Saturate `value` to `[-PHASE_LIMIT, PHASE_LIMIT]`, mapping NaN to zero
#[must_use]
pub fn bound(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(-PHASE_LIMIT, PHASE_LIMIT)
    }
}

/// Gain and offset applied to one axis ratio
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisCalibration {
    pub gain: f32,
    pub offset: f32,
}

impl AxisCalibration {
    /// Unity gain, zero offset
    pub const IDENTITY: Self = Self {
        gain: 1.0,
        offset: 0.0,
    };

    #[must_use]
    pub const fn new(gain: f32, offset: f32) -> Self {
        Self { gain, offset }
    }

    /// Turn a pair of raw samples into a bounded phase value
    ///
    /// `a` and `b` are remapped through their ranges, differenced, scaled by
    /// the axis gain, shifted by the offset and finally bounded.
    #[must_use]
    pub fn phase(&self, a: u16, a_range: ChannelRange, b: u16, b_range: ChannelRange) -> f32 {
        let r = ratio(remap(a, a_range), remap(b, b_range));
        bound(r * self.gain + self.offset)
    }
}

impl Default for AxisCalibration {
    fn default() -> Self {
        Self::IDENTITY
    }
}

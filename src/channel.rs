//! Sense channel identities, calibration ranges and raw sample sets.

use crate::config::clamp_resolution;

/// One of the four sense pads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum SenseChannel {
    /// A phase of the sin pad pair
    SinA = 0,
    /// B phase of the sin pad pair
    SinB = 1,
    /// A phase of the cos pad pair
    CosA = 2,
    /// B phase of the cos pad pair
    CosB = 3,
}

impl SenseChannel {
    /// Measurement order used by every capture
    pub const ALL: [SenseChannel; 4] = [
        SenseChannel::SinA,
        SenseChannel::SinB,
        SenseChannel::CosA,
        SenseChannel::CosB,
    ];

    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

impl From<SenseChannel> for u8 {
    fn from(channel: SenseChannel) -> u8 {
        channel as u8
    }
}

/// Platform channel identifiers for the four sense pads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensePins<C> {
    pub sin_a: C,
    pub sin_b: C,
    pub cos_a: C,
    pub cos_b: C,
}

impl<C: Copy> SensePins<C> {
    #[must_use]
    pub const fn new(sin_a: C, sin_b: C, cos_a: C, cos_b: C) -> Self {
        Self {
            sin_a,
            sin_b,
            cos_a,
            cos_b,
        }
    }

    /// Platform identifier wired to `channel`
    #[must_use]
    pub const fn get(&self, channel: SenseChannel) -> C {
        match channel {
            SenseChannel::SinA => self.sin_a,
            SenseChannel::SinB => self.sin_b,
            SenseChannel::CosA => self.cos_a,
            SenseChannel::CosB => self.cos_b,
        }
    }
}

/// Raw sample bounds a channel is expected to swing between
///
/// The bounds are always stored ordered, so `min() <= max()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelRange {
    min: u16,
    max: u16,
}

impl ChannelRange {
    /// Create a range from two bounds given in either order
    #[must_use]
    pub const fn new(a: u16, b: u16) -> Self {
        if a <= b {
            Self { min: a, max: b }
        } else {
            Self { min: b, max: a }
        }
    }

    /// Full native range of a sampler with `bits` of resolution
    #[must_use]
    pub const fn native(bits: u8) -> Self {
        Self {
            min: 0,
            max: native_max(bits),
        }
    }

    #[must_use]
    pub const fn min(&self) -> u16 {
        self.min
    }

    #[must_use]
    pub const fn max(&self) -> u16 {
        self.max
    }

    /// Distance between the bounds
    #[must_use]
    pub const fn span(&self) -> u16 {
        self.max - self.min
    }
}

/// Largest sample a sampler with `bits` of resolution can return
///
/// `bits` is clamped to `1..=16`.
#[must_use]
pub const fn native_max(bits: u8) -> u16 {
    let bits = clamp_resolution(bits);
    #[allow(clippy::cast_possible_truncation)]
    let max = ((1u32 << bits) - 1) as u16;
    max
}

/// The four raw samples of one capture
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Samples {
    pub sin_a: u16,
    pub sin_b: u16,
    pub cos_a: u16,
    pub cos_b: u16,
}

impl Samples {
    #[must_use]
    pub const fn new(sin_a: u16, sin_b: u16, cos_a: u16, cos_b: u16) -> Self {
        Self {
            sin_a,
            sin_b,
            cos_a,
            cos_b,
        }
    }

    #[must_use]
    pub const fn get(&self, channel: SenseChannel) -> u16 {
        match channel {
            SenseChannel::SinA => self.sin_a,
            SenseChannel::SinB => self.sin_b,
            SenseChannel::CosA => self.cos_a,
            SenseChannel::CosB => self.cos_b,
        }
    }

    pub(crate) fn from_array(raw: [u16; 4]) -> Self {
        let [sin_a, sin_b, cos_a, cos_b] = raw;
        Self::new(sin_a, sin_b, cos_a, cos_b)
    }
}

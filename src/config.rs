//! Acquisition timing and sampler configuration.

/// Default settle time between asserting the drive and sampling, in µs
pub const DEFAULT_READ_DELAY_US: u32 = 30;

/// Default recovery time between channel measurements, in µs
pub const DEFAULT_MEASURE_DELAY_US: u32 = 150;

/// Default sampler bit-width
pub const DEFAULT_RESOLUTION_BITS: u8 = 12;

/// Acquisition configuration
///
/// `R` is the platform's voltage reference selection; it is handed to the
/// sampler before every capture and never interpreted here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config<R> {
    /// Settle time after asserting the drive, before sampling
    pub read_delay_us: u32,
    /// Recovery time after de-asserting the drive, before the next channel
    pub measure_delay_us: u32,
    /// Sampler voltage reference
    pub reference: R,
    /// Sampler bit-width, `1..=16`
    pub resolution_bits: u8,
    /// Run one discarded excite/sample/recover pass on sinA before measuring
    pub prime_drive: bool,
}

impl<R> Config<R> {
    /// Default timing with the given reference
    pub const fn new(reference: R) -> Self {
        Self {
            read_delay_us: DEFAULT_READ_DELAY_US,
            measure_delay_us: DEFAULT_MEASURE_DELAY_US,
            reference,
            resolution_bits: DEFAULT_RESOLUTION_BITS,
            prime_drive: true,
        }
    }

    /// Settle time after asserting the drive
    #[must_use]
    pub fn with_read_delay_us(mut self, us: u32) -> Self {
        self.read_delay_us = us;
        self
    }

    /// Recovery time between channel measurements
    #[must_use]
    pub fn with_measure_delay_us(mut self, us: u32) -> Self {
        self.measure_delay_us = us;
        self
    }

    /// Sampler bit-width, clamped to `1..=16`
    #[must_use]
    pub fn with_resolution_bits(mut self, bits: u8) -> Self {
        self.resolution_bits = clamp_resolution(bits);
        self
    }

    /// Enable or disable the discarded sinA pass
    #[must_use]
    pub fn with_prime_drive(mut self, prime: bool) -> Self {
        self.prime_drive = prime;
        self
    }
}

impl<R: Default> Default for Config<R> {
    fn default() -> Self {
        Self::new(R::default())
    }
}

pub(crate) const fn clamp_resolution(bits: u8) -> u8 {
    if bits == 0 {
        1
    } else if bits > 16 {
        16
    } else {
        bits
    }
}

//! Blocking driver for a four-pad charge-and-sense capacitive position sensor

use embedded_hal::{delay::DelayNs, digital::OutputPin};

use crate::{
    calibration::AxisCalibration,
    channel::{ChannelRange, SenseChannel, SensePins, Samples},
    config::{Config, clamp_resolution},
    error::Error,
    resolver::{AngleResolver, Direct, resolve_angle},
    sampler::Sampler,
};

/// Capacitive position sensor driver
///
/// Owns the excitation pin, the analog sampler and a delay source for the
/// whole of every [`capture`](Self::capture). Sensors sharing a drive line
/// must be serialised by the caller.
pub struct PositionSensor<P, S: Sampler, D, A = Direct> {
    drive: P,
    sampler: S,
    delay: D,
    pins: SensePins<S::Channel>,
    config: Config<S::Reference>,
    ranges: [Option<ChannelRange>; 4],
    sin_axis: AxisCalibration,
    cos_axis: AxisCalibration,
    resolver: A,
    samples: Samples,
    sin: f32,
    cos: f32,
    angle: f32,
}

impl<P, S, D> PositionSensor<P, S, D, Direct>
where
    P: OutputPin,
    S: Sampler,
    D: DelayNs,
{
    /// Create a sensor resolving angles with a four-quadrant arctangent
    pub fn new(
        drive: P,
        sampler: S,
        delay: D,
        pins: SensePins<S::Channel>,
        config: Config<S::Reference>,
    ) -> Self {
        Self::with_resolver(drive, sampler, delay, pins, config, Direct)
    }
}

impl<P, S, D, A> PositionSensor<P, S, D, A>
where
    P: OutputPin,
    S: Sampler,
    D: DelayNs,
    A: AngleResolver,
{
    /// Create a sensor with an explicit angle resolution policy
    pub fn with_resolver(
        drive: P,
        sampler: S,
        delay: D,
        pins: SensePins<S::Channel>,
        mut config: Config<S::Reference>,
        resolver: A,
    ) -> Self {
        config.resolution_bits = clamp_resolution(config.resolution_bits);
        Self {
            drive,
            sampler,
            delay,
            pins,
            config,
            ranges: [None; 4],
            sin_axis: AxisCalibration::IDENTITY,
            cos_axis: AxisCalibration::IDENTITY,
            resolver,
            samples: Samples::default(),
            sin: 0.0,
            cos: 0.0,
            angle: 0.0,
        }
    }

    /// Release the drive pin, sampler and delay, consuming the driver
    pub fn release(self) -> (P, S, D) {
        (self.drive, self.sampler, self.delay)
    }

    /// Run one full measurement cycle and resolve the angle
    ///
    /// The sampler is configured, then each channel in [`SenseChannel::ALL`]
    /// order is measured as: drive high, wait `read_delay_us`, sample, drive
    /// low, wait `measure_delay_us` (skipped after the last channel). With
    /// `prime_drive` set, one discarded sinA measurement runs first.
    ///
    /// Capture state is only replaced once all four samples are in.
    ///
    /// # Errors
    ///
    /// Returns an error if driving the excitation pin or the sampler fails
    pub fn capture(&mut self) -> Result<(), Error<P::Error, S::Error>> {
        self.sampler
            .set_reference(self.config.reference)
            .map_err(Error::Sampler)?;
        self.sampler
            .set_resolution(self.config.resolution_bits)
            .map_err(Error::Sampler)?;

        if self.config.prime_drive {
            // Priming pass, sample discarded
            self.measure(SenseChannel::SinA)?;
            self.delay.delay_us(self.config.measure_delay_us);
        }

        let mut raw = [0u16; 4];
        for (i, channel) in SenseChannel::ALL.into_iter().enumerate() {
            if i > 0 {
                self.delay.delay_us(self.config.measure_delay_us);
            }
            raw[channel.index()] = self.measure(channel)?;
        }

        self.resolve_samples(Samples::from_array(raw));
        Ok(())
    }

    /// Charge the pads, sample one channel and discharge
    fn measure(&mut self, channel: SenseChannel) -> Result<u16, Error<P::Error, S::Error>> {
        self.drive.set_high().map_err(Error::Drive)?;
        self.delay.delay_us(self.config.read_delay_us);
        let sample = self.sampler.read(self.pins.get(channel));
        // Release the drive even when the conversion failed
        self.drive.set_low().map_err(Error::Drive)?;
        let sample = sample.map_err(Error::Sampler)?;

        #[cfg(feature = "defmt")]
        defmt::trace!("{} sample: {}", channel, sample);

        Ok(sample)
    }

    /// Calibrate `samples` and resolve them into the current angle
    ///
    /// [`capture`](Self::capture) calls this with fresh samples. It is public
    /// so samples acquired some other way go through the same pipeline.
    pub fn resolve_samples(&mut self, samples: Samples) {
        self.samples = samples;
        self.sin = self.sin_axis.phase(
            samples.sin_a,
            self.channel_range(SenseChannel::SinA),
            samples.sin_b,
            self.channel_range(SenseChannel::SinB),
        );
        self.cos = self.cos_axis.phase(
            samples.cos_a,
            self.channel_range(SenseChannel::CosA),
            samples.cos_b,
            self.channel_range(SenseChannel::CosB),
        );

        #[cfg(feature = "defmt")]
        if libm::fabsf(self.sin) >= crate::calibration::PHASE_LIMIT
            || libm::fabsf(self.cos) >= crate::calibration::PHASE_LIMIT
        {
            defmt::warn!("Phase saturated: sin {}, cos {}", self.sin, self.cos);
        }

        self.angle = resolve_angle(&self.resolver, self.sin, self.cos);

        #[cfg(feature = "defmt")]
        defmt::debug!("Resolved angle: {} rad", self.angle);
    }

    /// Set per-axis offsets and gains applied after the differential ratio
    pub fn set_gains_offsets(
        &mut self,
        sin_offset: f32,
        sin_gain: f32,
        cos_offset: f32,
        cos_gain: f32,
    ) {
        self.sin_axis = AxisCalibration::new(sin_gain, sin_offset);
        self.cos_axis = AxisCalibration::new(cos_gain, cos_offset);
    }

    /// Set the raw bounds `channel` swings between
    ///
    /// Bounds may be given in either order.
    pub fn set_channel_range(&mut self, channel: SenseChannel, min: u16, max: u16) {
        self.ranges[channel.index()] = Some(ChannelRange::new(min, max));
    }

    /// Return `channel` to the full native range of the sampler
    pub fn clear_channel_range(&mut self, channel: SenseChannel) {
        self.ranges[channel.index()] = None;
    }

    /// Range `channel` is currently remapped from
    #[must_use]
    pub fn channel_range(&self, channel: SenseChannel) -> ChannelRange {
        self.ranges[channel.index()]
            .unwrap_or_else(|| ChannelRange::native(self.config.resolution_bits))
    }

    /// Set the settle time between asserting the drive and sampling
    pub fn set_read_delay_us(&mut self, us: u32) {
        self.config.read_delay_us = us;
    }

    /// Set the recovery time between channel measurements
    pub fn set_measure_delay_us(&mut self, us: u32) {
        self.config.measure_delay_us = us;
    }

    /// Select the sampler reference used from the next capture on
    pub fn set_reference(&mut self, reference: S::Reference) {
        self.config.reference = reference;
    }

    /// Select the sampler bit-width used from the next capture on
    ///
    /// Clamped to `1..=16`. Channels without an explicit range follow the
    /// new native range.
    pub fn set_resolution_bits(&mut self, bits: u8) {
        self.config.resolution_bits = clamp_resolution(bits);
    }

    /// Enable or disable the discarded sinA pass before each capture
    pub fn set_prime_drive(&mut self, prime: bool) {
        self.config.prime_drive = prime;
    }

    /// Current acquisition configuration
    #[must_use]
    pub fn config(&self) -> &Config<S::Reference> {
        &self.config
    }

    /// Angle from the last capture, in radians within `[-π, π]`
    #[must_use]
    pub fn angle_radians(&self) -> f32 {
        self.angle
    }

    /// Angle from the last capture, in degrees within `[-180, 180]`
    #[must_use]
    pub fn angle_degrees(&self) -> f32 {
        self.angle.to_degrees()
    }

    /// Raw samples from the last capture
    #[must_use]
    pub fn samples(&self) -> Samples {
        self.samples
    }

    /// Raw sample of `channel` from the last capture
    ///
    /// A channel stuck at `0` or at the native maximum usually means a
    /// disconnected or shorted pad.
    #[must_use]
    pub fn raw(&self, channel: SenseChannel) -> u16 {
        self.samples.get(channel)
    }

    /// Calibrated sin phase from the last capture, within `[-1, 1]`
    #[must_use]
    pub fn sin_phase(&self) -> f32 {
        self.sin
    }

    /// Calibrated cos phase from the last capture, within `[-1, 1]`
    #[must_use]
    pub fn cos_phase(&self) -> f32 {
        self.cos
    }
}

//! Analog sampler abstraction supplied by the platform.

/// Blocking analog-to-digital converter shared by the four sense channels
///
/// `embedded-hal` 1.0 carries no ADC trait, so platforms implement this one
/// on top of their HAL. Reference and resolution are re-applied before every
/// capture, so implementations should make both setters idempotent.
pub trait Sampler {
    /// Platform identifier of an analog input
    type Channel: Copy;
    /// Voltage reference selection, passed through untouched
    type Reference: Copy;
    /// Sampler error
    type Error;

    /// Select the voltage reference
    ///
    /// # Errors
    ///
    /// Returns an error if the platform rejects the reference.
    fn set_reference(&mut self, reference: Self::Reference) -> Result<(), Self::Error>;

    /// Select the conversion bit-width
    ///
    /// # Errors
    ///
    /// Returns an error if the platform rejects the resolution.
    fn set_resolution(&mut self, bits: u8) -> Result<(), Self::Error>;

    /// Convert `channel` once, returning a value in `0..=2^bits - 1`
    ///
    /// # Errors
    ///
    /// Returns an error if the conversion fails.
    fn read(&mut self, channel: Self::Channel) -> Result<u16, Self::Error>;
}

impl<T: Sampler + ?Sized> Sampler for &mut T {
    type Channel = T::Channel;
    type Reference = T::Reference;
    type Error = T::Error;

    fn set_reference(&mut self, reference: Self::Reference) -> Result<(), Self::Error> {
        T::set_reference(self, reference)
    }

    fn set_resolution(&mut self, bits: u8) -> Result<(), Self::Error> {
        T::set_resolution(self, bits)
    }

    fn read(&mut self, channel: Self::Channel) -> Result<u16, Self::Error> {
        T::read(self, channel)
    }
}

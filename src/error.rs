/// Error type for capacitive position sensor operations
///
/// Numeric edge cases never surface here; only the platform layer can fail.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<PE, SE> {
    /// Driving the excitation pin failed
    Drive(PE),
    /// Configuring or reading the analog sampler failed
    Sampler(SE),
}

#![cfg_attr(not(test), no_std)]
#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]

mod calibration;
mod channel;
mod config;
mod driver;
mod error;
mod resolver;
mod sampler;

pub use calibration::{AxisCalibration, CANONICAL_MAX, PHASE_LIMIT, bound, ratio, remap};
pub use channel::{ChannelRange, SenseChannel, SensePins, Samples, native_max};
pub use config::{
    Config, DEFAULT_MEASURE_DELAY_US, DEFAULT_READ_DELAY_US, DEFAULT_RESOLUTION_BITS,
};
pub use driver::PositionSensor;
pub use error::Error;
pub use resolver::{AngleResolver, Direct, PiecewiseLinear, Quadrant, resolve_angle};
pub use sampler::Sampler;

use core::fmt;

use crate::filtering::complementary::types::Timestamp;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FusionError {
    /// `current` is earlier than `previous` (or not a finite instant).
    /// The tick is rejected and the engine state is untouched.
    NonMonotonicTimestamp { previous: Timestamp, current: Timestamp },
    /// Reference-axis magnitude is zero (or below epsilon); tilt is undefined.
    DegenerateAcceleration,
    /// Filter weight outside [0, 1] or not finite.
    InvalidWeight,
    /// A gyro rate is NaN or infinite. The tick is rejected like a bad timestamp.
    NonFiniteGyroRate,
}

impl fmt::Display for FusionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FusionError::NonMonotonicTimestamp { previous, current } => write!(
                f,
                "timestamp {} ms precedes previous {} ms",
                current.as_millis(),
                previous.as_millis()
            ),
            FusionError::DegenerateAcceleration => {
                write!(f, "acceleration reference axes have zero magnitude")
            }
            FusionError::InvalidWeight => write!(f, "filter weight must be within [0, 1]"),
            FusionError::NonFiniteGyroRate => write!(f, "gyro rate is not finite"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for FusionError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            FusionError::NonMonotonicTimestamp { previous, current } => defmt::write!(
                fmt,
                "NonMonotonicTimestamp {{ previous: {}, current: {} }}",
                previous.as_millis(),
                current.as_millis()
            ),
            FusionError::DegenerateAcceleration => defmt::write!(fmt, "DegenerateAcceleration"),
            FusionError::InvalidWeight => defmt::write!(fmt, "InvalidWeight"),
            FusionError::NonFiniteGyroRate => defmt::write!(fmt, "NonFiniteGyroRate"),
        }
    }
}

/// Failure of `OrientationEngine::poll`: either the source or the fusion step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TickError<E> {
    Sensor(E),
    Fusion(FusionError),
}

impl<E> From<FusionError> for TickError<E> {
    fn from(err: FusionError) -> Self {
        TickError::Fusion(err)
    }
}

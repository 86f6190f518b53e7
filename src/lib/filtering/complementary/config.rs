// Complementary filter tuning

use crate::filtering::complementary::error::FusionError;

/// Weight of the integrated gyro angle.
pub const W_GYRO: f32 = 0.96;
/// Weight of the accelerometer tilt angle.
pub const W_ACCEL: f32 = 0.04;

// weights must sum to exactly one
const _: () = assert!(W_GYRO + W_ACCEL == 1.0);

/// Reference-axis magnitude (g) at or below which a tilt angle is undefined.
pub const DEGENERATE_ACCEL_EPSILON: f32 = 1e-6;

/// Nominal sampling period the default weights are tuned for.
pub const NOMINAL_PERIOD_MS: u64 = 100;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FilterConfig {
    gyro_weight: f32,
    accel_weight: f32,
}

impl FilterConfig {
    // the accel weight is derived so the pair always sums to one
    pub fn new(gyro_weight: f32) -> Result<Self, FusionError> {
        if !gyro_weight.is_finite() || !(0.0..=1.0).contains(&gyro_weight) {
            return Err(FusionError::InvalidWeight);
        }
        Ok(Self {
            gyro_weight,
            accel_weight: 1.0 - gyro_weight,
        })
    }

    pub fn gyro_weight(&self) -> f32 {
        self.gyro_weight
    }

    pub fn accel_weight(&self) -> f32 {
        self.accel_weight
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            gyro_weight: W_GYRO,
            accel_weight: W_ACCEL,
        }
    }
}

// Gravity-referenced tilt from a single accelerometer reading
//
// roll  = atan2(ay, sqrt(ax^2 + az^2))
// pitch = atan2(-ax, sqrt(ay^2 + az^2))
//
// Only valid while the body is static or under low dynamic acceleration.

use crate::filtering::complementary::config::DEGENERATE_ACCEL_EPSILON;
use crate::filtering::complementary::error::FusionError;
use crate::filtering::complementary::types::{TiltAngles, Vector3};
use core::f32::consts::PI;
use libm::{atan2f, sqrtf};

const RAD_TO_DEG: f32 = 180.0 / PI;

pub struct AccelTiltEstimator;

impl AccelTiltEstimator {
    // roll-axis tilt in degrees, from y against the x/z plane
    pub fn roll(accel: &Vector3) -> Result<f32, FusionError> {
        tilt_axis(accel.y, accel.x, accel.z)
    }

    // pitch-axis tilt in degrees, from -x against the y/z plane
    pub fn pitch(accel: &Vector3) -> Result<f32, FusionError> {
        tilt_axis(-accel.x, accel.y, accel.z)
    }

    pub fn estimate(accel: &Vector3) -> Result<TiltAngles, FusionError> {
        Ok(TiltAngles {
            roll: Self::roll(accel)?,
            pitch: Self::pitch(accel)?,
        })
    }
}

fn tilt_axis(lateral: f32, ref_a: f32, ref_b: f32) -> Result<f32, FusionError> {
    let reference = sqrtf(ref_a * ref_a + ref_b * ref_b);
    // NaN input also lands here
    if !(reference > DEGENERATE_ACCEL_EPSILON) || !lateral.is_finite() {
        return Err(FusionError::DegenerateAcceleration);
    }
    Ok(atan2f(lateral, reference) * RAD_TO_DEG)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < 1e-4,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn level_is_zero_tilt() {
        let tilt = AccelTiltEstimator::estimate(&Vector3::new(0.0, 0.0, 1.0)).unwrap();
        assert_eq!(tilt.roll, 0.0);
        assert_eq!(tilt.pitch, 0.0);
    }

    #[test]
    fn forty_five_degree_roll() {
        let g = core::f32::consts::FRAC_1_SQRT_2;
        let tilt = AccelTiltEstimator::estimate(&Vector3::new(0.0, g, g)).unwrap();
        assert_close(tilt.roll, 45.0);
        assert_close(tilt.pitch, 0.0);
    }

    #[test]
    fn pitch_uses_negated_x() {
        let g = core::f32::consts::FRAC_1_SQRT_2;
        let tilt = AccelTiltEstimator::estimate(&Vector3::new(g, 0.0, g)).unwrap();
        assert_close(tilt.pitch, -45.0);
        assert_close(tilt.roll, 0.0);
    }

    #[test]
    fn upside_down_is_still_level() {
        // atan2 against a positive magnitude keeps the angle in [-90, 90]
        let tilt = AccelTiltEstimator::estimate(&Vector3::new(0.0, 0.0, -1.0)).unwrap();
        assert_eq!(tilt.roll, 0.0);
        assert_eq!(tilt.pitch, 0.0);
    }

    #[test]
    fn zero_reference_axes_are_degenerate() {
        // y lies along gravity: roll reference (x, z) vanishes, pitch is fine
        let accel = Vector3::new(0.0, 1.0, 0.0);
        assert_eq!(
            AccelTiltEstimator::roll(&accel),
            Err(FusionError::DegenerateAcceleration)
        );
        assert_close(AccelTiltEstimator::pitch(&accel).unwrap(), 0.0);
        assert_eq!(
            AccelTiltEstimator::estimate(&accel),
            Err(FusionError::DegenerateAcceleration)
        );

        let free_fall = Vector3::new(0.0, 0.0, 0.0);
        assert_eq!(
            AccelTiltEstimator::roll(&free_fall),
            Err(FusionError::DegenerateAcceleration)
        );
        assert_eq!(
            AccelTiltEstimator::pitch(&free_fall),
            Err(FusionError::DegenerateAcceleration)
        );
    }

    #[test]
    fn magnitude_below_epsilon_is_degenerate() {
        let tiny = Vector3::new(0.0, 0.0, 5e-7);
        assert_eq!(
            AccelTiltEstimator::roll(&tiny),
            Err(FusionError::DegenerateAcceleration)
        );
        assert_eq!(
            AccelTiltEstimator::pitch(&tiny),
            Err(FusionError::DegenerateAcceleration)
        );

        // spread over both reference axes
        let split = Vector3::new(4e-7, 0.0, 4e-7);
        assert_eq!(
            AccelTiltEstimator::roll(&split),
            Err(FusionError::DegenerateAcceleration)
        );
    }

    #[test]
    fn magnitude_above_epsilon_is_valid() {
        let small = Vector3::new(0.0, 0.0, 2e-6);
        let tilt = AccelTiltEstimator::estimate(&small).unwrap();
        assert_eq!(tilt.roll, 0.0);
        assert_eq!(tilt.pitch, 0.0);
    }

    #[test]
    fn non_finite_input_is_degenerate() {
        let accel = Vector3::new(f32::NAN, 0.0, 1.0);
        assert_eq!(
            AccelTiltEstimator::pitch(&accel),
            Err(FusionError::DegenerateAcceleration)
        );
        assert_eq!(
            AccelTiltEstimator::roll(&accel),
            Err(FusionError::DegenerateAcceleration)
        );
    }

    #[test]
    fn repeated_calls_are_bit_identical() {
        let accel = Vector3::new(0.12, -0.34, 0.93);
        let first = AccelTiltEstimator::estimate(&accel).unwrap();
        let second = AccelTiltEstimator::estimate(&accel).unwrap();
        assert_eq!(first.roll.to_bits(), second.roll.to_bits());
        assert_eq!(first.pitch.to_bits(), second.pitch.to_bits());
    }
}

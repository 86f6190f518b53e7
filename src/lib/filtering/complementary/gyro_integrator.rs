// Euler integration of gyro rates into the persistent angle accumulators

use crate::filtering::complementary::types::{FilterState, Vector3};

pub struct GyroIntegrator;

impl GyroIntegrator {
    // gyro in deg/s, elapsed in seconds
    // roll/pitch/yaw accumulate as angle += rate * elapsed
    pub fn integrate(state: &mut FilterState, gyro: &Vector3, elapsed: f32) {
        state.gyro_roll_angle += gyro.x * elapsed;
        state.gyro_pitch_angle += gyro.y * elapsed;
        state.yaw += gyro.z * elapsed;
    }
}

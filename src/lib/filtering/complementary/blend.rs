// Fixed-weight blend of an integrated gyro angle with an accelerometer tilt

use crate::filtering::complementary::config::FilterConfig;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ComplementaryFilter {
    config: FilterConfig,
}

impl ComplementaryFilter {
    pub fn new(config: FilterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> FilterConfig {
        self.config
    }

    // filtered = w_gyro * integrated + w_accel * instantaneous
    pub fn blend(&self, integrated: f32, instantaneous: f32) -> f32 {
        self.config.gyro_weight() * integrated + self.config.accel_weight() * instantaneous
    }

    // no accelerometer reference for this axis this tick
    pub fn gyro_only(&self, integrated: f32) -> f32 {
        integrated
    }
}

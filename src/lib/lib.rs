#![cfg_attr(not(test), no_std)]

#[macro_use]
mod logging;

pub mod drivers {
    pub mod imu {
        pub mod mpu6050;
        pub mod mpu6050_constants;
        pub mod source;
    }
}

pub mod filtering {
    pub mod complementary {
        pub mod accel_tilt;
        pub mod blend;
        pub mod config;
        pub mod engine;
        pub mod error;
        pub mod gyro_integrator;
        pub mod types;

        pub use accel_tilt::AccelTiltEstimator;
        pub use blend::ComplementaryFilter;
        pub use config::{FilterConfig, W_ACCEL, W_GYRO};
        pub use engine::OrientationEngine;
        pub use error::{FusionError, TickError};
        pub use gyro_integrator::GyroIntegrator;
        pub use types::{
            EngineState, FilterState, OrientationEstimate, RawImuSample, TiltAngles, Timestamp,
            Vector3,
        };
    }
    pub mod sma;
}

// Data carried between the tilt estimator, the gyro integrator and the engine

use core::fmt;

/// One sensor triplet (x, y, z).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// One raw IMU reading: linear acceleration in g, angular rate in deg/s.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RawImuSample {
    pub accel: Vector3,
    pub gyro: Vector3,
}

impl RawImuSample {
    pub const fn new(accel: Vector3, gyro: Vector3) -> Self {
        Self { accel, gyro }
    }
}

/// Caller-supplied instant in milliseconds. Must never regress between ticks.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Timestamp(f64);

impl Timestamp {
    pub const fn from_millis(ms: f64) -> Self {
        Self(ms)
    }

    pub const fn as_millis(self) -> f64 {
        self.0
    }

    // seconds between `prev` and `self`
    pub fn elapsed_since(self, prev: Timestamp) -> f32 {
        ((self.0 - prev.0) / 1000.0) as f32
    }
}

/// Instantaneous gravity-referenced tilt, degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TiltAngles {
    pub roll: f32,
    pub pitch: f32,
}

/// Persistent accumulators owned by one `OrientationEngine`.
///
/// All angles in degrees. `gyro_roll_angle`/`gyro_pitch_angle` are gyro-only
/// integrals; they are never pulled back towards the accelerometer.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FilterState {
    pub gyro_roll_angle: f32,
    pub gyro_pitch_angle: f32,
    pub yaw: f32,
    pub last_timestamp: Option<Timestamp>,
}

impl FilterState {
    pub const fn new() -> Self {
        Self {
            gyro_roll_angle: 0.0,
            gyro_pitch_angle: 0.0,
            yaw: 0.0,
            last_timestamp: None,
        }
    }
}

/// Published result of one tick, degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OrientationEstimate {
    pub roll: f32,
    pub pitch: f32,
    pub yaw: f32,
    // true when at least one tilt axis used the gyro-only angle this tick
    pub degraded: bool,
}

impl fmt::Display for OrientationEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Roll: {:.2}, Pitch: {:.2}, Yaw: {:.2}",
            self.roll, self.pitch, self.yaw
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineState {
    // no timestamp seen yet, next step only initializes
    Uninitialized,
    Running,
}

// Per-tick orchestration of tilt estimation, gyro integration and blending
//
// The engine owns the only long-lived state. Each `step` either applies fully
// or is rejected without touching that state.

use crate::drivers::imu::source::RawSampleSource;
use crate::filtering::complementary::accel_tilt::AccelTiltEstimator;
use crate::filtering::complementary::blend::ComplementaryFilter;
use crate::filtering::complementary::config::FilterConfig;
use crate::filtering::complementary::error::{FusionError, TickError};
use crate::filtering::complementary::gyro_integrator::GyroIntegrator;
use crate::filtering::complementary::types::{
    EngineState, FilterState, OrientationEstimate, RawImuSample, Timestamp,
};

pub struct OrientationEngine {
    state: FilterState,
    filter: ComplementaryFilter,
}

impl OrientationEngine {
    pub fn new() -> Self {
        Self::with_config(FilterConfig::default())
    }

    pub fn with_config(config: FilterConfig) -> Self {
        Self {
            state: FilterState::new(),
            filter: ComplementaryFilter::new(config),
        }
    }

    pub fn step(
        &mut self,
        sample: RawImuSample,
        timestamp: Timestamp,
    ) -> Result<OrientationEstimate, FusionError> {
        let elapsed = self.elapsed(timestamp)?;
        let gyro = &sample.gyro;
        if !(gyro.x.is_finite() && gyro.y.is_finite() && gyro.z.is_finite()) {
            log_warn!("rejected non-finite gyro rate at t={} ms", timestamp.as_millis());
            return Err(FusionError::NonFiniteGyroRate);
        }

        let roll_tilt = AccelTiltEstimator::roll(&sample.accel);
        let pitch_tilt = AccelTiltEstimator::pitch(&sample.accel);

        GyroIntegrator::integrate(&mut self.state, &sample.gyro, elapsed);
        if self.state.last_timestamp.is_none() {
            log_info!("orientation engine running at t={} ms", timestamp.as_millis());
        }
        self.state.last_timestamp = Some(timestamp);

        let roll = match roll_tilt {
            Ok(tilt) => self.filter.blend(self.state.gyro_roll_angle, tilt),
            Err(_) => self.filter.gyro_only(self.state.gyro_roll_angle),
        };
        let pitch = match pitch_tilt {
            Ok(tilt) => self.filter.blend(self.state.gyro_pitch_angle, tilt),
            Err(_) => self.filter.gyro_only(self.state.gyro_pitch_angle),
        };
        let degraded = roll_tilt.is_err() || pitch_tilt.is_err();
        if degraded {
            log_warn!(
                "degenerate acceleration at t={} ms, using gyro-only tilt",
                timestamp.as_millis()
            );
        }

        Ok(OrientationEstimate {
            roll,
            pitch,
            yaw: self.state.yaw,
            degraded,
        })
    }

    /// Reads one sample from `source` and steps with it. A sensor failure
    /// leaves the engine untouched, the same as a rejected timestamp.
    pub fn poll<S: RawSampleSource>(
        &mut self,
        source: &mut S,
        timestamp: Timestamp,
    ) -> Result<OrientationEstimate, TickError<S::Error>> {
        let sample = source.read_sample().map_err(TickError::Sensor)?;
        Ok(self.step(sample, timestamp)?)
    }

    pub fn reset(&mut self) {
        self.state = FilterState::new();
        log_info!("orientation engine reset");
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn phase(&self) -> EngineState {
        match self.state.last_timestamp {
            Some(_) => EngineState::Running,
            None => EngineState::Uninitialized,
        }
    }

    pub fn config(&self) -> FilterConfig {
        self.filter.config()
    }

    // seconds since the previous tick, 0.0 on the first one
    fn elapsed(&self, timestamp: Timestamp) -> Result<f32, FusionError> {
        let current = timestamp.as_millis();
        match self.state.last_timestamp {
            Some(previous) if !(current >= previous.as_millis()) || !current.is_finite() => {
                log_warn!(
                    "rejected timestamp {} ms, previous {} ms",
                    current,
                    previous.as_millis()
                );
                Err(FusionError::NonMonotonicTimestamp {
                    previous,
                    current: timestamp,
                })
            }
            Some(previous) => Ok(timestamp.elapsed_since(previous)),
            None if !current.is_finite() => Err(FusionError::NonMonotonicTimestamp {
                previous: timestamp,
                current: timestamp,
            }),
            None => Ok(0.0),
        }
    }
}

impl Default for OrientationEngine {
    fn default() -> Self {
        Self::new()
    }
}

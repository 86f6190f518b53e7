// Where raw IMU samples come from
//
// The fusion core only sees `RawSampleSource`; a bus driver, a simulator and a
// recorded log all look the same to it.

use crate::filtering::complementary::types::{RawImuSample, Vector3};
use crate::filtering::sma::SmaFilter;

pub trait RawSampleSource {
    type Error;

    // one accel (g) + gyro (deg/s) reading per call
    fn read_sample(&mut self) -> Result<RawImuSample, Self::Error>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReplayError {
    Exhausted,
}

/// Plays back a recorded (or synthesized) sequence of samples.
pub struct ReplaySource<'a> {
    samples: &'a [RawImuSample],
    idx: usize,
}

impl<'a> ReplaySource<'a> {
    pub fn new(samples: &'a [RawImuSample]) -> Self {
        Self { samples, idx: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.samples.len() - self.idx
    }

    pub fn rewind(&mut self) {
        self.idx = 0;
    }
}

impl RawSampleSource for ReplaySource<'_> {
    type Error = ReplayError;

    fn read_sample(&mut self) -> Result<RawImuSample, ReplayError> {
        let sample = self.samples.get(self.idx).ok_or(ReplayError::Exhausted)?;
        self.idx += 1;
        Ok(*sample)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SmoothedError<E> {
    Source(E),
    // window not full yet
    Warming,
}

/// Moving-average pre-smoothing over the last `SIZE` samples of each channel.
pub struct SmoothedSource<S, const SIZE: usize> {
    source: S,
    accel_x: SmaFilter<f32, SIZE>,
    accel_y: SmaFilter<f32, SIZE>,
    accel_z: SmaFilter<f32, SIZE>,
    gyro_x: SmaFilter<f32, SIZE>,
    gyro_y: SmaFilter<f32, SIZE>,
    gyro_z: SmaFilter<f32, SIZE>,
}

impl<S: RawSampleSource, const SIZE: usize> SmoothedSource<S, SIZE> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            accel_x: SmaFilter::new(),
            accel_y: SmaFilter::new(),
            accel_z: SmaFilter::new(),
            gyro_x: SmaFilter::new(),
            gyro_y: SmaFilter::new(),
            gyro_z: SmaFilter::new(),
        }
    }

    pub fn reset(&mut self) {
        self.accel_x.reset();
        self.accel_y.reset();
        self.accel_z.reset();
        self.gyro_x.reset();
        self.gyro_y.reset();
        self.gyro_z.reset();
    }

    pub fn inner(&mut self) -> &mut S {
        &mut self.source
    }
}

impl<S: RawSampleSource, const SIZE: usize> RawSampleSource for SmoothedSource<S, SIZE> {
    type Error = SmoothedError<S::Error>;

    fn read_sample(&mut self) -> Result<RawImuSample, Self::Error> {
        let raw = self.source.read_sample().map_err(SmoothedError::Source)?;
        self.accel_x.insert(raw.accel.x);
        self.accel_y.insert(raw.accel.y);
        self.accel_z.insert(raw.accel.z);
        self.gyro_x.insert(raw.gyro.x);
        self.gyro_y.insert(raw.gyro.y);
        self.gyro_z.insert(raw.gyro.z);

        // all channels fill together
        match (
            self.accel_x.filtered(),
            self.accel_y.filtered(),
            self.accel_z.filtered(),
            self.gyro_x.filtered(),
            self.gyro_y.filtered(),
            self.gyro_z.filtered(),
        ) {
            (Some(ax), Some(ay), Some(az), Some(gx), Some(gy), Some(gz)) => Ok(RawImuSample::new(
                Vector3::new(ax, ay, az),
                Vector3::new(gx, gy, gz),
            )),
            _ => Err(SmoothedError::Warming),
        }
    }
}

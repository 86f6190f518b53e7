// MPU-6050 IMU driver (I2C)
// Datasheet: https://invensense.tdk.com/wp-content/uploads/2015/02/MPU-6000-Datasheet1.pdf

pub use crate::drivers::imu::mpu6050_constants::*;

use crate::drivers::imu::source::RawSampleSource;
use crate::filtering::complementary::types::{RawImuSample, Vector3};
use embedded_hal::blocking::i2c::{Write, WriteRead};

// Error codes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCode {
    I2cError,
    WrongID,
}

#[derive(Default)]
struct Axes {
    x: i16,
    y: i16,
    z: i16,
}

#[derive(Default)]
struct AGData {
    accel: Axes,
    temp: i16,
    gyro: Axes,
}

struct FssConfig {
    accel: AccelFullScaleSel,
    gyro: GyroFullScaleSel,
}

pub struct MPU6050<I2C> {
    i2c: I2C,
    address: u8,
    raw_ag: AGData,
    fss_config: FssConfig,
}

impl<I2C, E> MPU6050<I2C>
where
    I2C: Write<Error = E> + WriteRead<Error = E>,
{
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self {
            i2c,
            address,
            raw_ag: AGData::default(),
            // power-on ranges
            fss_config: FssConfig {
                accel: AccelFullScaleSel::Gpm2,
                gyro: GyroFullScaleSel::Dps250,
            },
        }
    }

    pub fn init(
        &mut self,
        accel_fss_config: AccelFullScaleSel,
        gyro_fss_config: GyroFullScaleSel,
        dlpf_config: DLPFSel,
    ) -> Result<(), ErrorCode> {
        self.check_id()?;
        self.wake()?;
        self.config_dlpf(dlpf_config)?;
        self.config_accel(accel_fss_config)?;
        self.config_gyro(gyro_fss_config)?;
        log_debug!("mpu6050 at address {} initialized", self.address);
        Ok(())
    }

    pub fn data_ready(&mut self) -> Result<bool, ErrorCode> {
        let status = self.read_byte(RegAddr::IntStatus as u8)?;
        Ok((status & IntStatusBits::DataReady as u8) != 0)
    }

    pub fn read_data(&mut self) -> Result<(), ErrorCode> {
        let mut buf = [0u8; RAW_DATA_NUM_BYTES];
        self.read_bytes(RegAddr::AccelXoutH as u8, &mut buf)?;
        self.raw_ag.accel.x = i16::from_be_bytes([buf[0], buf[1]]);
        self.raw_ag.accel.y = i16::from_be_bytes([buf[2], buf[3]]);
        self.raw_ag.accel.z = i16::from_be_bytes([buf[4], buf[5]]);
        self.raw_ag.temp = i16::from_be_bytes([buf[6], buf[7]]);
        self.raw_ag.gyro.x = i16::from_be_bytes([buf[8], buf[9]]);
        self.raw_ag.gyro.y = i16::from_be_bytes([buf[10], buf[11]]);
        self.raw_ag.gyro.z = i16::from_be_bytes([buf[12], buf[13]]);
        Ok(())
    }

    // x-component of linear acceleration in G's
    pub fn get_accel_x(&self) -> f32 {
        self.get_accel_g(self.raw_ag.accel.x)
    }

    // y-component of linear acceleration in G's
    pub fn get_accel_y(&self) -> f32 {
        self.get_accel_g(self.raw_ag.accel.y)
    }

    // z-component of linear acceleration in G's
    pub fn get_accel_z(&self) -> f32 {
        self.get_accel_g(self.raw_ag.accel.z)
    }

    // x-component of angular velocity in degrees per second
    pub fn get_gyro_x(&self) -> f32 {
        self.get_gyro_dps(self.raw_ag.gyro.x)
    }

    // y-component of angular velocity in degrees per second
    pub fn get_gyro_y(&self) -> f32 {
        self.get_gyro_dps(self.raw_ag.gyro.y)
    }

    // z-component of angular velocity in degrees per second
    pub fn get_gyro_z(&self) -> f32 {
        self.get_gyro_dps(self.raw_ag.gyro.z)
    }

    // die temperature in degrees C
    pub fn get_temp(&self) -> f32 {
        (self.raw_ag.temp as f32) / 340.0 + 36.53
    }

    pub fn release(self) -> I2C {
        self.i2c
    }

    fn get_accel_g(&self, raw: i16) -> f32 {
        match self.fss_config.accel {
            AccelFullScaleSel::Gpm2 => (raw as f32) / ACCEL_SENSITIVITY_SCALE_GPM2,
            AccelFullScaleSel::Gpm4 => (raw as f32) / ACCEL_SENSITIVITY_SCALE_GPM4,
            AccelFullScaleSel::Gpm8 => (raw as f32) / ACCEL_SENSITIVITY_SCALE_GPM8,
            AccelFullScaleSel::Gpm16 => (raw as f32) / ACCEL_SENSITIVITY_SCALE_GPM16,
        }
    }

    fn get_gyro_dps(&self, raw: i16) -> f32 {
        match self.fss_config.gyro {
            GyroFullScaleSel::Dps250 => (raw as f32) / GYRO_SENSITIVITY_SCALE_DPS250,
            GyroFullScaleSel::Dps500 => (raw as f32) / GYRO_SENSITIVITY_SCALE_DPS500,
            GyroFullScaleSel::Dps1000 => (raw as f32) / GYRO_SENSITIVITY_SCALE_DPS1000,
            GyroFullScaleSel::Dps2000 => (raw as f32) / GYRO_SENSITIVITY_SCALE_DPS2000,
        }
    }

    fn check_id(&mut self) -> Result<(), ErrorCode> {
        let whoami = self.read_byte(RegAddr::WhoAmI as u8)?;
        if whoami != MPU6050_WHO_AM_I {
            Err(ErrorCode::WrongID)
        } else {
            Ok(())
        }
    }

    // clear SLEEP and select the internal oscillator
    fn wake(&mut self) -> Result<(), ErrorCode> {
        self.write_byte(RegAddr::PwrMgmt1 as u8, 0)
    }

    fn config_dlpf(&mut self, dlpf_config: DLPFSel) -> Result<(), ErrorCode> {
        let mut config = self.read_byte(RegAddr::Config as u8)?;
        config &= !(ConfigBits::DlpfCfg as u8);
        config |= dlpf_config as u8;
        self.write_byte(RegAddr::Config as u8, config)
    }

    fn config_accel(&mut self, fss_config: AccelFullScaleSel) -> Result<(), ErrorCode> {
        let mut config = self.read_byte(RegAddr::AccelConfig as u8)?;
        config &= !(FsSelBits::FsSel as u8);
        config |= (fss_config as u8) << 3;
        self.write_byte(RegAddr::AccelConfig as u8, config)?;
        self.fss_config.accel = fss_config;
        Ok(())
    }

    fn config_gyro(&mut self, fss_config: GyroFullScaleSel) -> Result<(), ErrorCode> {
        let mut config = self.read_byte(RegAddr::GyroConfig as u8)?;
        config &= !(FsSelBits::FsSel as u8);
        config |= (fss_config as u8) << 3;
        self.write_byte(RegAddr::GyroConfig as u8, config)?;
        self.fss_config.gyro = fss_config;
        Ok(())
    }

    fn write_byte(&mut self, reg: u8, data: u8) -> Result<(), ErrorCode> {
        self.i2c
            .write(self.address, &[reg, data])
            .map_err(|_| ErrorCode::I2cError)
    }

    fn read_byte(&mut self, reg: u8) -> Result<u8, ErrorCode> {
        let mut buf = [0u8; 1];
        self.read_bytes(reg, &mut buf)?;
        Ok(buf[0])
    }

    fn read_bytes(&mut self, reg: u8, buf: &mut [u8]) -> Result<(), ErrorCode> {
        self.i2c
            .write_read(self.address, &[reg], buf)
            .map_err(|_| ErrorCode::I2cError)
    }
}

impl<I2C, E> RawSampleSource for MPU6050<I2C>
where
    I2C: Write<Error = E> + WriteRead<Error = E>,
{
    type Error = ErrorCode;

    fn read_sample(&mut self) -> Result<RawImuSample, ErrorCode> {
        self.read_data()?;
        Ok(RawImuSample::new(
            Vector3::new(self.get_accel_x(), self.get_accel_y(), self.get_accel_z()),
            Vector3::new(self.get_gyro_x(), self.get_gyro_y(), self.get_gyro_z()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::vec::Vec;

    #[derive(Debug)]
    struct BusFault;

    // Register-file backed bus; records every write
    struct MockI2c {
        regs: [u8; 128],
        writes: Vec<(u8, u8)>,
        fail: bool,
    }

    impl MockI2c {
        fn new() -> Self {
            let mut regs = [0u8; 128];
            regs[RegAddr::WhoAmI as usize] = MPU6050_WHO_AM_I;
            // power-on default: asleep
            regs[RegAddr::PwrMgmt1 as usize] = PwrMgmt1Bits::Sleep as u8;
            Self {
                regs,
                writes: Vec::new(),
                fail: false,
            }
        }

        fn load(&mut self, reg: u8, bytes: &[u8]) {
            let start = reg as usize;
            self.regs[start..start + bytes.len()].copy_from_slice(bytes);
        }
    }

    impl Write for MockI2c {
        type Error = BusFault;

        fn write(&mut self, address: u8, bytes: &[u8]) -> Result<(), BusFault> {
            if self.fail || address != MPU6050_ADDR_AD0_LOW {
                return Err(BusFault);
            }
            let reg = bytes[0];
            for (offset, value) in bytes[1..].iter().enumerate() {
                let addr = reg + offset as u8;
                self.regs[addr as usize] = *value;
                self.writes.push((addr, *value));
            }
            Ok(())
        }
    }

    impl WriteRead for MockI2c {
        type Error = BusFault;

        fn write_read(
            &mut self,
            address: u8,
            bytes: &[u8],
            buffer: &mut [u8],
        ) -> Result<(), BusFault> {
            if self.fail || address != MPU6050_ADDR_AD0_LOW {
                return Err(BusFault);
            }
            let start = bytes[0] as usize;
            buffer.copy_from_slice(&self.regs[start..start + buffer.len()]);
            Ok(())
        }
    }

    fn be(v: i16) -> [u8; 2] {
        v.to_be_bytes()
    }

    fn data_block(accel: [i16; 3], temp: i16, gyro: [i16; 3]) -> [u8; RAW_DATA_NUM_BYTES] {
        let mut block = [0u8; RAW_DATA_NUM_BYTES];
        for (i, v) in accel.iter().chain([temp].iter()).chain(gyro.iter()).enumerate() {
            block[2 * i..2 * i + 2].copy_from_slice(&be(*v));
        }
        block
    }

    #[test]
    fn init_wakes_and_configures() {
        let mut imu = MPU6050::new(MockI2c::new(), MPU6050_ADDR_AD0_LOW);
        imu.init(
            AccelFullScaleSel::Gpm4,
            GyroFullScaleSel::Dps500,
            DLPFSel::Bw44Hz,
        )
        .unwrap();
        let bus = imu.release();
        assert_eq!(bus.regs[RegAddr::PwrMgmt1 as usize], 0);
        assert_eq!(bus.regs[RegAddr::Config as usize], 0x03);
        assert_eq!(bus.regs[RegAddr::AccelConfig as usize], 0x01 << 3);
        assert_eq!(bus.regs[RegAddr::GyroConfig as usize], 0x01 << 3);
        assert_eq!(bus.writes[0], (RegAddr::PwrMgmt1 as u8, 0));
    }

    #[test]
    fn init_rejects_wrong_id() {
        let mut bus = MockI2c::new();
        bus.regs[RegAddr::WhoAmI as usize] = 0x70;
        let mut imu = MPU6050::new(bus, MPU6050_ADDR_AD0_LOW);
        assert_eq!(
            imu.init(
                AccelFullScaleSel::Gpm2,
                GyroFullScaleSel::Dps250,
                DLPFSel::Bw260Hz
            ),
            Err(ErrorCode::WrongID)
        );
        // nothing written to a device we could not identify
        assert!(imu.release().writes.is_empty());
    }

    #[test]
    fn bus_failure_maps_to_i2c_error() {
        let mut bus = MockI2c::new();
        bus.fail = true;
        let mut imu = MPU6050::new(bus, MPU6050_ADDR_AD0_LOW);
        assert_eq!(imu.read_sample(), Err(ErrorCode::I2cError));
        assert_eq!(imu.data_ready(), Err(ErrorCode::I2cError));
    }

    #[test]
    fn wrong_address_fails() {
        let mut imu = MPU6050::new(MockI2c::new(), MPU6050_ADDR_AD0_HIGH);
        assert_eq!(imu.read_sample(), Err(ErrorCode::I2cError));
    }

    #[test]
    fn sample_scaled_at_default_ranges() {
        let mut bus = MockI2c::new();
        bus.load(
            RegAddr::AccelXoutH as u8,
            &data_block([0, -8192, 16384], 0, [131, -262, 1310]),
        );
        let mut imu = MPU6050::new(bus, MPU6050_ADDR_AD0_LOW);
        imu.init(
            AccelFullScaleSel::Gpm2,
            GyroFullScaleSel::Dps250,
            DLPFSel::Bw260Hz,
        )
        .unwrap();

        let sample = imu.read_sample().unwrap();
        assert_eq!(sample.accel, Vector3::new(0.0, -0.5, 1.0));
        assert_eq!(sample.gyro, Vector3::new(1.0, -2.0, 10.0));
    }

    #[test]
    fn sample_scaled_at_wide_ranges() {
        let mut bus = MockI2c::new();
        bus.load(
            RegAddr::AccelXoutH as u8,
            &data_block([2048, 0, -4096], 0, [164, 0, 0]),
        );
        let mut imu = MPU6050::new(bus, MPU6050_ADDR_AD0_LOW);
        imu.init(
            AccelFullScaleSel::Gpm16,
            GyroFullScaleSel::Dps2000,
            DLPFSel::Bw260Hz,
        )
        .unwrap();

        let sample = imu.read_sample().unwrap();
        assert_eq!(sample.accel, Vector3::new(1.0, 0.0, -2.0));
        assert!((sample.gyro.x - 10.0).abs() < 1e-4);
    }

    #[test]
    fn data_ready_reads_status_bit() {
        let mut bus = MockI2c::new();
        bus.regs[RegAddr::IntStatus as usize] = IntStatusBits::DataReady as u8;
        let mut imu = MPU6050::new(bus, MPU6050_ADDR_AD0_LOW);
        assert_eq!(imu.data_ready(), Ok(true));
    }

    #[test]
    fn temperature_offset() {
        let mut bus = MockI2c::new();
        bus.load(RegAddr::AccelXoutH as u8, &data_block([0; 3], 340, [0; 3]));
        let mut imu = MPU6050::new(bus, MPU6050_ADDR_AD0_LOW);
        imu.read_data().unwrap();
        assert!((imu.get_temp() - 37.53).abs() < 1e-3);
    }
}

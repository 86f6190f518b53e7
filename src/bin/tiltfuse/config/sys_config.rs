use tiltfuse::drivers::imu::mpu6050;
use tiltfuse::filtering::complementary::config::NOMINAL_PERIOD_MS;

pub const IMU_ADDRESS: u8 = mpu6050::MPU6050_ADDR_AD0_LOW;
pub const IMU_I2C_FREQUENCY_KHZ: u32 = 100;
pub const IMU_ACCEL_RANGE: mpu6050::AccelFullScaleSel = mpu6050::AccelFullScaleSel::Gpm2;
pub const IMU_GYRO_RANGE: mpu6050::GyroFullScaleSel = mpu6050::GyroFullScaleSel::Dps250;
pub const IMU_DLPF: mpu6050::DLPFSel = mpu6050::DLPFSel::Bw21Hz;

// samples averaged per published tick, 1 disables smoothing
pub const IMU_SMA_FILTER_SIZE: usize = 3;

// 10 Hz
pub const SAMPLE_PERIOD_MS: u64 = NOMINAL_PERIOD_MS;

pub const UART_BAUD_RATE: u32 = 115_200;
pub const SYSCLK_HZ: u32 = 48_000_000;

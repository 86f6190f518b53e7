// MPU-6050 Registers and Configs
// Register map: https://invensense.tdk.com/wp-content/uploads/2015/02/MPU-6000-Register-Map1.pdf

#[repr(u8)]
pub enum RegAddr {
    SmplrtDiv = 0x19,
    Config = 0x1A,
    GyroConfig = 0x1B,
    AccelConfig = 0x1C,
    IntStatus = 0x3A,
    AccelXoutH = 0x3B,
    GyroXoutH = 0x43,
    PwrMgmt1 = 0x6B,
    WhoAmI = 0x75,
}

// PwrMgmt1 register:
// Bits:     |       7      |   6   |   5   |     4    |     3    |   2:0  |
// Function: | DEVICE_RESET | SLEEP | CYCLE | reserved | TEMP_DIS | CLKSEL |
#[repr(u8)]
#[allow(dead_code)]
pub enum PwrMgmt1Bits {
    ClkSel = 0x07,
    TempDis = 0x01 << 3,
    Cycle = 0x01 << 5,
    Sleep = 0x01 << 6,
    DeviceReset = 0x01 << 7,
}

// Config register:
// Bits:     |    7:6   |     5:3      |    2:0   |
// Function: | reserved | EXT_SYNC_SET | DLPF_CFG |
#[repr(u8)]
pub enum ConfigBits {
    DlpfCfg = 0x07,
}

// GyroConfig / AccelConfig registers:
// Bits:     | 7:5 |  4:3   |    2:0   |
// Function: | ST  | FS_SEL | reserved |
#[repr(u8)]
pub enum FsSelBits {
    FsSel = 0x03 << 3,
}

// IntStatus register:
// Bits:     |    7:1   |      0       |
// Function: | ...      | DATA_RDY_INT |
#[repr(u8)]
pub enum IntStatusBits {
    DataReady = 0x01,
}

// Gyro full scale range in degrees per second
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GyroFullScaleSel {
    Dps250 = 0x00,
    Dps500 = 0x01,
    Dps1000 = 0x02,
    Dps2000 = 0x03,
}

// Accel full scale range in G's (plus or minus)
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AccelFullScaleSel {
    Gpm2 = 0x00,
    Gpm4 = 0x01,
    Gpm8 = 0x02,
    Gpm16 = 0x03,
}

// Shared accel/gyro digital low pass filter, named by accel 3dB bandwidth
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DLPFSel {
    Bw260Hz = 0x00,
    Bw184Hz = 0x01,
    Bw94Hz = 0x02,
    Bw44Hz = 0x03,
    Bw21Hz = 0x04,
    Bw10Hz = 0x05,
    Bw5Hz = 0x06,
}

// Constants
pub const MPU6050_ADDR_AD0_LOW: u8 = 0x68;
pub const MPU6050_ADDR_AD0_HIGH: u8 = 0x69;
pub const MPU6050_WHO_AM_I: u8 = 0x68;
// accel xyz, temperature, gyro xyz
pub const RAW_DATA_NUM_BYTES: usize = 14;

// LSB per g
pub const ACCEL_SENSITIVITY_SCALE_GPM2: f32 = 16384.0;
pub const ACCEL_SENSITIVITY_SCALE_GPM4: f32 = 8192.0;
pub const ACCEL_SENSITIVITY_SCALE_GPM8: f32 = 4096.0;
pub const ACCEL_SENSITIVITY_SCALE_GPM16: f32 = 2048.0;

// LSB per deg/s
pub const GYRO_SENSITIVITY_SCALE_DPS250: f32 = 131.0;
pub const GYRO_SENSITIVITY_SCALE_DPS500: f32 = 65.5;
pub const GYRO_SENSITIVITY_SCALE_DPS1000: f32 = 32.8;
pub const GYRO_SENSITIVITY_SCALE_DPS2000: f32 = 16.4;

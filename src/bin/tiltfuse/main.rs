#![no_main]
#![no_std]

// defmt transport for the library's log macros
use defmt_rtt as _;

mod config;

#[rtic::app(device = stm32f4xx_hal::pac, peripherals = true, dispatchers = [SPI1])]
mod app {
    use crate::config::sys_config;
    use core::fmt::Write;
    use cortex_m::asm;
    use panic_write::PanicHandler;
    use stm32f4xx_hal::{
        gpio::{PB8, PB9},
        i2c::{I2c, Mode as i2cMode},
        pac::{I2C1, USART2},
        prelude::*,
        serial::{Config, Serial, Tx},
    };
    use systick_monotonic::{ExtU64, Systick};
    use tiltfuse::drivers::imu::mpu6050;
    use tiltfuse::drivers::imu::source::{SmoothedError, SmoothedSource};
    use tiltfuse::filtering::complementary::{OrientationEngine, TickError, Timestamp};

    type Imu = mpu6050::MPU6050<I2c<I2C1, (PB8, PB9)>>;

    #[shared]
    struct Shared {}

    #[local]
    struct Local {
        tx: core::pin::Pin<panic_write::PanicHandler<Tx<USART2>>>,
        imu: SmoothedSource<Imu, { sys_config::IMU_SMA_FILTER_SIZE }>,
        engine: OrientationEngine,
    }

    #[monotonic(binds = SysTick, default = true)]
    type MonoTimer = Systick<1000>;

    #[init]
    fn init(ctx: init::Context) -> (Shared, Local, init::Monotonics) {
        // configure clocks
        let rcc = ctx.device.RCC.constrain();
        let mono = Systick::new(ctx.core.SYST, sys_config::SYSCLK_HZ);
        let clocks = rcc.cfgr.sysclk(sys_config::SYSCLK_HZ.Hz()).freeze();

        // set up uart tx
        let gpioa = ctx.device.GPIOA.split();
        let tx_pin = gpioa.pa2.into_alternate();
        let serial = Serial::tx(
            ctx.device.USART2,
            tx_pin,
            Config::default()
                .baudrate(sys_config::UART_BAUD_RATE.bps())
                .wordlength_8()
                .parity_none(),
            &clocks,
        )
        .unwrap();
        let mut tx = PanicHandler::new(serial);

        // configure I2C
        let gpiob = ctx.device.GPIOB.split();
        let scl = gpiob.pb8;
        let sda = gpiob.pb9;
        let i2c = I2c::new(
            ctx.device.I2C1,
            (scl, sda),
            i2cMode::Standard {
                frequency: sys_config::IMU_I2C_FREQUENCY_KHZ.kHz(),
            },
            &clocks,
        );

        // set up MPU-6050
        let mut imu = mpu6050::MPU6050::new(i2c, sys_config::IMU_ADDRESS);
        match imu.init(
            sys_config::IMU_ACCEL_RANGE,
            sys_config::IMU_GYRO_RANGE,
            sys_config::IMU_DLPF,
        ) {
            Ok(_) => writeln!(tx, "imu initialized\r").ok(),
            Err(e) => {
                match e {
                    mpu6050::ErrorCode::I2cError => writeln!(tx, "I2C error\r").ok(),
                    mpu6050::ErrorCode::WrongID => writeln!(tx, "wrong ID\r").ok(),
                };
                panic!("imu initialization failed");
            }
        };

        writeln!(tx, "system initialized\r").ok();

        // first tick only initializes the engine, integration starts on the second
        sample::spawn_after(ExtU64::millis(sys_config::SAMPLE_PERIOD_MS)).unwrap();

        (
            Shared {},
            Local {
                tx,
                imu: SmoothedSource::new(imu),
                engine: OrientationEngine::new(),
            },
            init::Monotonics(mono),
        )
    }

    #[task(local = [tx, imu, engine])]
    fn sample(cx: sample::Context) {
        let timestamp = Timestamp::from_millis(monotonics::now().ticks() as f64);
        let tx = cx.local.tx;

        match cx.local.engine.poll(cx.local.imu, timestamp) {
            Ok(estimate) => {
                writeln!(tx, "{}\r", estimate).ok();
                if estimate.degraded {
                    writeln!(tx, "accel reference lost, using gyro-only tilt\r").ok();
                }
            }
            Err(TickError::Sensor(SmoothedError::Warming)) => {}
            Err(TickError::Sensor(SmoothedError::Source(e))) => {
                writeln!(tx, "imu read failed: {:?}\r", e).ok();
            }
            Err(TickError::Fusion(e)) => {
                writeln!(tx, "tick rejected: {}\r", e).ok();
            }
        }

        // run at 10 Hz
        sample::spawn_after(ExtU64::millis(sys_config::SAMPLE_PERIOD_MS)).ok();
    }

    #[idle]
    fn idle(_ctx: idle::Context) -> ! {
        loop {
            asm::nop();
        }
    }
}

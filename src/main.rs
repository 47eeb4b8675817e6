#![no_main]
#![no_std]
#![deny(unsafe_code)]

mod boards;
mod tasks;

use boards::board::{Board, GimbalPwm};
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_time::Delay;
use pantilt::{Gimbal, GimbalCommand, GimbalConfig, SharedGimbal};
use panic_probe as _;
use static_cell::StaticCell;

pub type BoardGimbal = SharedGimbal<CriticalSectionRawMutex, GimbalPwm>;

pub static GIMBAL_COMMAND_CHANNEL: Channel<CriticalSectionRawMutex, GimbalCommand, 4> =
    Channel::new();
static GIMBAL: StaticCell<BoardGimbal> = StaticCell::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    defmt::info!("init");
    let mut board = Board::init();

    // -----------------------------------------------------------------------------------------
    // Scan I2C
    defmt::info!("Start I2C scan...");

    const VALID_ADDR_RANGE: core::ops::Range<u8> = 0x08..0x78;

    for addr in VALID_ADDR_RANGE {
        if board.i2c1.write(addr, &[0]).await.is_ok() {
            defmt::info!("Found device at {:02x}", addr);
        }
    }

    // -----------------------------------------------------------------------------------------
    // Gimbal on the PCA9685, both servos go to their default angle here
    let config = GimbalConfig::default();
    let gimbal = match Gimbal::with_pca9685(board.i2c1, Delay, &config).await {
        Ok(gimbal) => gimbal,
        Err(e) => {
            defmt::error!("gimbal init failed: {}", e);
            panic!("PCA9685 not found");
        }
    };
    let gimbal: &'static BoardGimbal = GIMBAL.init(SharedGimbal::new(gimbal));

    spawner.must_spawn(tasks::run_gimbal_task(gimbal));
    spawner.must_spawn(tasks::run_status_task(gimbal));
    spawner.must_spawn(tasks::run_smoke_test_task());
}

use crate::{BoardGimbal, GIMBAL_COMMAND_CHANNEL};
use embassy_time::{Duration, Ticker};
use pantilt::Update;

/// Sole consumer of gimbal commands. Errors are reported and dropped, never retried.
#[embassy_executor::task]
pub async fn run_gimbal_task(gimbal: &'static BoardGimbal) {
    let receiver = GIMBAL_COMMAND_CHANNEL.receiver();
    defmt::info!("gimbal task started");
    loop {
        let command = receiver.receive().await;
        match gimbal.apply(command).await {
            Ok(Update::Updated((bottom, top))) => {
                defmt::info!("{}: bottom {} top {}", command, bottom, top);
            }
            Ok(Update::Unchanged(_)) => {
                defmt::warn!("{} ignored at range limit", command);
            }
            Err(e) => {
                defmt::error!("{} failed: {}", command, e);
            }
        }
    }
}

#[embassy_executor::task]
pub async fn run_status_task(gimbal: &'static BoardGimbal) {
    let mut ticker = Ticker::every(Duration::from_secs(5));
    loop {
        ticker.next().await;
        let (bottom, top) = gimbal.angles().await;
        defmt::info!("    [status] bottom: {}, top: {}", bottom, top);
    }
}

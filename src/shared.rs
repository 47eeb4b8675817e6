use crate::common::Update;
use crate::error::Error;
use crate::gimbal::{Direction, Gimbal, GimbalCommand};
use crate::pwm::PwmDriver;
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::mutex::{Mutex, MutexGuard};

/// A gimbal that several tasks can drive.
///
/// Both servo angles and the bus handle sit behind one mutex, so duty writes from different
/// tasks never interleave.
pub struct SharedGimbal<M: RawMutex, D> {
    inner: Mutex<M, Gimbal<D>>,
}

impl<M: RawMutex, D: PwmDriver> SharedGimbal<M, D> {
    pub fn new(gimbal: Gimbal<D>) -> Self {
        SharedGimbal {
            inner: Mutex::new(gimbal),
        }
    }

    pub async fn nudge(
        &self,
        direction: Direction,
        delta: f32,
    ) -> Result<Update<f32>, Error<D::Error>> {
        self.inner.lock().await.nudge(direction, delta).await
    }

    pub async fn reset(&self) -> Result<(), Error<D::Error>> {
        self.inner.lock().await.reset().await
    }

    pub async fn apply(
        &self,
        command: GimbalCommand,
    ) -> Result<Update<(f32, f32)>, Error<D::Error>> {
        self.inner.lock().await.apply(command).await
    }

    /// `(bottom, top)` in degrees.
    pub async fn angles(&self) -> (f32, f32) {
        self.inner.lock().await.angles()
    }

    /// Exclusive access for a sequence of commands that must not be split up.
    pub async fn lock(&self) -> MutexGuard<'_, M, Gimbal<D>> {
        self.inner.lock().await
    }

    /// `None` while another caller holds the gimbal.
    pub fn try_lock(&self) -> Option<MutexGuard<'_, M, Gimbal<D>>> {
        self.inner.try_lock().ok()
    }

    pub fn into_inner(self) -> Gimbal<D> {
        self.inner.into_inner()
    }
}

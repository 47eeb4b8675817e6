use crate::common::Update;
use crate::config::GimbalConfig;
use crate::drivers::pca9685::{self, Pca9685};
use crate::error::Error;
use crate::pwm::PwmDriver;
use crate::servo::Servo;
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::I2c;

/// Step used by interactive control when no other step is given.
pub const DEFAULT_NUDGE_DEGREES: f32 = 5.0;

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Top servo, increasing angle.
    Up,
    /// Top servo, decreasing angle.
    Down,
    /// Bottom servo, increasing angle.
    Left,
    /// Bottom servo, decreasing angle.
    Right,
}

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GimbalCommand {
    Nudge(Direction, f32),
    Reset,
}

/// Pan/tilt platform: one PWM driver, a bottom (pan) and a top (tilt) servo.
pub struct Gimbal<D> {
    driver: D,
    bottom: Servo,
    top: Servo,
}

impl<I2C, DL> Gimbal<Pca9685<I2C, DL>>
where
    I2C: I2c,
    DL: DelayNs,
{
    /// Brings up a PCA9685 at `config.address` on `i2c` and builds the gimbal on it.
    pub async fn with_pca9685(
        i2c: I2C,
        delay: DL,
        config: &GimbalConfig,
    ) -> Result<Self, Error<pca9685::Error<I2C::Error>>> {
        config.validate()?;
        let mut pwm = Pca9685::new(i2c, delay, config.address);
        pwm.init().await.map_err(Error::Driver)?;
        Self::new(pwm, config).await
    }
}

impl<D: PwmDriver> Gimbal<D> {
    /// Sets the PWM frequency and moves both servos to their default angles.
    ///
    /// Both calibrations are checked before anything is written to the driver.
    pub async fn new(mut driver: D, config: &GimbalConfig) -> Result<Self, Error<D::Error>> {
        config.validate()?;
        driver
            .set_frequency(config.pwm_frequency_hz)
            .await
            .map_err(Error::Driver)?;
        let bottom = Servo::new(&mut driver, config.bottom).await?;
        let top = Servo::new(&mut driver, config.top).await?;
        info!(
            "gimbal ready at {} Hz: bottom {} deg, top {} deg",
            config.pwm_frequency_hz,
            bottom.angle(),
            top.angle()
        );
        Ok(Gimbal {
            driver,
            bottom,
            top,
        })
    }

    /// Moves one axis by `delta` degrees.
    ///
    /// The move is skipped, without error, when the target would leave `[0, angle_range]`.
    /// This holds for either sign of `delta`.
    pub async fn nudge(
        &mut self,
        direction: Direction,
        delta: f32,
    ) -> Result<Update<f32>, Error<D::Error>> {
        let servo = match direction {
            Direction::Up | Direction::Down => &mut self.top,
            Direction::Left | Direction::Right => &mut self.bottom,
        };
        let target = match direction {
            Direction::Up | Direction::Left => servo.angle() + delta,
            Direction::Down | Direction::Right => servo.angle() - delta,
        };
        if !servo.contains(target) {
            debug!("nudge to {} deg ignored on channel {}", target, servo.channel());
            return Ok(Update::Unchanged(servo.angle()));
        }
        servo.set_angle(&mut self.driver, target).await?;
        Ok(Update::Updated(target))
    }

    pub async fn up(&mut self, delta: f32) -> Result<Update<f32>, Error<D::Error>> {
        self.nudge(Direction::Up, delta).await
    }

    pub async fn down(&mut self, delta: f32) -> Result<Update<f32>, Error<D::Error>> {
        self.nudge(Direction::Down, delta).await
    }

    pub async fn left(&mut self, delta: f32) -> Result<Update<f32>, Error<D::Error>> {
        self.nudge(Direction::Left, delta).await
    }

    pub async fn right(&mut self, delta: f32) -> Result<Update<f32>, Error<D::Error>> {
        self.nudge(Direction::Right, delta).await
    }

    /// Returns both axes to their default angles.
    pub async fn reset(&mut self) -> Result<(), Error<D::Error>> {
        self.top.reset(&mut self.driver).await?;
        self.bottom.reset(&mut self.driver).await
    }

    /// Runs `command` and reports `(bottom, top)` afterwards.
    pub async fn apply(
        &mut self,
        command: GimbalCommand,
    ) -> Result<Update<(f32, f32)>, Error<D::Error>> {
        let moved = match command {
            GimbalCommand::Nudge(direction, delta) => {
                self.nudge(direction, delta).await?.is_updated()
            }
            GimbalCommand::Reset => {
                self.reset().await?;
                true
            }
        };
        let angles = self.angles();
        Ok(if moved {
            Update::Updated(angles)
        } else {
            Update::Unchanged(angles)
        })
    }

    pub fn bottom(&self) -> &Servo {
        &self.bottom
    }

    pub fn top(&self) -> &Servo {
        &self.top
    }

    /// `(bottom, top)` in degrees.
    pub fn angles(&self) -> (f32, f32) {
        (self.bottom.angle(), self.top.angle())
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn release(self) -> D {
        self.driver
    }
}

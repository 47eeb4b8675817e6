use crate::config::ServoCalibration;
use crate::error::Error;
use crate::pwm::PwmDriver;

/// One servo on one PWM channel.
///
/// The servo does not hold the driver; the owner lends it for every command. The stored
/// angle is whatever was last commanded successfully, there is no readback.
#[derive(Debug, Clone, PartialEq)]
pub struct Servo {
    calibration: ServoCalibration,
    current_angle: f32,
}

impl Servo {
    /// Validates `calibration` and moves the servo to its default angle.
    pub async fn new<D: PwmDriver>(
        driver: &mut D,
        calibration: ServoCalibration,
    ) -> Result<Self, Error<D::Error>> {
        calibration.validate()?;
        let mut servo = Servo {
            calibration,
            current_angle: calibration.default_angle,
        };
        servo.reset(driver).await?;
        Ok(servo)
    }

    pub fn compute_duty(&self, angle: f32) -> i32 {
        self.calibration.duty_for(angle)
    }

    /// Commands `angle` and records it once the driver accepted the write.
    ///
    /// Repeating the same angle repeats the write.
    pub async fn set_angle<D: PwmDriver>(
        &mut self,
        driver: &mut D,
        angle: f32,
    ) -> Result<(), Error<D::Error>> {
        if !self.calibration.contains(angle) {
            return Err(Error::AngleOutOfRange);
        }
        let duty = u16::try_from(self.compute_duty(angle)).map_err(|_| Error::AngleOutOfRange)?;
        driver
            .set_channel_duty(self.calibration.channel, duty)
            .await
            .map_err(Error::Driver)?;
        trace!(
            "servo {}: {} deg, duty {}",
            self.calibration.channel,
            angle,
            duty
        );
        self.current_angle = angle;
        Ok(())
    }

    pub fn angle(&self) -> f32 {
        self.current_angle
    }

    pub async fn reset<D: PwmDriver>(&mut self, driver: &mut D) -> Result<(), Error<D::Error>> {
        self.set_angle(driver, self.calibration.default_angle).await
    }

    pub fn contains(&self, angle: f32) -> bool {
        self.calibration.contains(angle)
    }

    pub fn channel(&self) -> u8 {
        self.calibration.channel
    }

    pub fn angle_range(&self) -> f32 {
        self.calibration.angle_range
    }

    pub fn default_angle(&self) -> f32 {
        self.calibration.default_angle
    }

    pub fn calibration(&self) -> &ServoCalibration {
        &self.calibration
    }
}

use crate::error::ConfigError;

pub const PCA9685_ADDRESS: u8 = crate::drivers::pca9685::DEFAULT_ADDRESS;
pub const PWM_FREQUENCY_HZ: u16 = 50;
pub const I2C_FREQUENCY_HZ: u32 = 400_000;

// PCA9685 counts at 50 Hz, 4096 counts per 20 ms period.
// bottom arm: 285 counts over 180 deg, ~0.63 deg per count
pub const BOTTOM_SERVO: ServoCalibration = ServoCalibration {
    channel: 0,
    min_duty: 130,
    max_duty: 415,
    angle_range: 180.0,
    default_angle: 90.0,
};

// top arm: 400 counts over 180 deg, ~0.45 deg per count
pub const TOP_SERVO: ServoCalibration = ServoCalibration {
    channel: 1,
    min_duty: 110,
    max_duty: 510,
    angle_range: 180.0,
    default_angle: 90.0,
};

/// Calibration of one servo channel.
///
/// `min_duty` is the duty at 0 degrees and `max_duty` the duty at `angle_range` degrees.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ServoCalibration {
    pub channel: u8,
    pub min_duty: u16,
    pub max_duty: u16,
    pub angle_range: f32,
    pub default_angle: f32,
}

impl ServoCalibration {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.angle_range.is_finite() || self.angle_range <= 0.0 {
            return Err(ConfigError::AngleRange);
        }
        if self.min_duty >= self.max_duty {
            return Err(ConfigError::DutyRange);
        }
        if !self.contains(self.default_angle) {
            return Err(ConfigError::DefaultAngle);
        }
        Ok(())
    }

    /// `true` if `angle` lies in `[0, angle_range]`. NaN is never contained.
    pub fn contains(&self, angle: f32) -> bool {
        (0.0..=self.angle_range).contains(&angle)
    }

    /// Linear map from degrees to duty, truncated toward zero.
    ///
    /// The result is not clamped: angles outside `[0, angle_range]` map outside
    /// `[min_duty, max_duty]`.
    pub fn duty_for(&self, angle: f32) -> i32 {
        let span = (self.max_duty as f32) - (self.min_duty as f32);
        (self.min_duty as f32 + span * (angle / self.angle_range)) as i32
    }
}

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GimbalConfig {
    pub address: u8,
    pub pwm_frequency_hz: u16,
    /// Pan axis.
    pub bottom: ServoCalibration,
    /// Tilt axis.
    pub top: ServoCalibration,
}

impl GimbalConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.bottom.validate()?;
        self.top.validate()
    }
}

impl Default for GimbalConfig {
    fn default() -> Self {
        GimbalConfig {
            address: PCA9685_ADDRESS,
            pwm_frequency_hz: PWM_FREQUENCY_HZ,
            bottom: BOTTOM_SERVO,
            top: TOP_SERVO,
        }
    }
}

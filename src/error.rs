use core::fmt;

/// Rejected servo calibration. Raised before any bus traffic.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// `angle_range` is zero, negative or not finite.
    AngleRange,
    /// `min_duty` is not below `max_duty`.
    DutyRange,
    /// `default_angle` lies outside `[0, angle_range]`.
    DefaultAngle,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::AngleRange => f.write_str("angle range must be positive"),
            ConfigError::DutyRange => f.write_str("min duty must be below max duty"),
            ConfigError::DefaultAngle => f.write_str("default angle outside angle range"),
        }
    }
}

impl core::error::Error for ConfigError {}

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Error<E> {
    /// Invalid calibration, the gimbal or servo was not constructed.
    Configuration(ConfigError),
    /// Direct servo command outside `[0, angle_range]`.
    AngleOutOfRange,
    /// The PWM driver failed. Passed through unmodified and never retried.
    Driver(E),
}

impl<E> From<ConfigError> for Error<E> {
    fn from(e: ConfigError) -> Self {
        Error::Configuration(e)
    }
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Configuration(e) => write!(f, "configuration error: {}", e),
            Error::AngleOutOfRange => f.write_str("angle outside servo range"),
            Error::Driver(e) => write!(f, "pwm driver error: {:?}", e),
        }
    }
}

impl<E: fmt::Debug> core::error::Error for Error<E> {}

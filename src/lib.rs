#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]
//! Two-axis servo gimbal (pan/tilt) driven through a PCA9685 PWM controller.
//!
//! The [`gimbal::Gimbal`] owns one [`pwm::PwmDriver`] and two [`servo::Servo`]s. Angles are
//! mapped linearly onto calibrated duty values and every nudge is bounded to the servo's
//! mechanical range.

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

pub mod common;
pub mod config;
pub mod drivers;
pub mod error;
pub mod gimbal;
pub mod pwm;
pub mod servo;
pub mod shared;

pub use common::Update;
pub use config::{GimbalConfig, ServoCalibration};
pub use error::{ConfigError, Error};
pub use gimbal::{Direction, Gimbal, GimbalCommand, DEFAULT_NUDGE_DEGREES};
pub use pwm::PwmDriver;
pub use servo::Servo;
pub use shared::SharedGimbal;

use crate::pwm::PwmDriver;
use core::fmt;
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::I2c;
use modular_bitfield::prelude::*;

pub const DEFAULT_ADDRESS: u8 = 0x40;
pub const CHANNELS: u8 = 16;
pub const MAX_DUTY: u16 = 4095;

const REG_MODE1: u8 = 0x00;
const REG_MODE2: u8 = 0x01;
const REG_LED0_ON_L: u8 = 0x06;
const REG_PRE_SCALE: u8 = 0xFE;

const OSCILLATOR_HZ: u32 = 25_000_000;
const COUNTS_PER_PERIOD: u32 = 4096;
const MIN_PRESCALE: u32 = 3;
const MAX_PRESCALE: u32 = 255;
// bit 4 of LEDn_ON_H / LEDn_OFF_H
const FULL_ON_OFF: u16 = 0x1000;
// datasheet 7.3.1.1: max 500us for the oscillator to come up after SLEEP is cleared
const OSCILLATOR_STARTUP_US: u32 = 500;

#[bitfield]
#[allow(dead_code)]
pub(crate) struct Mode1 {
    pub(crate) allcall: bool,
    pub(crate) sub3: bool,
    pub(crate) sub2: bool,
    pub(crate) sub1: bool,
    pub(crate) sleep: bool,
    pub(crate) auto_increment: bool,
    pub(crate) extclk: bool,
    pub(crate) restart: bool,
}

#[bitfield]
#[allow(dead_code)]
pub(crate) struct Mode2 {
    pub(crate) outne: B2,
    pub(crate) outdrv: bool,
    pub(crate) och: bool,
    pub(crate) invrt: bool,
    #[skip]
    __: B3,
}

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error<E> {
    /// Bus error, passed through from the I2C implementation.
    I2c(E),
    /// Channel index of 16 or above.
    InvalidChannel(u8),
    /// Duty above 4095.
    InvalidDuty(u16),
    /// Frequency outside what the prescaler can produce (about 24 to 1526 Hz).
    InvalidFrequency(u16),
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::I2c(e) => write!(f, "i2c error: {:?}", e),
            Error::InvalidChannel(c) => write!(f, "invalid channel {}", c),
            Error::InvalidDuty(d) => write!(f, "invalid duty {}", d),
            Error::InvalidFrequency(hz) => write!(f, "unsupported pwm frequency {} Hz", hz),
        }
    }
}

impl<E: fmt::Debug> core::error::Error for Error<E> {}

/// PRE_SCALE value for `hz`: round(25 MHz / (4096 * hz)) - 1.
pub fn prescale_for<E>(hz: u16) -> Result<u8, Error<E>> {
    if hz == 0 {
        return Err(Error::InvalidFrequency(hz));
    }
    let divider = COUNTS_PER_PERIOD * hz as u32;
    let rounded = (OSCILLATOR_HZ + divider / 2) / divider;
    let prescale = rounded.saturating_sub(1);
    if !(MIN_PRESCALE..=MAX_PRESCALE).contains(&prescale) {
        return Err(Error::InvalidFrequency(hz));
    }
    Ok(prescale as u8)
}

/// ON/OFF counts for a duty value. 0 and 4095 use the full-off and full-on bits.
fn on_off_counts(duty: u16) -> (u16, u16) {
    match duty {
        0 => (0, FULL_ON_OFF),
        MAX_DUTY => (FULL_ON_OFF, 0),
        duty => (0, duty),
    }
}

/// PCA9685 16-channel, 12-bit PWM controller on an I2C bus.
pub struct Pca9685<I2C, D> {
    i2c: I2C,
    delay: D,
    address: u8,
}

impl<I2C: I2c, D: DelayNs> Pca9685<I2C, D> {
    pub fn new(i2c: I2C, delay: D, address: u8) -> Self {
        Self {
            i2c,
            delay,
            address,
        }
    }

    /// Totem-pole outputs, register auto-increment, oscillator running.
    pub async fn init(&mut self) -> Result<(), Error<I2C::Error>> {
        let mode2 = Mode2::new().with_outdrv(true);
        self.write_register(REG_MODE2, mode2.into_bytes()[0]).await?;
        let mode1 = Mode1::new().with_allcall(true).with_auto_increment(true);
        self.write_register(REG_MODE1, mode1.into_bytes()[0]).await?;
        self.delay.delay_us(OSCILLATOR_STARTUP_US).await;
        debug!("pca9685 at {:02x} initialized", self.address);
        Ok(())
    }

    pub async fn read_register(&mut self, reg: u8) -> Result<u8, Error<I2C::Error>> {
        let mut buf = [0];
        self.i2c
            .write_read(self.address, &[reg], &mut buf)
            .await
            .map_err(Error::I2c)?;
        Ok(buf[0])
    }

    pub async fn write_register(&mut self, reg: u8, val: u8) -> Result<(), Error<I2C::Error>> {
        self.i2c
            .write(self.address, &[reg, val])
            .await
            .map_err(Error::I2c)
    }

    /// Raw ON/OFF counts for one channel, written in a single auto-increment transfer.
    pub async fn set_pwm(
        &mut self,
        channel: u8,
        on: u16,
        off: u16,
    ) -> Result<(), Error<I2C::Error>> {
        if channel >= CHANNELS {
            return Err(Error::InvalidChannel(channel));
        }
        let [on_l, on_h] = on.to_le_bytes();
        let [off_l, off_h] = off.to_le_bytes();
        let buf = [REG_LED0_ON_L + 4 * channel, on_l, on_h, off_l, off_h];
        self.i2c
            .write(self.address, &buf)
            .await
            .map_err(Error::I2c)
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }
}

impl<I2C: I2c, D: DelayNs> PwmDriver for Pca9685<I2C, D> {
    type Error = Error<I2C::Error>;

    /// PRE_SCALE is only writable while the oscillator sleeps (datasheet 7.3.5).
    async fn set_frequency(&mut self, hz: u16) -> Result<(), Self::Error> {
        let prescale = prescale_for(hz)?;
        let mode1 = self.read_register(REG_MODE1).await?;

        let sleeping = Mode1::from_bytes([mode1]).with_restart(false).with_sleep(true);
        self.write_register(REG_MODE1, sleeping.into_bytes()[0]).await?;
        self.write_register(REG_PRE_SCALE, prescale).await?;

        let awake = Mode1::from_bytes([mode1]).with_restart(false).with_sleep(false);
        self.write_register(REG_MODE1, awake.into_bytes()[0]).await?;
        self.delay.delay_us(OSCILLATOR_STARTUP_US).await;

        let restarted = Mode1::from_bytes([mode1])
            .with_sleep(false)
            .with_restart(true)
            .with_auto_increment(true)
            .with_allcall(true);
        self.write_register(REG_MODE1, restarted.into_bytes()[0]).await?;
        debug!("pwm frequency {} Hz, prescale {}", hz, prescale);
        Ok(())
    }

    async fn set_channel_duty(&mut self, channel: u8, duty: u16) -> Result<(), Self::Error> {
        if duty > MAX_DUTY {
            return Err(Error::InvalidDuty(duty));
        }
        let (on, off) = on_off_counts(duty);
        self.set_pwm(channel, on, off).await
    }
}

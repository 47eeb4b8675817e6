/// A multi-channel PWM output the servos are wired to.
///
/// Implemented by [`crate::drivers::pca9685::Pca9685`]; tests substitute a recording mock.
#[allow(async_fn_in_trait)]
pub trait PwmDriver {
    type Error: core::fmt::Debug;

    /// Sets the carrier frequency shared by all channels.
    async fn set_frequency(&mut self, hz: u16) -> Result<(), Self::Error>;

    /// Writes a raw duty value to one channel. The valid range is driver specific.
    async fn set_channel_duty(&mut self, channel: u8, duty: u16) -> Result<(), Self::Error>;
}

impl<T: PwmDriver> PwmDriver for &mut T {
    type Error = T::Error;

    async fn set_frequency(&mut self, hz: u16) -> Result<(), Self::Error> {
        T::set_frequency(self, hz).await
    }

    async fn set_channel_duty(&mut self, channel: u8, duty: u16) -> Result<(), Self::Error> {
        T::set_channel_duty(self, channel, duty).await
    }
}

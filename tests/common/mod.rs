#![allow(dead_code)]

use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::{ErrorKind, ErrorType, I2c, NoAcknowledgeSource, Operation};
use pantilt::PwmDriver;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Write {
    Frequency(u16),
    Duty { channel: u8, duty: u16 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Nack;

/// Records every call. After `fail_after` successful writes every further call fails.
#[derive(Default)]
pub struct MockPwm {
    pub writes: Vec<Write>,
    pub fail_after: Option<usize>,
}

impl MockPwm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_after(writes: usize) -> Self {
        MockPwm {
            writes: Vec::new(),
            fail_after: Some(writes),
        }
    }

    pub fn duties(&self) -> Vec<(u8, u16)> {
        self.writes
            .iter()
            .filter_map(|w| match *w {
                Write::Duty { channel, duty } => Some((channel, duty)),
                Write::Frequency(_) => None,
            })
            .collect()
    }

    fn record(&mut self, write: Write) -> Result<(), Nack> {
        if self.fail_after.is_some_and(|limit| self.writes.len() >= limit) {
            return Err(Nack);
        }
        self.writes.push(write);
        Ok(())
    }
}

impl PwmDriver for MockPwm {
    type Error = Nack;

    async fn set_frequency(&mut self, hz: u16) -> Result<(), Self::Error> {
        self.record(Write::Frequency(hz))
    }

    async fn set_channel_duty(&mut self, channel: u8, duty: u16) -> Result<(), Self::Error> {
        self.record(Write::Duty { channel, duty })
    }
}

/// PCA9685 register file behind an I2C bus. Writes set the register pointer from their first
/// byte and auto-increment over the rest, reads continue from the pointer.
pub struct SimulatedPca9685 {
    pub address: u8,
    pub registers: [u8; 256],
    pub writes: Vec<Vec<u8>>,
    pub nack: bool,
    pointer: u8,
}

impl SimulatedPca9685 {
    pub fn new(address: u8) -> Self {
        let mut registers = [0; 256];
        // power-on values: MODE1 sleep + allcall, MODE2 outdrv, prescale 200 Hz
        registers[0x00] = 0x11;
        registers[0x01] = 0x04;
        registers[0xFE] = 0x1E;
        SimulatedPca9685 {
            address,
            registers,
            writes: Vec::new(),
            nack: false,
            pointer: 0,
        }
    }

    /// (ON, OFF) counts currently programmed for `channel`.
    pub fn channel(&self, channel: u8) -> (u16, u16) {
        let base = 0x06 + 4 * channel as usize;
        let r = &self.registers;
        (
            u16::from_le_bytes([r[base], r[base + 1]]),
            u16::from_le_bytes([r[base + 2], r[base + 3]]),
        )
    }

    /// Every value written to `reg`, in order.
    pub fn history(&self, reg: u8) -> Vec<u8> {
        self.writes
            .iter()
            .filter(|w| w.len() == 2 && w[0] == reg)
            .map(|w| w[1])
            .collect()
    }
}

impl ErrorType for SimulatedPca9685 {
    type Error = ErrorKind;
}

impl I2c for SimulatedPca9685 {
    async fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        if self.nack || address != self.address {
            return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
        }
        for operation in operations {
            match operation {
                Operation::Write(bytes) => {
                    self.writes.push(bytes.to_vec());
                    if let Some((&reg, data)) = bytes.split_first() {
                        self.pointer = reg;
                        for &byte in data {
                            self.registers[self.pointer as usize] = byte;
                            self.pointer = self.pointer.wrapping_add(1);
                        }
                    }
                }
                Operation::Read(buf) => {
                    for byte in buf.iter_mut() {
                        *byte = self.registers[self.pointer as usize];
                        self.pointer = self.pointer.wrapping_add(1);
                    }
                }
            }
        }
        Ok(())
    }
}

pub struct NoDelay;

impl DelayNs for NoDelay {
    async fn delay_ns(&mut self, _ns: u32) {}
}

use embassy_stm32::i2c::{self, I2c};
use embassy_stm32::mode::Async;
use embassy_stm32::time::Hertz;
use embassy_stm32::{bind_interrupts, peripherals};
use embassy_time::Delay;
use pantilt::config::I2C_FREQUENCY_HZ;
use pantilt::drivers::pca9685::Pca9685;

bind_interrupts!(struct Irqs {
    I2C1_EV => i2c::EventInterruptHandler<peripherals::I2C1>;
    I2C1_ER => i2c::ErrorInterruptHandler<peripherals::I2C1>;
});

pub type GimbalI2c = I2c<'static, Async>;
pub type GimbalPwm = Pca9685<GimbalI2c, Delay>;

pub struct Board {
    /// PB8 SCL, PB9 SDA. The PCA9685 breakout hangs off this bus.
    pub i2c1: GimbalI2c,
}

impl Board {
    pub fn init() -> Self {
        let mut config = embassy_stm32::Config::default();
        {
            use embassy_stm32::rcc::*;
            // 8 MHz crystal, 168 MHz SYSCLK, 48 MHz for USB
            config.rcc.hse = Some(Hse {
                freq: Hertz(8_000_000),
                mode: HseMode::Oscillator,
            });
            config.rcc.pll_src = PllSource::HSE;
            config.rcc.pll = Some(Pll {
                prediv: PllPreDiv::DIV4,
                mul: PllMul::MUL168,
                divp: Some(PllPDiv::DIV2),
                divq: Some(PllQDiv::DIV7),
                divr: None,
            });
            config.rcc.ahb_pre = AHBPrescaler::DIV1;
            config.rcc.apb1_pre = APBPrescaler::DIV4;
            config.rcc.apb2_pre = APBPrescaler::DIV2;
            config.rcc.sys = Sysclk::PLL1_P;
        }
        let p = embassy_stm32::init(config);

        let i2c1 = I2c::new(
            p.I2C1,
            p.PB8,
            p.PB9,
            Irqs,
            p.DMA1_CH7,
            p.DMA1_CH0,
            Hertz(I2C_FREQUENCY_HZ),
            Default::default(),
        );

        Board { i2c1 }
    }
}

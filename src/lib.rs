#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod error;
pub mod led;
pub mod sdk;

pub use error::GpioError;
pub use sdk::mcu::clock::Rcc;
pub use sdk::mcu::exti::{Exti, Syscfg};
pub use sdk::mcu::gpio::GpioPort;
pub use sdk::mcu::irq_i::{Interrupt, Nvic};
pub use sdk::mcu::peripherals::Peripherals;
pub use sdk::mcu::pin::{AltFunction, Edge, Mode, OutputType, Pin, PinConfig, Port, Pull, Speed};

use core::cell::Cell;

use critical_section::Mutex;
use log::{debug, warn};

use crate::sdk::mcu::clock::Rcc;
use crate::sdk::mcu::exti::{Exti, Syscfg};
use crate::sdk::mcu::gpio::GpioPort;
use crate::sdk::mcu::irq_i::Nvic;
use crate::sdk::mcu::pin::Port;

static TAKEN: Mutex<Cell<bool>> = Mutex::new(Cell::new(false));

/// The complete set of register block handles.
///
/// Exactly one set exists per program run. Each field can be moved out and
/// handed to the code that owns that block, which is what makes the
/// read-modify-write sequences inside the handles free of races between
/// different owners.
#[derive(Debug)]
pub struct Peripherals {
    pub gpioa: GpioPort,
    pub gpiob: GpioPort,
    pub gpioc: GpioPort,
    pub gpiod: GpioPort,
    pub gpioe: GpioPort,
    pub gpiof: GpioPort,
    pub gpiog: GpioPort,
    pub gpioh: GpioPort,
    pub gpioi: GpioPort,
    pub exti: Exti,
    pub syscfg: Syscfg,
    pub rcc: Rcc,
    pub nvic: Nvic,
}

impl Peripherals {
    /// Hands out the handles the first time it is called and `None` after.
    pub fn take() -> Option<Self> {
        let first = critical_section::with(|cs| !TAKEN.borrow(cs).replace(true));

        if first {
            debug!("peripherals: handles taken");
            // SAFETY: the flag above guarantees this runs once
            Some(unsafe { Self::steal() })
        } else {
            warn!("peripherals: already taken");
            None
        }
    }

    /// Creates a new set of handles regardless of whether one exists.
    ///
    /// # Safety
    ///
    /// Two owners of the same block can interleave read-modify-write
    /// sequences and lose each other's updates. The caller must make sure the
    /// handles from `take()` are not in use, e.g. in a fault handler.
    pub unsafe fn steal() -> Self {
        Peripherals {
            gpioa: GpioPort::new(Port::A),
            gpiob: GpioPort::new(Port::B),
            gpioc: GpioPort::new(Port::C),
            gpiod: GpioPort::new(Port::D),
            gpioe: GpioPort::new(Port::E),
            gpiof: GpioPort::new(Port::F),
            gpiog: GpioPort::new(Port::G),
            gpioh: GpioPort::new(Port::H),
            gpioi: GpioPort::new(Port::I),
            exti: Exti::new(),
            syscfg: Syscfg::new(),
            rcc: Rcc::new(),
            nvic: Nvic::new(),
        }
    }
}

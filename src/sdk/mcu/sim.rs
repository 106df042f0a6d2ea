//! Simulated register file for host tests.
//!
//! `attach()` routes the mocked `read_reg32` / `write_reg32` primitives into a
//! per-thread map of address to value, so a test can drive the real engine
//! code end to end and then inspect register contents. The caller must hold
//! `#[mry::lock(read_reg32, write_reg32)]`.
//!
//! Hardware side effects that the engine depends on are modelled:
//! - GPIO IDR mirrors ODR while loopback is on, otherwise holds whatever the
//!   test drove onto the pins with `drive_input`. Writes to IDR are ignored.
//! - GPIO BSRR sets and resets ODR bits (set wins) and always reads as 0.
//! - EXTI PR is write 1 to clear. SWIER raises PR for unmasked lines.
//! - NVIC ISER/ICER share one enabled set; ICPR is write-only.

use std::cell::RefCell;
use std::collections::HashMap;

use mry::Any;

use crate::sdk::mcu::register::{
    mock_read_reg32, mock_write_reg32, GPIO_BASE_ADDR, GPIO_BSRR, GPIO_IDR, GPIO_ODR,
    GPIO_PORT_COUNT, GPIO_PORT_STRIDE, EXTI_IMR, EXTI_PR, EXTI_SWIER, NVIC_ICER, NVIC_ICPR,
    NVIC_ISER,
};

type ReadHook = Box<dyn FnMut(u32, &mut HashMap<u32, u32>)>;

#[derive(Default)]
struct RegisterFile {
    values: HashMap<u32, u32>,
    inputs: HashMap<u32, u32>,
    loopback: bool,
    writes: Vec<(u32, u32)>,
    before_read: Option<ReadHook>,
}

thread_local! {
    static REGISTERS: RefCell<RegisterFile> = RefCell::new(RegisterFile::default());
}

/// Splits `addr` into (port base, offset) when it falls inside a GPIO block.
fn gpio_register(addr: u32) -> Option<(u32, u32)> {
    let end = GPIO_BASE_ADDR + GPIO_PORT_STRIDE * GPIO_PORT_COUNT as u32;
    if (GPIO_BASE_ADDR..end).contains(&addr) {
        let offset = (addr - GPIO_BASE_ADDR) % GPIO_PORT_STRIDE;
        Some((addr - offset, offset))
    } else {
        None
    }
}

fn nvic_enable_word(addr: u32) -> Option<u32> {
    if (NVIC_ISER..NVIC_ISER + 0x20).contains(&addr) {
        Some(addr)
    } else if (NVIC_ICER..NVIC_ICER + 0x20).contains(&addr) {
        Some(addr - NVIC_ICER + NVIC_ISER)
    } else {
        None
    }
}

impl RegisterFile {
    fn get(&self, addr: u32) -> u32 {
        self.values.get(&addr).copied().unwrap_or(0)
    }

    fn read(&mut self, addr: u32) -> u32 {
        if let Some(mut hook) = self.before_read.take() {
            hook(addr, &mut self.values);
            self.before_read = Some(hook);
        }

        if let Some((base, offset)) = gpio_register(addr) {
            match offset {
                GPIO_IDR if self.loopback => return self.get(base + GPIO_ODR),
                GPIO_IDR => return self.inputs.get(&base).copied().unwrap_or(0),
                GPIO_BSRR => return 0,
                _ => {}
            }
        }
        if let Some(word) = nvic_enable_word(addr) {
            return self.get(word);
        }
        self.get(addr)
    }

    fn write(&mut self, addr: u32, value: u32) {
        self.writes.push((addr, value));

        if let Some((base, offset)) = gpio_register(addr) {
            match offset {
                GPIO_IDR => return,
                GPIO_BSRR => {
                    let odr = self.get(base + GPIO_ODR);
                    let set = value & 0xffff;
                    let reset = value >> 16;
                    self.values.insert(base + GPIO_ODR, (odr & !reset) | set);
                    return;
                }
                _ => {}
            }
        }

        match addr {
            EXTI_PR => {
                let pr = self.get(EXTI_PR);
                let swier = self.get(EXTI_SWIER);
                self.values.insert(EXTI_PR, pr & !value);
                self.values.insert(EXTI_SWIER, swier & !value);
            }
            EXTI_SWIER => {
                let raised = value & self.get(EXTI_IMR);
                let pr = self.get(EXTI_PR);
                let swier = self.get(EXTI_SWIER);
                self.values.insert(EXTI_PR, pr | raised);
                self.values.insert(EXTI_SWIER, swier | value);
            }
            _ if (NVIC_ISER..NVIC_ISER + 0x20).contains(&addr) => {
                let enabled = self.get(addr);
                self.values.insert(addr, enabled | value);
            }
            _ if (NVIC_ICER..NVIC_ICER + 0x20).contains(&addr) => {
                let word = addr - NVIC_ICER + NVIC_ISER;
                let enabled = self.get(word);
                self.values.insert(word, enabled & !value);
            }
            _ if (NVIC_ICPR..NVIC_ICPR + 0x20).contains(&addr) => {}
            _ => {
                self.values.insert(addr, value);
            }
        }
    }
}

/// Resets this thread's register file and routes both primitives into it.
pub fn attach() {
    REGISTERS.with(|r| *r.borrow_mut() = RegisterFile::default());

    mock_read_reg32(Any).returns_with(|addr: u32| REGISTERS.with(|r| r.borrow_mut().read(addr)));
    mock_write_reg32(Any, Any).returns_with(|addr: u32, value: u32| {
        REGISTERS.with(|r| r.borrow_mut().write(addr, value))
    });
}

/// Raw register contents, without read side effects.
pub fn peek(addr: u32) -> u32 {
    REGISTERS.with(|r| r.borrow().get(addr))
}

/// Stores `value` directly, bypassing write side effects (models the hardware
/// changing a register on its own, e.g. an edge latching PR).
pub fn poke(addr: u32, value: u32) {
    REGISTERS.with(|r| {
        r.borrow_mut().values.insert(addr, value);
    });
}

/// Electrically ties every pin's input to its own output latch.
pub fn set_loopback(enabled: bool) {
    REGISTERS.with(|r| r.borrow_mut().loopback = enabled);
}

/// Sets the levels seen on the input pins of the port at `base`.
pub fn drive_input(base: u32, levels: u32) {
    REGISTERS.with(|r| {
        r.borrow_mut().inputs.insert(base, levels);
    });
}

/// Number of writes issued to `addr` since `attach()`.
pub fn writes_to(addr: u32) -> usize {
    REGISTERS.with(|r| r.borrow().writes.iter().filter(|(a, _)| *a == addr).count())
}

/// Every write since `attach()`, oldest first.
pub fn writes() -> Vec<(u32, u32)> {
    REGISTERS.with(|r| r.borrow().writes.clone())
}

/// Runs `hook` before every read, with mutable access to the raw values. Used
/// to model an interrupt handler running between two accesses.
pub fn before_read(hook: impl FnMut(u32, &mut HashMap<u32, u32>) + 'static) {
    REGISTERS.with(|r| r.borrow_mut().before_read = Some(Box::new(hook)));
}

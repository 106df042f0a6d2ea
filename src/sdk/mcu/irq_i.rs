use log::trace;
use num_derive::FromPrimitive;
use num_traits::FromPrimitive;

use crate::error::GpioError;
use crate::sdk::mcu::pin::Pin;
use crate::sdk::mcu::register::{
    read_reg_nvic_iser, write_reg_nvic_icer, write_reg_nvic_icpr, write_reg_nvic_iser,
};
use crate::{BIT, BM_IS_SET};

/// NVIC interrupt numbers of the external interrupt line vectors.
///
/// Lines 0-4 each have their own vector; lines 5-9 and 10-15 share one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
#[repr(u8)]
pub enum Interrupt {
    EXTI0 = 6,
    EXTI1 = 7,
    EXTI2 = 8,
    EXTI3 = 9,
    EXTI4 = 10,
    EXTI9_5 = 23,
    EXTI15_10 = 40,
}

impl Interrupt {
    /// Vector serving EXTI line `pin`.
    pub const fn for_line(pin: Pin) -> Self {
        match pin.index() {
            0 => Interrupt::EXTI0,
            1 => Interrupt::EXTI1,
            2 => Interrupt::EXTI2,
            3 => Interrupt::EXTI3,
            4 => Interrupt::EXTI4,
            5..=9 => Interrupt::EXTI9_5,
            _ => Interrupt::EXTI15_10,
        }
    }

    #[inline(always)]
    pub const fn number(self) -> u8 {
        self as u8
    }

    // (byte offset of the 32-bit word, bit within it)
    #[inline(always)]
    const fn word_and_bit(self) -> (u32, u32) {
        let n = self as u32;
        (4 * (n / 32), BIT!(n % 32))
    }
}

impl TryFrom<u8> for Interrupt {
    type Error = GpioError;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        Interrupt::from_u8(raw).ok_or(GpioError::InvalidInterrupt(raw))
    }
}

/// Handle to the NVIC enable and pending arrays.
///
/// Each array is write 1 to act, so a single store touches only the bit it
/// names and needs no read-modify-write.
#[derive(Debug)]
pub struct Nvic {
    _private: (),
}

impl Nvic {
    pub(crate) const fn new() -> Self {
        Nvic { _private: () }
    }

    pub fn enable(&mut self, irq: Interrupt) {
        trace!("nvic: enable {:?}", irq);
        let (word, bit) = irq.word_and_bit();
        write_reg_nvic_iser(bit, word);
    }

    pub fn disable(&mut self, irq: Interrupt) {
        trace!("nvic: disable {:?}", irq);
        let (word, bit) = irq.word_and_bit();
        write_reg_nvic_icer(bit, word);
    }

    /// Drops a pending request that the NVIC has latched but not yet serviced.
    pub fn unpend(&mut self, irq: Interrupt) {
        let (word, bit) = irq.word_and_bit();
        write_reg_nvic_icpr(bit, word);
    }

    pub fn is_enabled(&self, irq: Interrupt) -> bool {
        let (word, bit) = irq.word_and_bit();
        BM_IS_SET!(read_reg_nvic_iser(word), bit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdk::mcu::register::{
        mock_read_reg32, mock_write_reg32, read_reg32, write_reg32, NVIC_ICER, NVIC_ICPR,
        NVIC_ISER,
    };
    use crate::sdk::mcu::sim;
    use mry::Any;

    #[test]
    fn test_interrupt_for_line() {
        assert_eq!(Interrupt::for_line(Pin::at::<0>()), Interrupt::EXTI0);
        assert_eq!(Interrupt::for_line(Pin::at::<4>()), Interrupt::EXTI4);
        assert_eq!(Interrupt::for_line(Pin::at::<5>()), Interrupt::EXTI9_5);
        assert_eq!(Interrupt::for_line(Pin::at::<9>()), Interrupt::EXTI9_5);
        assert_eq!(Interrupt::for_line(Pin::at::<10>()), Interrupt::EXTI15_10);
        assert_eq!(Interrupt::for_line(Pin::at::<15>()), Interrupt::EXTI15_10);
    }

    #[test]
    fn test_interrupt_from_number() {
        assert_eq!(Interrupt::try_from(6u8), Ok(Interrupt::EXTI0));
        assert_eq!(Interrupt::try_from(40u8), Ok(Interrupt::EXTI15_10));
        assert_eq!(Interrupt::try_from(11u8), Err(GpioError::InvalidInterrupt(11)));
        assert_eq!(Interrupt::EXTI9_5.number(), 23);
    }

    /// Interrupt 40 lives in the second word of each array, at bit 8.
    #[test]
    #[mry::lock(read_reg32, write_reg32)]
    fn test_nvic_word_selection() {
        mock_write_reg32(Any, Any).returns(());

        let mut nvic = Nvic::new();
        nvic.enable(Interrupt::EXTI0);
        nvic.enable(Interrupt::EXTI15_10);
        nvic.disable(Interrupt::EXTI15_10);
        nvic.unpend(Interrupt::EXTI9_5);

        mock_write_reg32(NVIC_ISER, 0x0000_0040).assert_called(1);
        mock_write_reg32(NVIC_ISER + 4, 0x0000_0100).assert_called(1);
        mock_write_reg32(NVIC_ICER + 4, 0x0000_0100).assert_called(1);
        mock_write_reg32(NVIC_ICPR, 0x0080_0000).assert_called(1);
        // Write 1 to act, never read back first
        mock_read_reg32(Any).assert_called(0);
    }

    #[test]
    #[mry::lock(read_reg32, write_reg32)]
    fn test_nvic_enable_disable() {
        sim::attach();

        let mut nvic = Nvic::new();
        nvic.enable(Interrupt::EXTI0);
        nvic.enable(Interrupt::EXTI1);
        assert!(nvic.is_enabled(Interrupt::EXTI0));
        assert!(nvic.is_enabled(Interrupt::EXTI1));

        nvic.disable(Interrupt::EXTI0);
        assert!(!nvic.is_enabled(Interrupt::EXTI0));
        assert!(nvic.is_enabled(Interrupt::EXTI1));
    }
}

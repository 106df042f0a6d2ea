use log::debug;

use crate::sdk::mcu::pin::Port;
use crate::sdk::mcu::register::{
    read_reg_rcc_ahb1enr, read_reg_rcc_apb2enr, write_reg_rcc_ahb1enr, write_reg_rcc_apb2enr,
    FLD_RCC_AHB1ENR, FLD_RCC_APB2ENR,
};
use crate::{BIT, BM_CLR, BM_IS_SET, BM_SET};

/// Clock gating for the blocks this crate drives.
///
/// A GPIO port or SYSCFG whose clock is off reads as zero and silently drops
/// writes, so enable the clock before the first configuration call.
#[derive(Debug)]
pub struct Rcc {
    _private: (),
}

impl Rcc {
    pub(crate) const fn new() -> Self {
        Rcc { _private: () }
    }

    // AHB1ENR bit n gates port n
    #[inline(always)]
    fn gpio_enable_bit(port: Port) -> u32 {
        let bit = BIT!(port.index());
        debug_assert!(FLD_RCC_AHB1ENR::all().contains(FLD_RCC_AHB1ENR::from_bits_retain(bit)));
        bit
    }

    pub fn enable_gpio_clock(&mut self, port: Port) {
        debug!("rcc: enable clock for gpio {:?}", port);

        let mut val = read_reg_rcc_ahb1enr();
        BM_SET!(val, Self::gpio_enable_bit(port));
        write_reg_rcc_ahb1enr(val);
    }

    pub fn disable_gpio_clock(&mut self, port: Port) {
        debug!("rcc: disable clock for gpio {:?}", port);

        let mut val = read_reg_rcc_ahb1enr();
        BM_CLR!(val, Self::gpio_enable_bit(port));
        write_reg_rcc_ahb1enr(val);
    }

    pub fn is_gpio_clock_enabled(&self, port: Port) -> bool {
        BM_IS_SET!(read_reg_rcc_ahb1enr(), Self::gpio_enable_bit(port))
    }

    /// SYSCFG holds the EXTI source multiplexer; it must be clocked before
    /// `Syscfg::select_source` has any effect.
    pub fn enable_syscfg_clock(&mut self) {
        debug!("rcc: enable clock for syscfg");

        let mut val = read_reg_rcc_apb2enr();
        BM_SET!(val, FLD_RCC_APB2ENR::SYSCFG_EN.bits());
        write_reg_rcc_apb2enr(val);
    }
}

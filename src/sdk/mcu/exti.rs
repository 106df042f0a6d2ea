use log::trace;
use num_traits::FromPrimitive;

use crate::sdk::common::bit::{get_field, replace_field, set_field};
use crate::sdk::mcu::irq_i::{Interrupt, Nvic};
use crate::sdk::mcu::pin::{Edge, Pin, Port};
use crate::sdk::mcu::register::{
    read_reg_exti_ftsr, read_reg_exti_imr, read_reg_exti_pr, read_reg_exti_rtsr,
    read_reg_exti_swier, read_reg_syscfg_exticr, write_reg_exti_ftsr, write_reg_exti_imr,
    write_reg_exti_pr, write_reg_exti_rtsr, write_reg_exti_swier, write_reg_syscfg_exticr,
    EXTI_LINE_WIDTH, SYSCFG_EXTICR_LINES_PER_REG, SYSCFG_EXTICR_WIDTH,
};
use crate::{BM_CLR, BM_IS_SET, BM_SET};

/// Handle to the external interrupt controller. Line `n` is fed by pin `n` of
/// whichever port `Syscfg::select_source` routed to it (port A after reset).
#[derive(Debug)]
pub struct Exti {
    _private: (),
}

impl Exti {
    pub(crate) const fn new() -> Self {
        Exti { _private: () }
    }

    /// Arms the trigger edge(s) of line `pin`.
    ///
    /// # Notes
    ///
    /// * `Edge::Both` sets the line's bit in both RTSR and FTSR
    /// * The new selection replaces the old one: the trigger that is not
    ///   selected is cleared, and `Edge::None` clears both
    /// * With the `or-writes` feature bits are only ever set, so a trigger
    ///   armed earlier stays armed and `Edge::None` writes nothing
    pub fn configure_edge(&mut self, pin: Pin, edge: Edge) {
        trace!("exti {}: edge {:?}", pin.index(), edge);

        let or_writes = cfg!(feature = "or-writes");

        if edge.rising() || !or_writes {
            let val = read_reg_exti_rtsr();
            write_reg_exti_rtsr(set_field(val, EXTI_LINE_WIDTH, pin.slot(), edge.rising() as u32));
        }
        if edge.falling() || !or_writes {
            let val = read_reg_exti_ftsr();
            write_reg_exti_ftsr(set_field(val, EXTI_LINE_WIDTH, pin.slot(), edge.falling() as u32));
        }
    }

    /// Unmasks line `pin` and enables its NVIC vector `irq`.
    ///
    /// Both halves are needed for the handler to run: a masked line still
    /// latches PR but never reaches the NVIC, and a disabled vector ignores an
    /// unmasked line.
    pub fn enable_interrupt(&mut self, pin: Pin, irq: Interrupt, nvic: &mut Nvic) {
        trace!("exti {}: enable via {:?}", pin.index(), irq);

        let mut val = read_reg_exti_imr();
        BM_SET!(val, pin.mask());
        write_reg_exti_imr(val);

        nvic.enable(irq);
    }

    /// Masks line `pin` and disarms both of its triggers.
    ///
    /// The NVIC vector is not touched since lines 5-9 and 10-15 share
    /// vectors; call `Nvic::disable` once no line needs it.
    pub fn disable_interrupt(&mut self, pin: Pin) {
        trace!("exti {}: disable", pin.index());

        let mut val = read_reg_exti_imr();
        BM_CLR!(val, pin.mask());
        write_reg_exti_imr(val);

        let mut val = read_reg_exti_rtsr();
        BM_CLR!(val, pin.mask());
        write_reg_exti_rtsr(val);

        let mut val = read_reg_exti_ftsr();
        BM_CLR!(val, pin.mask());
        write_reg_exti_ftsr(val);
    }

    /// Acknowledges a pending request on line `pin`.
    ///
    /// # Algorithm
    ///
    /// 1. Read PR
    /// 2. If the line's bit is set, write a word holding only that bit
    ///
    /// # Notes
    ///
    /// * PR is write 1 to clear. Writing back the value that was read would
    ///   also acknowledge every other pending line, losing their requests
    /// * Call this first thing in the handler; a handler that returns with the
    ///   bit still set is re-entered immediately
    /// * Nothing pending means nothing is written, so clearing twice is safe
    pub fn clear_pending(&mut self, pin: Pin) {
        if BM_IS_SET!(read_reg_exti_pr(), pin.mask()) {
            trace!("exti {}: clear pending", pin.index());
            write_reg_exti_pr(pin.mask());
        }
    }

    pub fn is_pending(&self, pin: Pin) -> bool {
        BM_IS_SET!(read_reg_exti_pr(), pin.mask())
    }

    /// Whether line `pin` is unmasked in IMR.
    pub fn is_enabled(&self, pin: Pin) -> bool {
        BM_IS_SET!(read_reg_exti_imr(), pin.mask())
    }

    /// Raises a request on line `pin` from software. The pending bit is only
    /// set if the line is unmasked.
    pub fn trigger(&mut self, pin: Pin) {
        trace!("exti {}: software trigger", pin.index());

        let mut val = read_reg_exti_swier();
        BM_SET!(val, pin.mask());
        write_reg_exti_swier(val);
    }
}

/// Handle to the SYSCFG EXTI source multiplexer.
#[derive(Debug)]
pub struct Syscfg {
    _private: (),
}

impl Syscfg {
    pub(crate) const fn new() -> Self {
        Syscfg { _private: () }
    }

    // (byte offset of EXTICRn, field slot within it)
    #[inline(always)]
    fn exticr_location(pin: Pin) -> (u32, u32) {
        let reg = (pin.index() / SYSCFG_EXTICR_LINES_PER_REG) as u32;
        let slot = (pin.index() % SYSCFG_EXTICR_LINES_PER_REG) as u32;
        (4 * reg, slot)
    }

    /// Routes EXTI line `pin` from `port`. Only one port can drive a line, so
    /// this replaces whatever was selected before, with or without the
    /// `or-writes` feature. Needs the SYSCFG clock.
    pub fn select_source(&mut self, pin: Pin, port: Port) {
        trace!("syscfg: exti {} from {:?}", pin.index(), port);

        let (offset, slot) = Self::exticr_location(pin);
        let val = read_reg_syscfg_exticr(offset);
        write_reg_syscfg_exticr(
            replace_field(val, SYSCFG_EXTICR_WIDTH, slot, port.index() as u32),
            offset,
        );
    }

    pub fn source(&self, pin: Pin) -> Option<Port> {
        let (offset, slot) = Self::exticr_location(pin);
        Port::from_u32(get_field(read_reg_syscfg_exticr(offset), SYSCFG_EXTICR_WIDTH, slot))
    }
}

use log::trace;

use crate::sdk::common::bit::{get_field, set_field};
use crate::sdk::mcu::pin::{AltFunction, Mode, OutputType, Pin, PinConfig, Port, Pull, Speed};
use crate::sdk::mcu::register::{
    read_reg_gpio_afrh, read_reg_gpio_afrl, read_reg_gpio_idr, read_reg_gpio_moder,
    read_reg_gpio_odr, read_reg_gpio_ospeedr, read_reg_gpio_otyper, read_reg_gpio_pupdr,
    write_reg_gpio_afrh, write_reg_gpio_afrl, write_reg_gpio_bsrr, write_reg_gpio_moder,
    write_reg_gpio_odr, write_reg_gpio_ospeedr, write_reg_gpio_otyper, write_reg_gpio_pupdr,
    GPIO_AFR_PINS_PER_REG, GPIO_AFR_WIDTH, GPIO_BSRR_RESET_SHIFT, GPIO_DATA_WIDTH,
    GPIO_MODER_WIDTH, GPIO_OSPEEDR_WIDTH, GPIO_OTYPER_WIDTH, GPIO_PUPDR_WIDTH, FLD_GPIO_BSRR,
};
use crate::{BM_CLR, BM_SET};
use num_traits::FromPrimitive;

/// Exclusive handle to one GPIO port's register block.
///
/// Handles are only created by `Peripherals`, once per port, and are not
/// `Clone`: holding `&mut GpioPort` is what entitles code to run a
/// read-modify-write sequence on the port's registers. The handle keeps no
/// copy of register contents; every call goes straight to the hardware.
///
/// The port's clock must be enabled (`Rcc::enable_gpio_clock`) before any
/// call here. A gated port reads as zero and ignores writes.
#[derive(Debug)]
pub struct GpioPort {
    port: Port,
}

impl GpioPort {
    pub(crate) const fn new(port: Port) -> Self {
        GpioPort { port }
    }

    pub const fn port(&self) -> Port {
        self.port
    }

    #[inline(always)]
    fn base(&self) -> u32 {
        self.port.base()
    }

    /// Initializes a pin from a configuration descriptor.
    ///
    /// # Algorithm
    ///
    /// 1. Write the 2-bit mode field at `2 * pin` in MODER
    /// 2. Write the 2-bit speed field at `2 * pin` in OSPEEDR
    /// 3. Write the 1-bit output type field at `pin` in OTYPER
    /// 4. Write the 2-bit pull field at `2 * pin` in PUPDR
    /// 5. For alternate-function mode, write the 4-bit selector to AFRL/AFRH
    ///
    /// # Notes
    ///
    /// * Each step is a separate read-modify-write; only the pin's own span
    ///   of each register changes
    /// * With the `or-writes` feature the fields are OR'd in without clearing,
    ///   so a pin must not be moved from one non-zero value to another
    /// * Nothing is read back to verify the result
    pub fn init(&mut self, config: PinConfig) {
        trace!(
            "gpio {:?}{}: init {:?} {:?} {:?} {:?}",
            self.port,
            config.pin.index(),
            config.mode,
            config.output_type,
            config.speed,
            config.pull
        );

        self.set_mode(config.pin, config.mode);
        self.set_speed(config.pin, config.speed);
        self.set_output_type(config.pin, config.output_type);
        self.set_pull(config.pin, config.pull);

        if config.mode == Mode::Alternate {
            self.set_alt_function(config.pin, config.alternate);
        }
    }

    pub fn set_mode(&mut self, pin: Pin, mode: Mode) {
        let base = self.base();
        let val = read_reg_gpio_moder(base);
        write_reg_gpio_moder(set_field(val, GPIO_MODER_WIDTH, pin.slot(), mode as u32), base);
    }

    pub fn set_output_type(&mut self, pin: Pin, output_type: OutputType) {
        let base = self.base();
        let val = read_reg_gpio_otyper(base);
        write_reg_gpio_otyper(
            set_field(val, GPIO_OTYPER_WIDTH, pin.slot(), output_type as u32),
            base,
        );
    }

    pub fn set_speed(&mut self, pin: Pin, speed: Speed) {
        let base = self.base();
        let val = read_reg_gpio_ospeedr(base);
        write_reg_gpio_ospeedr(set_field(val, GPIO_OSPEEDR_WIDTH, pin.slot(), speed as u32), base);
    }

    pub fn set_pull(&mut self, pin: Pin, pull: Pull) {
        let base = self.base();
        let val = read_reg_gpio_pupdr(base);
        write_reg_gpio_pupdr(set_field(val, GPIO_PUPDR_WIDTH, pin.slot(), pull as u32), base);
    }

    /// Selects the alternate function routed through `pin`.
    ///
    /// Pins 0-7 live in AFRL at `4 * pin`, pins 8-15 in AFRH at
    /// `4 * (pin % 8)`. The pin's mode must also be `Mode::Alternate` for the
    /// function to reach the pad.
    pub fn set_alt_function(&mut self, pin: Pin, af: AltFunction) {
        trace!("gpio {:?}{}: af {}", self.port, pin.index(), af.bits());

        let base = self.base();
        let slot = (pin.index() % GPIO_AFR_PINS_PER_REG) as u32;

        if pin.index() < GPIO_AFR_PINS_PER_REG {
            let val = read_reg_gpio_afrl(base);
            write_reg_gpio_afrl(set_field(val, GPIO_AFR_WIDTH, slot, af.bits()), base);
        } else {
            let val = read_reg_gpio_afrh(base);
            write_reg_gpio_afrh(set_field(val, GPIO_AFR_WIDTH, slot, af.bits()), base);
        }
    }

    /// Reads the electrical level of `pin` from IDR.
    pub fn read(&self, pin: Pin) -> bool {
        get_field(read_reg_gpio_idr(self.base()), GPIO_DATA_WIDTH, pin.slot()) != 0
    }

    /// Level currently latched in ODR for `pin`, i.e. what the pin drives when
    /// it is an output.
    pub fn output_level(&self, pin: Pin) -> bool {
        get_field(read_reg_gpio_odr(self.base()), GPIO_DATA_WIDTH, pin.slot()) != 0
    }

    /// Drives `pin` high (`true`) or low (`false`) through ODR.
    ///
    /// # Notes
    ///
    /// * Read-modify-write of ODR: other pins' output bits are preserved,
    ///   but an interrupt that writes ODR between the read and the write has
    ///   its update overwritten. Use `write_atomic` when an interrupt handler
    ///   may drive pins on the same port
    /// * Writing an input pin only changes the latch, which takes effect when
    ///   the pin becomes an output
    pub fn write(&mut self, pin: Pin, value: bool) {
        trace!("gpio {:?}{}: write {}", self.port, pin.index(), value);

        let base = self.base();
        let mut val = read_reg_gpio_odr(base);

        if value {
            BM_SET!(val, pin.mask());
        } else {
            BM_CLR!(val, pin.mask());
        }

        write_reg_gpio_odr(val, base);
    }

    /// Drives `pin` with a single store to BSRR. No read is involved, so no
    /// other pin's update can be lost.
    pub fn write_atomic(&mut self, pin: Pin, value: bool) {
        let bits = if value {
            pin.mask() & FLD_GPIO_BSRR::BS.bits()
        } else {
            (pin.mask() << GPIO_BSRR_RESET_SHIFT) & FLD_GPIO_BSRR::BR.bits()
        };
        write_reg_gpio_bsrr(bits, self.base());
    }

    /// Inverts `pin` by reading its input level and writing the opposite.
    ///
    /// # Hazard
    ///
    /// This is two steps with a window in between. If an interrupt handler
    /// writes the same pin after the read and before the write, the handler's
    /// write is lost: the pin ends up at the inverse of the stale level. Do
    /// not toggle the same pin from both thread and interrupt context; use
    /// `toggle_critical` if that cannot be avoided.
    pub fn toggle(&mut self, pin: Pin) {
        let level = self.read(pin);
        self.write(pin, !level);
    }

    /// `toggle` with interrupts held off for the duration, using the
    /// platform's critical-section implementation.
    pub fn toggle_critical(&mut self, pin: Pin) {
        critical_section::with(|_| self.toggle(pin));
    }

    pub fn mode(&self, pin: Pin) -> Mode {
        Mode::from_bits(get_field(read_reg_gpio_moder(self.base()), GPIO_MODER_WIDTH, pin.slot()))
    }

    pub fn output_type(&self, pin: Pin) -> OutputType {
        OutputType::from_bits(get_field(
            read_reg_gpio_otyper(self.base()),
            GPIO_OTYPER_WIDTH,
            pin.slot(),
        ))
    }

    pub fn speed(&self, pin: Pin) -> Speed {
        Speed::from_bits(get_field(
            read_reg_gpio_ospeedr(self.base()),
            GPIO_OSPEEDR_WIDTH,
            pin.slot(),
        ))
    }

    /// `None` when the field holds the reserved encoding.
    pub fn pull(&self, pin: Pin) -> Option<Pull> {
        Pull::from_u32(get_field(read_reg_gpio_pupdr(self.base()), GPIO_PUPDR_WIDTH, pin.slot()))
    }

    pub fn alt_function(&self, pin: Pin) -> AltFunction {
        let slot = (pin.index() % GPIO_AFR_PINS_PER_REG) as u32;
        let val = if pin.index() < GPIO_AFR_PINS_PER_REG {
            read_reg_gpio_afrl(self.base())
        } else {
            read_reg_gpio_afrh(self.base())
        };
        AltFunction::from_bits(get_field(val, GPIO_AFR_WIDTH, slot))
    }
}

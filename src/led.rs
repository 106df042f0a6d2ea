use core::cell::RefCell;

use critical_section::Mutex;
use log::debug;

use crate::config::{
    BUTTON_EDGE, BUTTON_IRQ, BUTTON_PIN, BUTTON_PIN_CONFIG, BUTTON_PORT, LED_PINS,
    LED_PIN_CONFIG, LED_PORT,
};
use crate::sdk::mcu::clock::Rcc;
use crate::sdk::mcu::exti::{Exti, Syscfg};
use crate::sdk::mcu::gpio::GpioPort;
use crate::sdk::mcu::irq_i::Nvic;
use crate::sdk::mcu::pin::Pin;

/// Handles the button handler needs, moved into interrupt context by
/// `install_button_handler`.
#[derive(Debug)]
pub struct ButtonContext {
    pub exti: Exti,
    pub leds: GpioPort,
}

static BUTTON_CONTEXT: Mutex<RefCell<Option<ButtonContext>>> = Mutex::new(RefCell::new(None));

/// Clocks the LED port and configures every LED pin as a push-pull output.
pub fn led_init(rcc: &mut Rcc, leds: &mut GpioPort) {
    debug_assert_eq!(leds.port(), LED_PORT);

    rcc.enable_gpio_clock(leds.port());
    for pin in LED_PINS {
        leds.init(LED_PIN_CONFIG.with_pin(pin));
    }
}

pub fn led_turn_on(leds: &mut GpioPort, led: Pin) {
    leds.write(led, true);
}

pub fn led_turn_off(leds: &mut GpioPort, led: Pin) {
    leds.write(led, false);
}

pub fn led_toggle(leds: &mut GpioPort, led: Pin) {
    leds.toggle(led);
}

/// Brings up the user button as a falling-edge interrupt source on its line.
pub fn button_init(
    rcc: &mut Rcc,
    button: &mut GpioPort,
    syscfg: &mut Syscfg,
    exti: &mut Exti,
    nvic: &mut Nvic,
) {
    debug_assert_eq!(button.port(), BUTTON_PORT);
    debug!("button: {:?}{} on {:?}", BUTTON_PORT, BUTTON_PIN.index(), BUTTON_IRQ);

    rcc.enable_gpio_clock(button.port());
    button.init(BUTTON_PIN_CONFIG);

    rcc.enable_syscfg_clock();
    syscfg.select_source(BUTTON_PIN, button.port());

    exti.configure_edge(BUTTON_PIN, BUTTON_EDGE);
    exti.enable_interrupt(BUTTON_PIN, BUTTON_IRQ, nvic);
}

/// Body of the button interrupt: acknowledge the line, then flip every LED.
///
/// The acknowledge must come first. Clearing after the LED work would drop
/// an edge that arrives while the LEDs are being toggled.
pub fn on_button_interrupt(exti: &mut Exti, leds: &mut GpioPort) {
    exti.clear_pending(BUTTON_PIN);

    for pin in LED_PINS {
        leds.toggle(pin);
    }
}

pub fn install_button_handler(context: ButtonContext) {
    critical_section::with(|cs| {
        BUTTON_CONTEXT.borrow(cs).replace(Some(context));
    });
}

/// Takes the handles back out of interrupt context.
pub fn release_button_handler() -> Option<ButtonContext> {
    critical_section::with(|cs| BUTTON_CONTEXT.borrow(cs).take())
}

/// EXTI0 vector entry. Does nothing until `install_button_handler` has run.
pub fn exti0_handler() {
    critical_section::with(|cs| {
        if let Some(context) = BUTTON_CONTEXT.borrow(cs).borrow_mut().as_mut() {
            on_button_interrupt(&mut context.exti, &mut context.leds);
        }
    });
}

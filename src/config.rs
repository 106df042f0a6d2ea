use crate::sdk::mcu::irq_i::Interrupt;
use crate::sdk::mcu::pin::{Edge, Mode, OutputType, Pin, PinConfig, Port, Pull, Speed};

// Discovery board: four user LEDs on port D, user button on PA0 (active high,
// released edge is falling)

pub const LED_PORT: Port = Port::D;

pub const LED_GREEN: Pin = Pin::at::<12>();
pub const LED_ORANGE: Pin = Pin::at::<13>();
pub const LED_RED: Pin = Pin::at::<14>();
pub const LED_BLUE: Pin = Pin::at::<15>();

pub const LED_PINS: [Pin; 4] = [LED_GREEN, LED_ORANGE, LED_RED, LED_BLUE];

// Pin is replaced per LED with `with_pin`
pub const LED_PIN_CONFIG: PinConfig = PinConfig::new(LED_GREEN)
    .with_mode(Mode::Output)
    .with_output_type(OutputType::PushPull)
    .with_speed(Speed::Medium)
    .with_pull(Pull::None);

pub const BUTTON_PORT: Port = Port::A;
pub const BUTTON_PIN: Pin = Pin::at::<0>();
pub const BUTTON_EDGE: Edge = Edge::Falling;
pub const BUTTON_IRQ: Interrupt = Interrupt::EXTI0;

// The board has an external pull-down on PA0
pub const BUTTON_PIN_CONFIG: PinConfig = PinConfig::new(BUTTON_PIN)
    .with_mode(Mode::Input)
    .with_pull(Pull::None);

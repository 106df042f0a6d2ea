use num_derive::FromPrimitive;
use num_traits::FromPrimitive;

use crate::error::GpioError;
use crate::sdk::mcu::register::{gpio_port_base, GPIO_PORT_COUNT};
use crate::BIT;

/// Index of a pin within its port, always 0-15.
///
/// Bit offsets are computed as `width * index`, so an index past 15 would
/// land in a neighbouring pin's field (or past the end of the register).
/// Construction is the only place the range is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pin(u8);

impl Pin {
    pub const COUNT: u8 = 16;

    pub const fn new(index: u8) -> Result<Self, GpioError> {
        if index < Self::COUNT {
            Ok(Pin(index))
        } else {
            Err(GpioError::InvalidPin(index))
        }
    }

    /// Compile-time checked pin, e.g. `Pin::at::<12>()`.
    pub const fn at<const N: u8>() -> Self {
        const { assert!(N < Pin::COUNT, "pin index out of range (0-15)") };
        Pin(N)
    }

    #[inline(always)]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Field slot of this pin in a one-field-per-pin register.
    #[inline(always)]
    pub(crate) const fn slot(self) -> u32 {
        self.0 as u32
    }

    /// Single-bit mask of this pin in a one-bit-per-pin register.
    #[inline(always)]
    pub(crate) const fn mask(self) -> u32 {
        BIT!(self.0)
    }

    pub fn all() -> impl Iterator<Item = Pin> {
        (0..Self::COUNT).map(Pin)
    }
}

impl TryFrom<u8> for Pin {
    type Error = GpioError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Pin::new(index)
    }
}

impl From<Pin> for u8 {
    fn from(pin: Pin) -> u8 {
        pin.0
    }
}

/// GPIO port letter. The discriminant is the port's index in the register map
/// and its clock-enable bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
#[repr(u8)]
pub enum Port {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
    F = 5,
    G = 6,
    H = 7,
    I = 8,
}

impl Port {
    #[inline(always)]
    pub const fn index(self) -> u8 {
        self as u8
    }

    #[inline(always)]
    pub const fn base(self) -> u32 {
        gpio_port_base(self as u8)
    }
}

impl TryFrom<u8> for Port {
    type Error = GpioError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        if index >= GPIO_PORT_COUNT {
            return Err(GpioError::InvalidPort(index));
        }
        Port::from_u8(index).ok_or(GpioError::InvalidPort(index))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
#[repr(u32)]
pub enum Mode {
    Input = 0,
    Output = 1,
    Alternate = 2,
    Analog = 3,
}

impl Mode {
    pub(crate) const fn from_bits(bits: u32) -> Self {
        match bits & 0b11 {
            0 => Mode::Input,
            1 => Mode::Output,
            2 => Mode::Alternate,
            _ => Mode::Analog,
        }
    }
}

impl TryFrom<u32> for Mode {
    type Error = GpioError;

    fn try_from(raw: u32) -> Result<Self, Self::Error> {
        Mode::from_u32(raw).ok_or(GpioError::InvalidMode(raw))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
#[repr(u32)]
pub enum OutputType {
    PushPull = 0,
    OpenDrain = 1,
}

impl OutputType {
    pub(crate) const fn from_bits(bits: u32) -> Self {
        if bits & 1 == 0 {
            OutputType::PushPull
        } else {
            OutputType::OpenDrain
        }
    }
}

impl TryFrom<u32> for OutputType {
    type Error = GpioError;

    fn try_from(raw: u32) -> Result<Self, Self::Error> {
        OutputType::from_u32(raw).ok_or(GpioError::InvalidOutputType(raw))
    }
}

/// Output slew rate, slowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, FromPrimitive)]
#[repr(u32)]
pub enum Speed {
    Low = 0,
    Medium = 1,
    High = 2,
    VeryHigh = 3,
}

impl Speed {
    pub(crate) const fn from_bits(bits: u32) -> Self {
        match bits & 0b11 {
            0 => Speed::Low,
            1 => Speed::Medium,
            2 => Speed::High,
            _ => Speed::VeryHigh,
        }
    }
}

impl TryFrom<u32> for Speed {
    type Error = GpioError;

    fn try_from(raw: u32) -> Result<Self, Self::Error> {
        Speed::from_u32(raw).ok_or(GpioError::InvalidSpeed(raw))
    }
}

/// Internal pull resistor. Encoding 0b11 is reserved by the hardware and is
/// never written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
#[repr(u32)]
pub enum Pull {
    None = 0,
    Up = 1,
    Down = 2,
}

impl TryFrom<u32> for Pull {
    type Error = GpioError;

    fn try_from(raw: u32) -> Result<Self, Self::Error> {
        Pull::from_u32(raw).ok_or(GpioError::InvalidPull(raw))
    }
}

/// 4-bit alternate function selector (AF0-AF15).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AltFunction(u8);

impl AltFunction {
    pub const AF0: AltFunction = AltFunction(0);

    pub const fn new(af: u8) -> Result<Self, GpioError> {
        if af <= 0xf {
            Ok(AltFunction(af))
        } else {
            Err(GpioError::InvalidAltFunction(af))
        }
    }

    pub const fn at<const N: u8>() -> Self {
        const { assert!(N <= 0xf, "alternate function out of range (0-15)") };
        AltFunction(N)
    }

    #[inline(always)]
    pub const fn bits(self) -> u32 {
        self.0 as u32
    }

    pub(crate) const fn from_bits(bits: u32) -> Self {
        AltFunction((bits & 0xf) as u8)
    }
}

impl TryFrom<u8> for AltFunction {
    type Error = GpioError;

    fn try_from(af: u8) -> Result<Self, Self::Error> {
        AltFunction::new(af)
    }
}

/// Trigger edge selection for an external interrupt line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
#[repr(u8)]
pub enum Edge {
    Rising = 0,
    Falling = 1,
    Both = 2,
    None = 3,
}

impl Edge {
    #[inline(always)]
    pub const fn rising(self) -> bool {
        matches!(self, Edge::Rising | Edge::Both)
    }

    #[inline(always)]
    pub const fn falling(self) -> bool {
        matches!(self, Edge::Falling | Edge::Both)
    }
}

impl TryFrom<u8> for Edge {
    type Error = GpioError;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        Edge::from_u8(raw).ok_or(GpioError::InvalidEdge(raw))
    }
}

/// Everything `GpioPort::init` needs to bring up one pin.
///
/// Consumed by value during initialization; nothing keeps a reference to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinConfig {
    pub pin: Pin,
    pub mode: Mode,
    pub output_type: OutputType,
    pub pull: Pull,
    pub speed: Speed,
    /// Only applied when `mode` is `Mode::Alternate`.
    pub alternate: AltFunction,
}

impl PinConfig {
    /// Reset-state configuration for `pin`: floating input, push-pull, low speed.
    pub const fn new(pin: Pin) -> Self {
        PinConfig {
            pin,
            mode: Mode::Input,
            output_type: OutputType::PushPull,
            pull: Pull::None,
            speed: Speed::Low,
            alternate: AltFunction::AF0,
        }
    }

    pub const fn with_pin(mut self, pin: Pin) -> Self {
        self.pin = pin;
        self
    }

    pub const fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub const fn with_output_type(mut self, output_type: OutputType) -> Self {
        self.output_type = output_type;
        self
    }

    pub const fn with_pull(mut self, pull: Pull) -> Self {
        self.pull = pull;
        self
    }

    pub const fn with_speed(mut self, speed: Speed) -> Self {
        self.speed = speed;
        self
    }

    /// Selects alternate-function mode with function `af`.
    pub const fn with_alternate(mut self, af: AltFunction) -> Self {
        self.mode = Mode::Alternate;
        self.alternate = af;
        self
    }
}

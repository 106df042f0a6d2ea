use thiserror::Error;

/// Rejected raw configuration values.
///
/// Register operations themselves never fail. Every value they take is checked
/// once, when it is converted into one of the typed configuration values, so a
/// bad pin index or enumerant cannot reach the bit math.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GpioError {
    #[error("pin index {0} is out of range (0-15)")]
    InvalidPin(u8),
    #[error("port index {0} does not name a GPIO port")]
    InvalidPort(u8),
    #[error("alternate function {0} does not fit in 4 bits")]
    InvalidAltFunction(u8),
    #[error("unknown pin mode encoding {0:#x}")]
    InvalidMode(u32),
    #[error("unknown output type encoding {0:#x}")]
    InvalidOutputType(u32),
    #[error("unknown output speed encoding {0:#x}")]
    InvalidSpeed(u32),
    #[error("unknown pull resistor encoding {0:#x}")]
    InvalidPull(u32),
    #[error("unknown interrupt edge selection {0}")]
    InvalidEdge(u8),
    #[error("interrupt number {0} is not an external interrupt line vector")]
    InvalidInterrupt(u8),
}
